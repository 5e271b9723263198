//! Key store error types
//!
//! Errors raised while producing, persisting, loading or converting the
//! signing and encryption key pairs.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key material errors
#[derive(Error, Debug)]
pub enum KeyError {
    /// The key generation backend failed or is missing
    #[error("{message}")]
    Generation { message: String },

    /// The key pairs could not be read from the key directory
    #[error("Unable to read the token-signing key pair from {}", directory.display())]
    Load { directory: PathBuf },

    /// Key material is present but not a usable RSA key
    #[error("Invalid key material: {message}")]
    InvalidKey { message: String },

    /// Filesystem failure while writing key material
    #[error("I/O error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl KeyError {
    /// Generation failure with the operator hint appended.
    pub fn generation(backend: &str, detail: impl std::fmt::Display) -> Self {
        KeyError::Generation {
            message: format!(
                "Failed to generate keys using {backend} ({detail}). Please ensure you have \
                 {backend} installed and configured on your system."
            ),
        }
    }

    /// Generation failure of the in-process RSA backend
    pub fn rsa_generation(detail: impl std::fmt::Display) -> Self {
        KeyError::Generation {
            message: format!("RSA key generation failed: {detail}"),
        }
    }

    pub fn load(directory: &Path) -> Self {
        KeyError::Load {
            directory: directory.to_path_buf(),
        }
    }

    pub fn invalid_key(message: impl Into<String>) -> Self {
        KeyError::InvalidKey {
            message: message.into(),
        }
    }

    pub fn io(path: &Path, err: impl std::fmt::Display) -> Self {
        KeyError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
