//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::KeyError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Key(#[from] KeyError),
}

impl DomainError {
    /// True when key generation failed
    pub fn is_generation_error(&self) -> bool {
        matches!(self, DomainError::Key(KeyError::Generation { .. }))
    }

    /// True when the key pairs could not be loaded
    pub fn is_load_error(&self) -> bool {
        matches!(self, DomainError::Key(KeyError::Load { .. }))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
