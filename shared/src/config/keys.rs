//! Key store configuration
//!
//! Controls where the signing and encryption key pairs live and which
//! backend produces new key material.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default RSA modulus size in bits
pub const DEFAULT_RSA_BITS: usize = 4096;

/// Default upper bound for a single `openssl` invocation
pub const DEFAULT_OPENSSL_TIMEOUT_SECS: u64 = 120;

/// Backend used to generate RSA key material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyProviderKind {
    /// In-process generation with the `rsa` crate
    #[default]
    Rsa,
    /// Shell out to the `openssl` command line tool
    Openssl,
}

impl std::str::FromStr for KeyProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rsa" | "native" | "builtin" => Ok(KeyProviderKind::Rsa),
            "openssl" => Ok(KeyProviderKind::Openssl),
            _ => Err(format!("Invalid key provider: {}", s)),
        }
    }
}

impl std::fmt::Display for KeyProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyProviderKind::Rsa => write!(f, "rsa"),
            KeyProviderKind::Openssl => write!(f, "openssl"),
        }
    }
}

/// Key store configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyStoreConfig {
    /// Base directory; keys are kept under `<directory>/keys`.
    /// `None` means the process working directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Key generation backend
    #[serde(default)]
    pub provider: KeyProviderKind,

    /// RSA modulus size in bits
    #[serde(default = "default_rsa_bits")]
    pub rsa_bits: usize,

    /// Path or name of the `openssl` binary
    #[serde(default = "default_openssl_path")]
    pub openssl_path: String,

    /// Timeout for each `openssl` invocation in seconds
    #[serde(default = "default_openssl_timeout")]
    pub openssl_timeout_secs: u64,
}

impl Default for KeyStoreConfig {
    fn default() -> Self {
        Self {
            directory: None,
            provider: KeyProviderKind::default(),
            rsa_bits: default_rsa_bits(),
            openssl_path: default_openssl_path(),
            openssl_timeout_secs: default_openssl_timeout(),
        }
    }
}

impl KeyStoreConfig {
    /// Create a configuration rooted at `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// - `KEYS_DIRECTORY`: base directory
    /// - `KEYS_PROVIDER`: `rsa` or `openssl`
    /// - `KEYS_RSA_BITS`: modulus size
    /// - `KEYS_OPENSSL_PATH`: openssl binary
    /// - `KEYS_OPENSSL_TIMEOUT_SECS`: per-invocation timeout
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let directory = lookup("KEYS_DIRECTORY")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);
        let provider = lookup("KEYS_PROVIDER")
            .and_then(|p| p.parse().ok())
            .unwrap_or_default();
        let rsa_bits = lookup("KEYS_RSA_BITS")
            .and_then(|b| b.parse().ok())
            .unwrap_or(DEFAULT_RSA_BITS);
        let openssl_path = lookup("KEYS_OPENSSL_PATH").unwrap_or_else(default_openssl_path);
        let openssl_timeout_secs = lookup("KEYS_OPENSSL_TIMEOUT_SECS")
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_OPENSSL_TIMEOUT_SECS);

        Self {
            directory,
            provider,
            rsa_bits,
            openssl_path,
            openssl_timeout_secs,
        }
    }

    /// Set the key generation backend
    pub fn with_provider(mut self, provider: KeyProviderKind) -> Self {
        self.provider = provider;
        self
    }

    /// Set the RSA modulus size
    pub fn with_rsa_bits(mut self, bits: usize) -> Self {
        self.rsa_bits = bits;
        self
    }
}

fn default_rsa_bits() -> usize {
    DEFAULT_RSA_BITS
}

fn default_openssl_path() -> String {
    String::from("openssl")
}

fn default_openssl_timeout() -> u64 {
    DEFAULT_OPENSSL_TIMEOUT_SECS
}
