//! Key pair entities: on-disk locations and in-memory PEM material.

use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::jwk::JwkSet;
use crate::errors::{DomainResult, KeyError};

/// Name of the subdirectory holding all key files
pub const KEYS_DIR_NAME: &str = "keys";

/// Signing key pair file names
pub const SIG_PUBLIC_FILE: &str = "sig.rsa.pub.pem";
pub const SIG_PRIVATE_FILE: &str = "sig.rsa.prv.pem";

/// Encryption key pair file names
pub const ENC_PUBLIC_FILE: &str = "enc.rsa.pub.pem";
pub const ENC_PRIVATE_FILE: &str = "enc.rsa.prv.pem";

/// One-time setup token, written and consumed outside of the key store
pub const SETUP_TOKEN_FILE: &str = "setup.token";

/// Intended use of a key, as published in the `use` JWK member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyUse {
    /// Token signing
    Sig,
    /// Encryption
    Enc,
}

impl KeyUse {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyUse::Sig => "sig",
            KeyUse::Enc => "enc",
        }
    }
}

impl fmt::Display for KeyUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File locations of one PEM-encoded key pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPairFiles {
    /// Public key (SPKI PEM)
    pub public: PathBuf,
    /// Private key (PEM)
    pub private: PathBuf,
}

impl KeyPairFiles {
    pub fn new(public: impl Into<PathBuf>, private: impl Into<PathBuf>) -> Self {
        Self {
            public: public.into(),
            private: private.into(),
        }
    }

    /// Standard locations of the pair used for `key_use` inside `keys_dir`
    pub fn for_use(keys_dir: &Path, key_use: KeyUse) -> Self {
        let (public, private) = match key_use {
            KeyUse::Sig => (SIG_PUBLIC_FILE, SIG_PRIVATE_FILE),
            KeyUse::Enc => (ENC_PUBLIC_FILE, ENC_PRIVATE_FILE),
        };
        Self::new(keys_dir.join(public), keys_dir.join(private))
    }
}

/// PEM text of one key pair
#[derive(Clone, PartialEq, Eq)]
pub struct PemKeyPair {
    /// Public key PEM
    pub public: String,
    /// Private key PEM
    pub private: String,
}

impl PemKeyPair {
    pub fn new(public: impl Into<String>, private: impl Into<String>) -> Self {
        Self {
            public: public.into(),
            private: private.into(),
        }
    }
}

impl fmt::Debug for PemKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PemKeyPair")
            .field("public", &self.public)
            .field("private", &"[REDACTED]")
            .finish()
    }
}

/// Key material read from disk together with its public JWK Set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedKeys {
    /// Token signing pair
    pub sig: PemKeyPair,
    /// Encryption pair
    pub enc: PemKeyPair,
    /// Public keys of both pairs, signing entry first
    pub jwks: JwkSet,
}

impl LoadedKeys {
    /// The pair serving `key_use`
    pub fn pair(&self, key_use: KeyUse) -> &PemKeyPair {
        match key_use {
            KeyUse::Sig => &self.sig,
            KeyUse::Enc => &self.enc,
        }
    }

    /// RS256 signing key for issuing tokens
    pub fn signing_key(&self) -> DomainResult<EncodingKey> {
        EncodingKey::from_rsa_pem(self.sig.private.as_bytes()).map_err(|e| {
            KeyError::invalid_key(format!("Invalid signing private key: {}", e)).into()
        })
    }

    /// RS256 key for verifying tokens issued with [`signing_key`](Self::signing_key)
    pub fn verification_key(&self) -> DomainResult<DecodingKey> {
        DecodingKey::from_rsa_pem(self.sig.public.as_bytes()).map_err(|e| {
            KeyError::invalid_key(format!("Invalid signing public key: {}", e)).into()
        })
    }
}
