//! # Identity Keys Core
//!
//! Domain layer of the identity service key store: key pair entities, JWK
//! value objects, the key management service and its error types.

pub mod domain;
pub mod services;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::{
    Jwk, JwkSet, KeyPairFiles, KeyUse, LoadedKeys, PemKeyPair, RsaPublicComponents,
};
pub use services::{
    KeyCipherProvider, KeyManager, OpensslCliProvider, RsaKeyProvider,
    jwk_set, pem_to_jwk,
};
pub use errors::{DomainError, DomainResult, KeyError};
