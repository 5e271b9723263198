//! Key service module for the identity provider's RSA keys
//!
//! This module handles:
//! - Path layout of the signing and encryption key pairs
//! - Key pair generation through a pluggable backend (in-process or `openssl`)
//! - Loading PEM key material, regenerating it when missing
//! - Deriving the public JWK Set served on the keys endpoint

mod jwk;
mod manager;
mod openssl;
mod provider;

#[cfg(test)]
mod tests;

pub use jwk::{jwk_set, pem_to_jwk};
pub use manager::KeyManager;
pub use openssl::OpensslCliProvider;
pub use provider::{validate_rsa_bits, KeyCipherProvider, RsaKeyProvider, MIN_RSA_BITS};
