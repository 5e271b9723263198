//! Value objects representing immutable domain concepts.

pub mod jwk;

// Re-export commonly used types
pub use jwk::{Jwk, JwkSet, RsaPublicComponents, JWK_ALGORITHM};
