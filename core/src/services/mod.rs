//! Business services containing domain logic and use cases.

pub mod keys;

// Re-export commonly used types
pub use keys::{
    KeyCipherProvider, KeyManager, OpensslCliProvider, RsaKeyProvider,
    jwk_set, pem_to_jwk,
};
