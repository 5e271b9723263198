//! Domain entities representing key pairs and their storage locations.

pub mod key_pair;

// Re-export commonly used types
pub use key_pair::{
    KeyPairFiles, KeyUse, LoadedKeys, PemKeyPair,
    KEYS_DIR_NAME, SETUP_TOKEN_FILE,
    SIG_PUBLIC_FILE, SIG_PRIVATE_FILE, ENC_PUBLIC_FILE, ENC_PRIVATE_FILE,
};
