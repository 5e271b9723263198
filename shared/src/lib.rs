//! Shared configuration for the identity key store
//!
//! This crate provides configuration types used by the key service and the
//! operator command line:
//! - Environment detection
//! - Logging configuration
//! - Key store location and generation backend

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, KeyProviderKind, KeyStoreConfig, LogFormat, LoggingConfig,
};
