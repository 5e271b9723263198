//! Configuration module
//!
//! - `environment` - Environment detection and logging configuration
//! - `keys` - Key store location and key generation backend

pub mod environment;
pub mod keys;

use serde::{Deserialize, Serialize};

pub use environment::{Environment, LogFormat, LoggingConfig};
pub use keys::{KeyProviderKind, KeyStoreConfig, DEFAULT_OPENSSL_TIMEOUT_SECS, DEFAULT_RSA_BITS};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Key store configuration
    #[serde(default)]
    pub keys: KeyStoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            keys: KeyStoreConfig::from_env(),
            logging: LoggingConfig::for_environment(environment).with_env_overrides(),
        }
    }
}
