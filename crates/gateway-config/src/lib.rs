//! # Gateway Config
//!
//! Configuration for the site summary gateway, loaded from a YAML or TOML
//! file and overridden from the environment.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod loader;

pub use config::{
    FallbackConfig, GatewayConfig, LogFormat, LoggingConfig, ProvidersConfig, ServerConfig,
};
pub use error::{ConfigError, ConfigResult};
pub use loader::{apply_env_overrides, load_config, load_file, CONFIG_PATH_ENV};
