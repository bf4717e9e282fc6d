//! Loading configuration from files and the environment.
//!
//! Precedence, lowest first: built-in defaults, the config file, environment
//! variables. Command-line flags are applied by the binary on top.

use crate::config::{GatewayConfig, LogFormat};
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable naming the config file when no path is given
pub const CONFIG_PATH_ENV: &str = "GATEWAY_CONFIG";

/// Load, merge and validate the configuration.
///
/// `.env` is loaded first when present. Without an explicit `path` the file
/// named by `GATEWAY_CONFIG` is used; with neither, defaults apply.
///
/// # Errors
/// Returns error if the file cannot be read or parsed, an environment
/// override is malformed, or the result fails validation
pub async fn load_config(path: Option<&Path>) -> ConfigResult<GatewayConfig> {
    if let Ok(env_file) = dotenvy::dotenv() {
        debug!(path = %env_file.display(), "Loaded .env file");
    }

    let path = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

    let mut config = match path {
        Some(path) => {
            let config = load_file(&path).await?;
            info!(path = %path.display(), "Configuration file loaded");
            config
        }
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    config.validate_all()?;
    Ok(config)
}

/// Read and parse one config file, choosing the format by extension
///
/// # Errors
/// Returns error if the file cannot be read or parsed
pub async fn load_file(path: &Path) -> ConfigResult<GatewayConfig> {
    let format = FileFormat::from_path(path)?;
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_str(&raw, format).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn parse_str(raw: &str, format: FileFormat) -> Result<GatewayConfig, String> {
    match format {
        FileFormat::Yaml => serde_yaml::from_str(raw).map_err(|e| e.to_string()),
        FileFormat::Toml => toml::from_str(raw).map_err(|e| e.to_string()),
    }
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Recognized: `PORT`, `GATEWAY_PORT` (wins over `PORT`), `GATEWAY_HOST`,
/// `DOMAIN`, `ALLOWED_ORIGINS` (comma-separated), `LOG_LEVEL`, `LOG_FORMAT`,
/// `PROVIDER_TIMEOUT_SECS`.
///
/// # Errors
/// Returns [`ConfigError::InvalidEnv`] for values that do not parse
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

    for var in ["PORT", "GATEWAY_PORT"] {
        if let Some(value) = get(var) {
            config.server.port = parse_env(var, &value)?;
        }
    }
    if let Some(host) = get("GATEWAY_HOST") {
        config.server.host = host;
    }
    if let Some(domain) = get("DOMAIN") {
        config.server.domain = domain;
    }
    if let Some(origins) = get("ALLOWED_ORIGINS") {
        config.server.allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();
    }
    if let Some(level) = get("LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(format) = get("LOG_FORMAT") {
        config.logging.format = format
            .parse::<LogFormat>()
            .map_err(|_| ConfigError::InvalidEnv {
                var: "LOG_FORMAT",
                value: format,
            })?;
    }
    if let Some(secs) = get("PROVIDER_TIMEOUT_SECS") {
        config.providers.timeout =
            Duration::from_secs(parse_env("PROVIDER_TIMEOUT_SECS", &secs)?);
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}
