use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use validator::Validate;

use super::models::QuakefeedConfig;

/// Errors that can occur during configuration parsing
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Other(String),
}

/// Provides default configuration file path
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".quakefeed")
        .join("config.yaml")
}

/// Loads and validates the quakefeed configuration
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<QuakefeedConfig, ConfigError> {
    let mut file = File::open(&config_path).map_err(ConfigError::FileError)?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(ConfigError::FileError)?;

    parse_config(&content)
}

/// Parses and validates a configuration document
pub fn parse_config(content: &str) -> Result<QuakefeedConfig, ConfigError> {
    // An empty document means "all defaults"
    let config: QuakefeedConfig = if content.trim().is_empty() {
        QuakefeedConfig::default()
    } else {
        serde_yaml::from_str(content).map_err(ConfigError::ParseError)?
    };

    config.validate().map_err(ConfigError::ValidationError)?;

    Ok(config)
}

/// Loads the configuration from `explicit` if given, otherwise from the
/// default path. Only a missing file at the default path falls back to
/// built-in defaults.
pub fn load_or_default(explicit: Option<&Path>) -> Result<QuakefeedConfig, ConfigError> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let path = default_config_path();
            if path.exists() {
                load_config(path)
            } else {
                Ok(QuakefeedConfig::default())
            }
        }
    }
}

/// Resolves the store connection URL from the config or DATABASE_URL
pub fn resolve_database_url(config: &QuakefeedConfig) -> Result<String, ConfigError> {
    if let Some(url) = config.store.database_url.as_deref() {
        if !url.trim().is_empty() {
            return Ok(url.to_string());
        }
    }

    env::var("DATABASE_URL").map_err(|_| {
        ConfigError::Other(
            "store.database_url is not set and DATABASE_URL environment variable not set"
                .to_string(),
        )
    })
}
