use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::constants::{database, feed, logging, time};

/// The main configuration structure for quakefeed
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct QuakefeedConfig {
    /// Upstream feed and polling settings
    #[serde(default)]
    #[validate]
    pub feed: FeedConfig,

    /// Target store settings
    #[serde(default)]
    #[validate]
    pub store: StoreConfig,

    /// Logging settings
    #[serde(default)]
    #[validate]
    pub logging: LoggingConfig,
}

/// Configuration for the upstream earthquake feed
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedConfig {
    /// GeoJSON endpoint polled every cycle
    #[serde(default = "default_feed_url")]
    #[validate(custom = "validate_http_url")]
    pub url: String,

    /// HTTP request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    #[validate(range(min = 1, max = 600))]
    pub request_timeout_secs: u64,

    /// Idle time between poll cycles in seconds (default: 60)
    #[serde(default = "default_poll_interval")]
    #[validate(range(min = 1))]
    pub poll_interval_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            request_timeout_secs: default_request_timeout(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

/// Configuration for the PostgreSQL store
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoreConfig {
    /// Connection URL; falls back to the DATABASE_URL environment variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Schema that holds the collection (default: "geographical_data")
    #[serde(default = "default_database")]
    #[validate(custom = "validate_identifier")]
    pub database: String,

    /// Table receiving the records (default: "earthquakes")
    #[serde(default = "default_collection")]
    #[validate(custom = "validate_identifier")]
    pub collection: String,

    /// Maximum pooled connections (default: 5)
    #[serde(default = "default_max_connections")]
    #[validate(range(min = 1, max = 100))]
    pub max_connections: u32,

    /// Seconds to wait for the store before giving up (default: 10)
    #[serde(default = "default_connect_timeout")]
    #[validate(range(min = 1, max = 300))]
    pub connect_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            database: default_database(),
            collection: default_collection(),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Base log level: trace, debug, info, warn or error (default: "info")
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_feed_url() -> String {
    feed::DEFAULT_FEED_URL.to_string()
}

fn default_request_timeout() -> u64 {
    feed::DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_poll_interval() -> u64 {
    time::DEFAULT_POLL_INTERVAL_SECS
}

fn default_database() -> String {
    database::DEFAULT_DATABASE.to_string()
}

fn default_collection() -> String {
    database::DEFAULT_COLLECTION.to_string()
}

fn default_max_connections() -> u32 {
    database::MAX_POOL_SIZE
}

fn default_connect_timeout() -> u64 {
    database::CONNECTION_TIMEOUT_SECS
}

fn default_log_level() -> String {
    logging::DEFAULT_LOG_LEVEL.to_string()
}

fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::new("feed url must be an absolute http(s) URL")),
    }
}

fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    if crate::database::is_valid_identifier(value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "must start with a letter or underscore, contain only letters, digits and underscores, and be at most 51 bytes",
        ))
    }
}

fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new(
            "level must be 'trace', 'debug', 'info', 'warn', or 'error'",
        )),
    }
}
