//! Builder for creating configuration objects programmatically
//!
//! Starts from the built-in defaults so callers only spell out what differs.

use super::models::*;

/// Builder for creating QuakefeedConfig objects with a fluent API
#[derive(Debug, Clone, Default)]
pub struct QuakefeedConfigBuilder {
    config: QuakefeedConfig,
}

impl QuakefeedConfigBuilder {
    /// Create a new builder seeded with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the upstream feed URL
    pub fn with_feed_url(mut self, url: impl Into<String>) -> Self {
        self.config.feed.url = url.into();
        self
    }

    /// Set the HTTP request timeout in seconds
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.config.feed.request_timeout_secs = secs;
        self
    }

    /// Set the idle time between poll cycles in seconds
    pub fn with_poll_interval(mut self, secs: u64) -> Self {
        self.config.feed.poll_interval_secs = secs;
        self
    }

    /// Set the store connection URL
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.config.store.database_url = Some(url.into());
        self
    }

    /// Set the schema name
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.config.store.database = database.into();
        self
    }

    /// Set the table name
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.config.store.collection = collection.into();
        self
    }

    /// Set the base log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Build the QuakefeedConfig
    pub fn build(self) -> QuakefeedConfig {
        self.config
    }
}
