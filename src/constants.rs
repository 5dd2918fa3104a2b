//! Application-wide constants
//!
//! Default values and limits used throughout the daemon, kept in one place
//! so they are easy to find and modify.

/// Upstream feed constants
pub mod feed {
    /// USGS event query endpoint returning GeoJSON
    pub const DEFAULT_FEED_URL: &str =
        "https://earthquake.usgs.gov/fdsnws/event/1/query?format=geojson";

    /// Default HTTP request timeout (in seconds)
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Upper bound accepted for the request timeout (in seconds)
    pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;
}

/// Time-related constants
pub mod time {
    /// Idle time between two poll cycles (in seconds)
    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

    /// Output format of the record `date` field
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Output format of the record `time` field
    pub const TIME_FORMAT: &str = "%H:%M:%S";
}

/// Database-related constants
pub mod database {
    /// Default schema holding the earthquake table
    pub const DEFAULT_DATABASE: &str = "geographical_data";

    /// Default table name for earthquake records
    pub const DEFAULT_COLLECTION: &str = "earthquakes";

    /// Field carrying the uniqueness constraint
    pub const UNIQUE_KEY_FIELD: &str = "usgs_id";

    /// Maximum number of records sent in a single INSERT statement
    pub const BATCH_SIZE: usize = 1000;

    /// Connection pool maximum size
    pub const MAX_POOL_SIZE: u32 = 5;

    /// Connection timeout (in seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 10;

    /// PostgreSQL limit on identifier length (in bytes)
    pub const MAX_IDENTIFIER_LENGTH: usize = 63;

    /// SQLSTATE reported for unique constraint violations
    pub const UNIQUE_VIOLATION_CODE: &str = "23505";
}

/// Logging constants
pub mod logging {
    /// Log level used when neither the config nor RUST_LOG sets one
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}
