use async_trait::async_trait;
use thiserror::Error;

use super::models::QuakeRecord;
use crate::constants::database::{MAX_IDENTIFIER_LENGTH, UNIQUE_VIOLATION_CODE};

/// Errors reported by a record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store at {url} is unreachable: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Invalid identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("Collection {0} does not exist")]
    MissingCollection(String),

    #[error("In-memory store lock poisoned")]
    LockPoisoned,

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    /// True for the expected outcome of re-inserting a known record
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION_CODE) {
                return StoreError::DuplicateKey(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

/// Resolved location of the records inside the store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionHandle {
    pub database: String,
    pub collection: String,
}

impl CollectionHandle {
    /// Validates both names before building the handle
    pub fn new(database: &str, collection: &str) -> Result<Self, StoreError> {
        for name in [database, collection] {
            if !is_valid_identifier(name) {
                return Err(StoreError::InvalidIdentifier(name.to_string()));
            }
        }
        Ok(Self {
            database: database.to_string(),
            collection: collection.to_string(),
        })
    }

    /// Schema-qualified, quoted table name for SQL
    pub fn qualified_name(&self) -> String {
        format!("\"{}\".\"{}\"", self.database, self.collection)
    }

    /// Name of the unique index on the key field
    pub fn unique_index_name(&self) -> String {
        format!("{}_usgs_id_key", self.collection)
    }
}

impl std::fmt::Display for CollectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.database, self.collection)
    }
}

/// Accepts names that are safe to splice into SQL once quoted
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    // Leaves room for the "_usgs_id_key" index suffix
    let fits = name.len() + "_usgs_id_key".len() <= MAX_IDENTIFIER_LENGTH;
    starts_ok && fits && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Result of one unordered bulk insert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertOutcome {
    pub attempted: usize,
    pub inserted: usize,
    pub duplicates: usize,
}

impl InsertOutcome {
    pub fn merge(self, other: InsertOutcome) -> InsertOutcome {
        InsertOutcome {
            attempted: self.attempted + other.attempted,
            inserted: self.inserted + other.inserted,
            duplicates: self.duplicates + other.duplicates,
        }
    }
}

/// Storage backend for earthquake records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Creates the collection if it does not exist yet.
    /// Returns the handle and whether this call created it.
    async fn ensure_collection(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<(CollectionHandle, bool), StoreError>;

    /// Establishes the uniqueness constraint on `usgs_id`; re-running is a no-op
    async fn ensure_unique_index(&self, handle: &CollectionHandle) -> Result<(), StoreError>;

    /// Inserts all records, skipping those whose key already exists.
    /// A conflicting record never prevents its neighbours from being written.
    async fn insert_unordered(
        &self,
        handle: &CollectionHandle,
        records: &[QuakeRecord],
    ) -> Result<InsertOutcome, StoreError>;

    /// Number of stored records
    async fn count(&self, handle: &CollectionHandle) -> Result<i64, StoreError>;

    /// Looks up a record by its natural key
    async fn find_by_usgs_id(
        &self,
        handle: &CollectionHandle,
        usgs_id: &str,
    ) -> Result<Option<QuakeRecord>, StoreError>;

    /// Names of the indexes defined on the collection, sorted
    async fn list_indexes(&self, handle: &CollectionHandle) -> Result<Vec<String>, StoreError>;
}
