use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use std::time::Duration;
use tracing::info;

use super::repository::StoreError;
use crate::config::models::StoreConfig;

pub type DatabasePool = Pool<Postgres>;

/// Establishes a connection pool to the PostgreSQL store.
///
/// Fails fast with [`StoreError::Unreachable`] when no connection can be
/// opened within the configured timeout.
pub async fn establish_connection(
    database_url: &str,
    config: &StoreConfig,
) -> Result<DatabasePool, StoreError> {
    let masked = mask_database_url(database_url);
    info!("Connecting to PostgreSQL store at {}", masked);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(database_url)
        .await
        .map_err(|source| StoreError::Unreachable {
            url: masked.clone(),
            source,
        })?;

    info!("Successfully connected to PostgreSQL store");

    Ok(pool)
}

/// Hides credentials so the URL can be logged
pub fn mask_database_url(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (scheme, rest),
        None => return "***".to_string(),
    };

    match rest.rsplit_once('@') {
        Some((_, host_and_db)) => format!("{scheme}://***@{host_and_db}"),
        None => format!("{scheme}://{rest}"),
    }
}
