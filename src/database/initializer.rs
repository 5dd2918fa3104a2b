use tracing::info;

use super::repository::{CollectionHandle, RecordStore, StoreError};
use crate::config::models::StoreConfig;

/// Makes sure `database.collection` exists, creating it only when absent.
///
/// Safe to call on every start regardless of prior state.
pub async fn ensure_collection(
    store: &dyn RecordStore,
    database: &str,
    collection: &str,
) -> Result<CollectionHandle, StoreError> {
    let (handle, created) = store.ensure_collection(database, collection).await?;

    if created {
        info!("Initialized new collection {}", handle);
    } else {
        info!("Using existing collection {}", handle);
    }

    Ok(handle)
}

/// Startup sequence: ensure the collection, then the unique key on `usgs_id`
pub async fn prepare_store(
    store: &dyn RecordStore,
    config: &StoreConfig,
) -> Result<CollectionHandle, StoreError> {
    let handle = ensure_collection(store, &config.database, &config.collection).await?;
    store.ensure_unique_index(&handle).await?;
    info!(
        "Unique constraint {} ready on {}",
        handle.unique_index_name(),
        handle
    );
    Ok(handle)
}
