use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use super::models::QuakeRecord;
use super::repository::{CollectionHandle, InsertOutcome, RecordStore, StoreError};

#[derive(Debug, Default)]
struct MemoryCollection {
    records: Vec<QuakeRecord>,
    indexes: BTreeSet<String>,
}

impl MemoryCollection {
    fn is_unique(&self, handle: &CollectionHandle) -> bool {
        self.indexes.contains(&handle.unique_index_name())
    }
}

/// Process-local record store used by dry runs.
///
/// Mirrors the PostgreSQL semantics: the key is only enforced once the
/// unique index has been created.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    collections: RwLock<HashMap<CollectionHandle, MemoryCollection>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of collections created so far
    pub fn collection_count(&self) -> usize {
        self.collections.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Snapshot of a collection's records in insertion order
    pub fn records(&self, handle: &CollectionHandle) -> Vec<QuakeRecord> {
        self.collections
            .read()
            .ok()
            .and_then(|c| c.get(handle).map(|col| col.records.clone()))
            .unwrap_or_default()
    }

    fn missing(handle: &CollectionHandle) -> StoreError {
        StoreError::MissingCollection(handle.to_string())
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::LockPoisoned
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn ensure_collection(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<(CollectionHandle, bool), StoreError> {
        let handle = CollectionHandle::new(database, collection)?;
        let mut collections = self.collections.write().map_err(poisoned)?;

        if collections.contains_key(&handle) {
            return Ok((handle, false));
        }
        collections.insert(handle.clone(), MemoryCollection::default());
        Ok((handle, true))
    }

    async fn ensure_unique_index(&self, handle: &CollectionHandle) -> Result<(), StoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        let collection = collections
            .get_mut(handle)
            .ok_or_else(|| Self::missing(handle))?;

        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = collection
            .records
            .iter()
            .find(|r| !seen.insert(r.usgs_id.as_str()))
        {
            return Err(StoreError::DuplicateKey(format!(
                "could not create unique index {}: key {} is duplicated",
                handle.unique_index_name(),
                dup.usgs_id
            )));
        }

        collection.indexes.insert(handle.unique_index_name());
        Ok(())
    }

    async fn insert_unordered(
        &self,
        handle: &CollectionHandle,
        records: &[QuakeRecord],
    ) -> Result<InsertOutcome, StoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        let collection = collections
            .get_mut(handle)
            .ok_or_else(|| Self::missing(handle))?;

        let unique = collection.is_unique(handle);
        let mut outcome = InsertOutcome {
            attempted: records.len(),
            ..Default::default()
        };

        for record in records {
            if unique
                && collection
                    .records
                    .iter()
                    .any(|r| r.usgs_id == record.usgs_id)
            {
                outcome.duplicates += 1;
                continue;
            }
            collection.records.push(record.clone());
            outcome.inserted += 1;
        }

        Ok(outcome)
    }

    async fn count(&self, handle: &CollectionHandle) -> Result<i64, StoreError> {
        let collections = self.collections.read().map_err(poisoned)?;
        collections
            .get(handle)
            .map(|c| c.records.len() as i64)
            .ok_or_else(|| Self::missing(handle))
    }

    async fn find_by_usgs_id(
        &self,
        handle: &CollectionHandle,
        usgs_id: &str,
    ) -> Result<Option<QuakeRecord>, StoreError> {
        let collections = self.collections.read().map_err(poisoned)?;
        let collection = collections
            .get(handle)
            .ok_or_else(|| Self::missing(handle))?;

        Ok(collection
            .records
            .iter()
            .find(|r| r.usgs_id == usgs_id)
            .cloned())
    }

    async fn list_indexes(&self, handle: &CollectionHandle) -> Result<Vec<String>, StoreError> {
        let collections = self.collections.read().map_err(poisoned)?;
        collections
            .get(handle)
            .map(|c| c.indexes.iter().cloned().collect())
            .ok_or_else(|| Self::missing(handle))
    }
}
