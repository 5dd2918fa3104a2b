//! Mock implementations for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::database::models::QuakeRecord;
use crate::database::{
    CollectionHandle, InMemoryRecordStore, InsertOutcome, RecordStore, StoreError,
};

/// How a mock store fails its inserts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertFailure {
    /// Reject the batch as a unique-key violation
    DuplicateKey,
    /// Fail the batch as if the connection dropped
    ConnectionLost,
}

/// Record store that delegates to memory but can fail inserts on demand
#[derive(Debug, Default)]
pub struct MockRecordStore {
    inner: InMemoryRecordStore,
    failure: Option<InsertFailure>,
    insert_calls: AtomicUsize,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_with(failure: InsertFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Default::default()
        }
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn records(&self, handle: &CollectionHandle) -> Vec<QuakeRecord> {
        self.inner.records(handle)
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn ensure_collection(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<(CollectionHandle, bool), StoreError> {
        self.inner.ensure_collection(database, collection).await
    }

    async fn ensure_unique_index(&self, handle: &CollectionHandle) -> Result<(), StoreError> {
        self.inner.ensure_unique_index(handle).await
    }

    async fn insert_unordered(
        &self,
        handle: &CollectionHandle,
        records: &[QuakeRecord],
    ) -> Result<InsertOutcome, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(InsertFailure::DuplicateKey) => Err(StoreError::DuplicateKey(
                "duplicate key value violates unique constraint".to_string(),
            )),
            Some(InsertFailure::ConnectionLost) => Err(StoreError::Database(sqlx::Error::PoolClosed)),
            None => self.inner.insert_unordered(handle, records).await,
        }
    }

    async fn count(&self, handle: &CollectionHandle) -> Result<i64, StoreError> {
        self.inner.count(handle).await
    }

    async fn find_by_usgs_id(
        &self,
        handle: &CollectionHandle,
        usgs_id: &str,
    ) -> Result<Option<QuakeRecord>, StoreError> {
        self.inner.find_by_usgs_id(handle, usgs_id).await
    }

    async fn list_indexes(&self, handle: &CollectionHandle) -> Result<Vec<String>, StoreError> {
        self.inner.list_indexes(handle).await
    }
}

/// Mock HTTP server serving feed documents
pub struct MockFeedServer {
    server: mockito::ServerGuard,
}

impl MockFeedServer {
    pub async fn new() -> Self {
        Self {
            server: mockito::Server::new_async().await,
        }
    }

    /// Serves `body` as JSON on GET `path`, expecting `hits` requests
    pub async fn mock_json(
        &mut self,
        path: &str,
        body: &serde_json::Value,
        hits: usize,
    ) -> mockito::Mock {
        self.server
            .mock("GET", path)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(hits)
            .create_async()
            .await
    }

    /// Answers GET `path` with a bare status code
    pub async fn mock_status(&mut self, path: &str, status: usize) -> mockito::Mock {
        self.server
            .mock("GET", path)
            .with_status(status)
            .create_async()
            .await
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.server.url(), path)
    }
}
