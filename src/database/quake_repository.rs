use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use super::models::QuakeRecord;
use super::repository::{CollectionHandle, InsertOutcome, RecordStore, StoreError};
use crate::constants::database::BATCH_SIZE;

/// PostgreSQL-backed record store.
///
/// A "database" is a schema and a "collection" is a table inside it.
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Creates a new store over an established pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn collection_exists(&self, handle: &CollectionHandle) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM information_schema.tables
                WHERE table_schema = $1 AND table_name = $2
            )
            "#,
        )
        .bind(&handle.database)
        .bind(&handle.collection)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert_chunk(
        &self,
        handle: &CollectionHandle,
        chunk: &[QuakeRecord],
    ) -> Result<u64, StoreError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} (usgs_id, \"date\", \"time\", longitude, latitude, magnitude, place, event_url) ",
            handle.qualified_name()
        ));

        builder.push_values(chunk, |mut row, record| {
            row.push_bind(record.usgs_id.as_str())
                .push_bind(record.date.as_str())
                .push_bind(record.time.as_str())
                .push_bind(record.longitude)
                .push_bind(record.latitude)
                .push_bind(record.magnitude)
                .push_bind(record.place.as_deref())
                .push_bind(record.event_url.as_str());
        });
        // Conflicting rows are skipped, the first occurrence of a key wins
        builder.push(" ON CONFLICT (usgs_id) DO NOTHING");

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn ensure_collection(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<(CollectionHandle, bool), StoreError> {
        let handle = CollectionHandle::new(database, collection)?;

        if self.collection_exists(&handle).await? {
            debug!("Collection {} already exists", handle);
            return Ok((handle, false));
        }

        sqlx::query(&format!(
            "CREATE SCHEMA IF NOT EXISTS \"{}\"",
            handle.database
        ))
        .execute(&self.pool)
        .await?;

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                usgs_id TEXT NOT NULL,
                "date" TEXT NOT NULL,
                "time" TEXT NOT NULL,
                longitude DOUBLE PRECISION NOT NULL,
                latitude DOUBLE PRECISION NOT NULL,
                magnitude DOUBLE PRECISION,
                place TEXT,
                event_url TEXT NOT NULL,
                inserted_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            handle.qualified_name()
        ))
        .execute(&self.pool)
        .await?;

        info!("Created collection {}", handle);
        Ok((handle, true))
    }

    async fn ensure_unique_index(&self, handle: &CollectionHandle) -> Result<(), StoreError> {
        sqlx::query(&format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS \"{}\" ON {} (usgs_id)",
            handle.unique_index_name(),
            handle.qualified_name()
        ))
        .execute(&self.pool)
        .await?;

        debug!(
            "Unique index {} present on {}",
            handle.unique_index_name(),
            handle
        );
        Ok(())
    }

    async fn insert_unordered(
        &self,
        handle: &CollectionHandle,
        records: &[QuakeRecord],
    ) -> Result<InsertOutcome, StoreError> {
        let mut outcome = InsertOutcome::default();

        for chunk in records.chunks(BATCH_SIZE) {
            let inserted = self.insert_chunk(handle, chunk).await? as usize;
            outcome = outcome.merge(InsertOutcome {
                attempted: chunk.len(),
                inserted,
                duplicates: chunk.len() - inserted,
            });
        }

        Ok(outcome)
    }

    async fn count(&self, handle: &CollectionHandle) -> Result<i64, StoreError> {
        let count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", handle.qualified_name()))
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn find_by_usgs_id(
        &self,
        handle: &CollectionHandle,
        usgs_id: &str,
    ) -> Result<Option<QuakeRecord>, StoreError> {
        let record = sqlx::query_as::<_, QuakeRecord>(&format!(
            r#"
            SELECT
                usgs_id,
                "date",
                "time",
                longitude,
                latitude,
                magnitude,
                place,
                event_url
            FROM {}
            WHERE usgs_id = $1
            "#,
            handle.qualified_name()
        ))
        .bind(usgs_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_indexes(&self, handle: &CollectionHandle) -> Result<Vec<String>, StoreError> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT indexname::TEXT
            FROM pg_indexes
            WHERE schemaname = $1 AND tablename = $2
            ORDER BY indexname
            "#,
        )
        .bind(&handle.database)
        .bind(&handle.collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }
}
