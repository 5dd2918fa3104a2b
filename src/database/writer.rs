use tracing::{debug, error};

use super::models::QuakeRecord;
use super::repository::{CollectionHandle, InsertOutcome, RecordStore, StoreError};

/// Writes one poll cycle's records with upsert-by-constraint semantics.
///
/// Duplicate-key rejections are expected and swallowed. Every other store
/// failure is logged and returned so the caller can decide how to proceed.
pub async fn write_records(
    store: &dyn RecordStore,
    handle: &CollectionHandle,
    records: &[QuakeRecord],
) -> Result<InsertOutcome, StoreError> {
    if records.is_empty() {
        debug!("No records to write to {}", handle);
        return Ok(InsertOutcome::default());
    }

    match store.insert_unordered(handle, records).await {
        Ok(outcome) => {
            debug!(
                "Wrote {} of {} records to {} ({} already present)",
                outcome.inserted, outcome.attempted, handle, outcome.duplicates
            );
            Ok(outcome)
        }
        Err(e) if e.is_duplicate_key() => {
            // The backend rejected the batch without reporting counts, so
            // every record is counted as already present
            debug!("Ignoring duplicate-key rejection on {}: {}", handle, e);
            Ok(InsertOutcome {
                attempted: records.len(),
                inserted: 0,
                duplicates: records.len(),
            })
        }
        Err(e) => {
            error!(
                "Unexpected write failure on {} for {} records: {}",
                handle,
                records.len(),
                e
            );
            Err(e)
        }
    }
}
