pub mod connection;
pub mod initializer;
pub mod memory;
pub mod models;
pub mod quake_repository;
pub mod repository;
pub mod writer;


pub use connection::{establish_connection, mask_database_url, DatabasePool};
pub use initializer::{ensure_collection, prepare_store};
pub use memory::InMemoryRecordStore;
pub use quake_repository::PgRecordStore;
pub use repository::{
    is_valid_identifier, CollectionHandle, InsertOutcome, RecordStore, StoreError,
};
pub use writer::write_records;
