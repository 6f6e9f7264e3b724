//! Record persistence.
//!
//! Stores are keyed by [`RecordId`]. Ids derive from immutable transaction
//! data, so an upsert of an existing id rewrites identical content and the
//! store only ever grows.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::db::DbError;
use crate::records::{DecodedValue, EventKind, Record, RecordId};

pub use memory::MemoryStore;
pub use postgres::PgRecordStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt record row: {0}")]
    CorruptRow(String),

    #[error("Store lock poisoned")]
    LockPoisoned,

    #[error("Upsert key {key} does not match record id {record}")]
    IdMismatch { key: RecordId, record: RecordId },
}

/// Reject an upsert whose key is not the record's own id.
pub(crate) fn ensure_key_matches(key: &RecordId, record: &Record) -> Result<(), StoreError> {
    if *key != record.id {
        return Err(StoreError::IdMismatch {
            key: *key,
            record: record.id,
        });
    }
    Ok(())
}

/// Key-value persistence for records.
///
/// Implementations must accept concurrent upserts of distinct ids and make
/// every completed upsert visible to subsequent reads.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert the record, or overwrite the one already stored under `id`.
    ///
    /// `id` must equal `record.id`; a mismatch is [`StoreError::IdMismatch`]
    /// and nothing is written.
    async fn upsert(&self, id: &RecordId, record: &Record) -> Result<(), StoreError>;

    /// Upsert several records at once. Backends that can do so apply the
    /// batch atomically.
    async fn upsert_batch(&self, records: &[Record]) -> Result<(), StoreError> {
        for record in records {
            self.upsert(&record.id, record).await?;
        }
        Ok(())
    }

    async fn get(&self, id: &RecordId) -> Result<Option<Record>, StoreError>;

    /// Number of stored records of `kind`.
    async fn count(&self, kind: EventKind) -> Result<u64, StoreError>;

    /// Highest block number among stored records of `kind`, if any.
    async fn latest_block(&self, kind: EventKind) -> Result<Option<u64>, StoreError>;

    /// Value of one field of a stored record, metadata fields included.
    async fn field_of(&self, id: &RecordId, field: &str) -> Result<Option<DecodedValue>, StoreError> {
        Ok(self.get(id).await?.and_then(|record| record.field(field)))
    }
}
