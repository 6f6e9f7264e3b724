//! Materializes DelegatorFactory and GovernorAlpha contract events into a
//! durable record store, one immutable record per event occurrence.

pub mod db;
pub mod ingest;
pub mod records;
pub mod store;
pub mod transformations;
pub mod types;

#[cfg(test)]
mod testing;

pub use records::{DecodedEvent, DecodedValue, EventKind, MappingError, Record, RecordId};
pub use store::{MemoryStore, PgRecordStore, RecordStore, StoreError};
pub use transformations::{handle_batch, handle_event, IndexError};
