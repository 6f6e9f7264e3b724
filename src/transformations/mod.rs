//! Event handlers.
//!
//! Each contract event has one `handle_*` entry point whose only observable
//! effect is a single [`RecordStore::upsert`]. The store is passed in
//! explicitly rather than held as ambient state.
//!
//! ```text
//! DecodedEvent ──► handle_<kind> ──► Record::from_event ──► RecordStore::upsert
//!                        │
//!                        └─ rejects events of another kind
//! ```
//!
//! # Example
//!
//! ```no_run
//! use delegator_indexer::records::DecodedEvent;
//! use delegator_indexer::store::MemoryStore;
//! use delegator_indexer::transformations::{handle_event, IndexError};
//!
//! async fn index(events: &[DecodedEvent]) -> Result<(), IndexError> {
//!     let store = MemoryStore::new();
//!     for event in events {
//!         handle_event(&store, event).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod event;

pub use error::IndexError;
pub use event::delegator_factory::{
    handle_delegator_created, handle_ownership_transferred, handle_reward_added,
    handle_reward_paid, handle_rewards_duration_updated, handle_staked, handle_wait_time_updated,
    handle_withdrawn,
};
pub use event::governor_alpha::{
    handle_proposal_canceled, handle_proposal_created, handle_proposal_executed,
    handle_proposal_queued, handle_vote_cast,
};

use crate::records::{DecodedEvent, EventKind, MappingError, Record, RecordId};
use crate::store::RecordStore;

/// Derive and store the record for any event, dispatching on its kind.
pub async fn handle_event<S>(store: &S, event: &DecodedEvent) -> Result<RecordId, IndexError>
where
    S: RecordStore + ?Sized,
{
    let record = Record::from_event(event)?;

    store.upsert(&record.id, &record).await?;

    tracing::debug!(
        kind = %record.kind,
        id = %record.id,
        block = record.block_number,
        "Stored record"
    );

    Ok(record.id)
}

/// Derive every record of the batch, then store them together.
///
/// A mapping failure anywhere aborts the batch before anything is written.
pub async fn handle_batch<S>(store: &S, events: &[DecodedEvent]) -> Result<usize, IndexError>
where
    S: RecordStore + ?Sized,
{
    if events.is_empty() {
        return Ok(0);
    }

    let records = events
        .iter()
        .map(Record::from_event)
        .collect::<Result<Vec<_>, _>>()?;

    store.upsert_batch(&records).await?;

    tracing::debug!(
        records = records.len(),
        first_block = records[0].block_number,
        last_block = records[records.len() - 1].block_number,
        "Stored record batch"
    );

    Ok(records.len())
}

pub(crate) async fn handle_kind<S>(
    expected: EventKind,
    store: &S,
    event: &DecodedEvent,
) -> Result<(), IndexError>
where
    S: RecordStore + ?Sized,
{
    if event.kind != expected {
        return Err(MappingError::KindMismatch {
            expected,
            found: event.kind,
        }
        .into());
    }

    handle_event(store, event).await.map(|_| ())
}
