//! Handlers for DelegatorFactory events.

use crate::records::{DecodedEvent, EventKind};
use crate::store::RecordStore;
use crate::transformations::error::IndexError;
use crate::transformations::handle_kind;

pub async fn handle_delegator_created<S: RecordStore + ?Sized>(
    store: &S,
    event: &DecodedEvent,
) -> Result<(), IndexError> {
    handle_kind(EventKind::DelegatorCreated, store, event).await
}

pub async fn handle_ownership_transferred<S: RecordStore + ?Sized>(
    store: &S,
    event: &DecodedEvent,
) -> Result<(), IndexError> {
    handle_kind(EventKind::OwnershipTransferred, store, event).await
}

pub async fn handle_reward_added<S: RecordStore + ?Sized>(
    store: &S,
    event: &DecodedEvent,
) -> Result<(), IndexError> {
    handle_kind(EventKind::RewardAdded, store, event).await
}

pub async fn handle_reward_paid<S: RecordStore + ?Sized>(
    store: &S,
    event: &DecodedEvent,
) -> Result<(), IndexError> {
    handle_kind(EventKind::RewardPaid, store, event).await
}

pub async fn handle_rewards_duration_updated<S: RecordStore + ?Sized>(
    store: &S,
    event: &DecodedEvent,
) -> Result<(), IndexError> {
    handle_kind(EventKind::RewardsDurationUpdated, store, event).await
}

pub async fn handle_staked<S: RecordStore + ?Sized>(
    store: &S,
    event: &DecodedEvent,
) -> Result<(), IndexError> {
    handle_kind(EventKind::Staked, store, event).await
}

pub async fn handle_wait_time_updated<S: RecordStore + ?Sized>(
    store: &S,
    event: &DecodedEvent,
) -> Result<(), IndexError> {
    handle_kind(EventKind::WaitTimeUpdated, store, event).await
}

pub async fn handle_withdrawn<S: RecordStore + ?Sized>(
    store: &S,
    event: &DecodedEvent,
) -> Result<(), IndexError> {
    handle_kind(EventKind::Withdrawn, store, event).await
}
