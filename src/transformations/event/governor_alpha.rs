//! Handlers for GovernorAlpha events.

use crate::records::{DecodedEvent, EventKind};
use crate::store::RecordStore;
use crate::transformations::error::IndexError;
use crate::transformations::handle_kind;

pub async fn handle_proposal_canceled<S: RecordStore + ?Sized>(
    store: &S,
    event: &DecodedEvent,
) -> Result<(), IndexError> {
    handle_kind(EventKind::ProposalCanceled, store, event).await
}

pub async fn handle_proposal_created<S: RecordStore + ?Sized>(
    store: &S,
    event: &DecodedEvent,
) -> Result<(), IndexError> {
    handle_kind(EventKind::ProposalCreated, store, event).await
}

pub async fn handle_proposal_executed<S: RecordStore + ?Sized>(
    store: &S,
    event: &DecodedEvent,
) -> Result<(), IndexError> {
    handle_kind(EventKind::ProposalExecuted, store, event).await
}

pub async fn handle_proposal_queued<S: RecordStore + ?Sized>(
    store: &S,
    event: &DecodedEvent,
) -> Result<(), IndexError> {
    handle_kind(EventKind::ProposalQueued, store, event).await
}

pub async fn handle_vote_cast<S: RecordStore + ?Sized>(
    store: &S,
    event: &DecodedEvent,
) -> Result<(), IndexError> {
    handle_kind(EventKind::VoteCast, store, event).await
}
