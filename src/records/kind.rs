use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::MappingError;

/// Every contract event the indexer materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    // DelegatorFactory
    DelegatorCreated,
    OwnershipTransferred,
    RewardAdded,
    RewardPaid,
    RewardsDurationUpdated,
    Staked,
    WaitTimeUpdated,
    Withdrawn,
    // GovernorAlpha
    ProposalCanceled,
    ProposalCreated,
    ProposalExecuted,
    ProposalQueued,
    VoteCast,
}

impl EventKind {
    pub const ALL: [EventKind; 13] = [
        EventKind::DelegatorCreated,
        EventKind::OwnershipTransferred,
        EventKind::RewardAdded,
        EventKind::RewardPaid,
        EventKind::RewardsDurationUpdated,
        EventKind::Staked,
        EventKind::WaitTimeUpdated,
        EventKind::Withdrawn,
        EventKind::ProposalCanceled,
        EventKind::ProposalCreated,
        EventKind::ProposalExecuted,
        EventKind::ProposalQueued,
        EventKind::VoteCast,
    ];

    /// Event name as it appears in the contract ABI.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::DelegatorCreated => "DelegatorCreated",
            EventKind::OwnershipTransferred => "OwnershipTransferred",
            EventKind::RewardAdded => "RewardAdded",
            EventKind::RewardPaid => "RewardPaid",
            EventKind::RewardsDurationUpdated => "RewardsDurationUpdated",
            EventKind::Staked => "Staked",
            EventKind::WaitTimeUpdated => "WaitTimeUpdated",
            EventKind::Withdrawn => "Withdrawn",
            EventKind::ProposalCanceled => "ProposalCanceled",
            EventKind::ProposalCreated => "ProposalCreated",
            EventKind::ProposalExecuted => "ProposalExecuted",
            EventKind::ProposalQueued => "ProposalQueued",
            EventKind::VoteCast => "VoteCast",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| MappingError::UnknownKind(s.to_string()))
    }
}
