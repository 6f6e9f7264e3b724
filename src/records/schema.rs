//! Field schema for each event kind and the mapping from event parameters
//! to record fields.

use std::collections::{BTreeMap, HashMap};

use super::error::MappingError;
use super::kind::EventKind;
use super::value::DecodedValue;

/// Semantic type a record field must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Address,
    Uint,
    Bool,
    String,
}

impl FieldType {
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Address => "address",
            FieldType::Uint => "uint256",
            FieldType::Bool => "bool",
            FieldType::String => "string",
        }
    }

    pub fn accepts(self, value: &DecodedValue) -> bool {
        matches!(
            (self, value),
            (FieldType::Address, DecodedValue::Address(_))
                | (FieldType::Uint, DecodedValue::Uint256(_))
                | (FieldType::Bool, DecodedValue::Bool(_))
                | (FieldType::String, DecodedValue::String(_))
        )
    }
}

/// One record field and the event parameter it is copied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name on the record.
    pub name: &'static str,
    /// Parameter name in the event ABI.
    pub param: &'static str,
    pub ty: FieldType,
}

const fn field(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec {
        name,
        param: name,
        ty,
    }
}

/// GovernorAlpha names the proposal id parameter `id`.
const PROPOSAL_ID: FieldSpec = FieldSpec {
    name: "proposalId",
    param: "id",
    ty: FieldType::Uint,
};

const DELEGATOR_CREATED: &[FieldSpec] = &[
    field("delegator", FieldType::Address),
    field("delegatee", FieldType::Address),
];

const OWNERSHIP_TRANSFERRED: &[FieldSpec] = &[
    field("previousOwner", FieldType::Address),
    field("newOwner", FieldType::Address),
];

const REWARD_ADDED: &[FieldSpec] = &[field("reward", FieldType::Uint)];

const REWARD_PAID: &[FieldSpec] = &[
    field("user", FieldType::Address),
    field("reward", FieldType::Uint),
];

const REWARDS_DURATION_UPDATED: &[FieldSpec] = &[field("newDuration", FieldType::Uint)];

// Staked and Withdrawn share a layout.
const STAKE_MOVEMENT: &[FieldSpec] = &[
    field("delegator", FieldType::Address),
    field("delegatee", FieldType::Address),
    field("amount", FieldType::Uint),
];

const WAIT_TIME_UPDATED: &[FieldSpec] = &[field("waitTime", FieldType::Uint)];

const PROPOSAL_ONLY: &[FieldSpec] = &[PROPOSAL_ID];

const PROPOSAL_CREATED: &[FieldSpec] = &[
    PROPOSAL_ID,
    field("proposer", FieldType::Address),
    field("startBlock", FieldType::Uint),
    field("endBlock", FieldType::Uint),
    field("description", FieldType::String),
];

const PROPOSAL_QUEUED: &[FieldSpec] = &[PROPOSAL_ID, field("eta", FieldType::Uint)];

const VOTE_CAST: &[FieldSpec] = &[
    field("voter", FieldType::Address),
    field("proposalId", FieldType::Uint),
    field("support", FieldType::Bool),
    field("votes", FieldType::Uint),
];

impl EventKind {
    /// Fields a record of this kind carries, besides id and block metadata.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            EventKind::DelegatorCreated => DELEGATOR_CREATED,
            EventKind::OwnershipTransferred => OWNERSHIP_TRANSFERRED,
            EventKind::RewardAdded => REWARD_ADDED,
            EventKind::RewardPaid => REWARD_PAID,
            EventKind::RewardsDurationUpdated => REWARDS_DURATION_UPDATED,
            EventKind::Staked | EventKind::Withdrawn => STAKE_MOVEMENT,
            EventKind::WaitTimeUpdated => WAIT_TIME_UPDATED,
            EventKind::ProposalCanceled | EventKind::ProposalExecuted => PROPOSAL_ONLY,
            EventKind::ProposalCreated => PROPOSAL_CREATED,
            EventKind::ProposalQueued => PROPOSAL_QUEUED,
            EventKind::VoteCast => VOTE_CAST,
        }
    }
}

/// Copy the parameters of a `kind` event into its record fields.
///
/// Every declared field is filled verbatim or the whole mapping fails;
/// parameters outside the schema are ignored.
pub fn map_fields(
    kind: EventKind,
    params: &HashMap<String, DecodedValue>,
) -> Result<BTreeMap<String, DecodedValue>, MappingError> {
    let specs = kind.fields();
    let mut fields = BTreeMap::new();

    for spec in specs {
        let value = params
            .get(spec.param)
            .ok_or_else(|| MappingError::MissingParam {
                kind,
                param: spec.param.to_string(),
            })?;

        if !spec.ty.accepts(value) {
            return Err(MappingError::TypeMismatch {
                kind,
                param: spec.param.to_string(),
                expected: spec.ty.name(),
                found: value.type_name(),
            });
        }

        fields.insert(spec.name.to_string(), value.clone());
    }

    Ok(fields)
}
