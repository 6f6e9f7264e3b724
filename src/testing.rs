//! Builders for synthetic events used across the unit tests.
//!
//! Every event shares the same default transaction hash, log index 1 and
//! block 1, so two events of different kinds built here collide on id; use
//! [`with_log`] to place an event elsewhere.

use std::collections::HashMap;
use std::str::FromStr;

use alloy_primitives::{Address, B256, U256};

use crate::records::{DecodedEvent, DecodedValue, EventKind};

pub const DEFAULT_TX_HASH: &str =
    "0xa16081f360e3847006db660bae1c6d1b2e17ec2a000000000000000000000000";
pub const DEFAULT_BLOCK_NUMBER: u64 = 1;
pub const DEFAULT_BLOCK_TIMESTAMP: u64 = 1;
pub const DEFAULT_LOG_INDEX: u64 = 1;

pub fn default_tx_hash() -> B256 {
    B256::from_str(DEFAULT_TX_HASH).unwrap()
}

pub fn new_mock_event(kind: EventKind, params: Vec<(&str, DecodedValue)>) -> DecodedEvent {
    DecodedEvent {
        kind,
        params: params
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect::<HashMap<_, _>>(),
        transaction_hash: default_tx_hash(),
        log_index: DEFAULT_LOG_INDEX,
        block_number: DEFAULT_BLOCK_NUMBER,
        block_timestamp: DEFAULT_BLOCK_TIMESTAMP,
    }
}

/// Move an event to another transaction/log position.
pub fn with_log(mut event: DecodedEvent, tx_last_byte: u8, log_index: u64) -> DecodedEvent {
    event.transaction_hash = B256::with_last_byte(tx_last_byte);
    event.log_index = log_index;
    event
}

/// A well-formed event of any kind with small placeholder values.
pub fn mock_event(kind: EventKind) -> DecodedEvent {
    let one = Address::with_last_byte(1);
    let two = Address::with_last_byte(2);
    match kind {
        EventKind::DelegatorCreated => create_delegator_created_event(one, two),
        EventKind::OwnershipTransferred => create_ownership_transferred_event(one, two),
        EventKind::RewardAdded => create_reward_added_event(U256::from(1_000u64)),
        EventKind::RewardPaid => create_reward_paid_event(one, U256::from(25u64)),
        EventKind::RewardsDurationUpdated => {
            create_rewards_duration_updated_event(U256::from(604_800u64))
        }
        EventKind::Staked => create_staked_event(one, two, U256::from(100u64)),
        EventKind::WaitTimeUpdated => create_wait_time_updated_event(U256::from(86_400u64)),
        EventKind::Withdrawn => create_withdrawn_event(one, two, U256::from(40u64)),
        EventKind::ProposalCanceled => create_proposal_canceled_event(U256::from(234u64)),
        EventKind::ProposalCreated => create_proposal_created_event(
            U256::from(1u64),
            one,
            U256::from(10u64),
            U256::from(20u64),
            "Test proposal",
        ),
        EventKind::ProposalExecuted => create_proposal_executed_event(U256::from(2u64)),
        EventKind::ProposalQueued => {
            create_proposal_queued_event(U256::from(3u64), U256::from(1_700_000_000u64))
        }
        EventKind::VoteCast => {
            create_vote_cast_event(one, U256::from(4u64), true, U256::from(1_000_000u64))
        }
    }
}

pub fn create_delegator_created_event(delegator: Address, delegatee: Address) -> DecodedEvent {
    new_mock_event(
        EventKind::DelegatorCreated,
        vec![("delegator", delegator.into()), ("delegatee", delegatee.into())],
    )
}

pub fn create_ownership_transferred_event(
    previous_owner: Address,
    new_owner: Address,
) -> DecodedEvent {
    new_mock_event(
        EventKind::OwnershipTransferred,
        vec![
            ("previousOwner", previous_owner.into()),
            ("newOwner", new_owner.into()),
        ],
    )
}

pub fn create_reward_added_event(reward: U256) -> DecodedEvent {
    new_mock_event(EventKind::RewardAdded, vec![("reward", reward.into())])
}

pub fn create_reward_paid_event(user: Address, reward: U256) -> DecodedEvent {
    new_mock_event(
        EventKind::RewardPaid,
        vec![("user", user.into()), ("reward", reward.into())],
    )
}

pub fn create_rewards_duration_updated_event(new_duration: U256) -> DecodedEvent {
    new_mock_event(
        EventKind::RewardsDurationUpdated,
        vec![("newDuration", new_duration.into())],
    )
}

pub fn create_staked_event(delegator: Address, delegatee: Address, amount: U256) -> DecodedEvent {
    new_mock_event(
        EventKind::Staked,
        vec![
            ("delegator", delegator.into()),
            ("delegatee", delegatee.into()),
            ("amount", amount.into()),
        ],
    )
}

pub fn create_wait_time_updated_event(wait_time: U256) -> DecodedEvent {
    new_mock_event(EventKind::WaitTimeUpdated, vec![("waitTime", wait_time.into())])
}

pub fn create_withdrawn_event(delegator: Address, delegatee: Address, amount: U256) -> DecodedEvent {
    new_mock_event(
        EventKind::Withdrawn,
        vec![
            ("delegator", delegator.into()),
            ("delegatee", delegatee.into()),
            ("amount", amount.into()),
        ],
    )
}

pub fn create_proposal_canceled_event(id: U256) -> DecodedEvent {
    new_mock_event(EventKind::ProposalCanceled, vec![("id", id.into())])
}

pub fn create_proposal_created_event(
    id: U256,
    proposer: Address,
    start_block: U256,
    end_block: U256,
    description: &str,
) -> DecodedEvent {
    new_mock_event(
        EventKind::ProposalCreated,
        vec![
            ("id", id.into()),
            ("proposer", proposer.into()),
            ("startBlock", start_block.into()),
            ("endBlock", end_block.into()),
            ("description", description.into()),
        ],
    )
}

pub fn create_proposal_executed_event(id: U256) -> DecodedEvent {
    new_mock_event(EventKind::ProposalExecuted, vec![("id", id.into())])
}

pub fn create_proposal_queued_event(id: U256, eta: U256) -> DecodedEvent {
    new_mock_event(
        EventKind::ProposalQueued,
        vec![("id", id.into()), ("eta", eta.into())],
    )
}

pub fn create_vote_cast_event(
    voter: Address,
    proposal_id: U256,
    support: bool,
    votes: U256,
) -> DecodedEvent {
    new_mock_event(
        EventKind::VoteCast,
        vec![
            ("voter", voter.into()),
            ("proposalId", proposal_id.into()),
            ("support", support.into()),
            ("votes", votes.into()),
        ],
    )
}
