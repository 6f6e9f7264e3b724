//! Event-to-record derivation.
//!
//! A [`DecodedEvent`] arrives from the event source with its parameters and
//! block metadata. [`Record::from_event`] combines the [`RecordId`] of the
//! log with the kind's mapped fields; the result is fully determined by the
//! event, so deriving it twice yields identical records.
//!
//! ```text
//! DecodedEvent ──► RecordId::for_log ─┐
//!       │                             ├──► Record ──► RecordStore::upsert
//!       └────────► map_fields ────────┘
//! ```

pub mod error;
pub mod id;
pub mod kind;
pub mod schema;
pub mod value;

use std::collections::{BTreeMap, HashMap};

use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};

pub use error::MappingError;
pub use id::RecordId;
pub use kind::EventKind;
pub use schema::{map_fields, FieldSpec, FieldType};
pub use value::DecodedValue;

/// Metadata fields every record carries regardless of kind.
pub const METADATA_FIELDS: [&str; 3] = ["blockNumber", "blockTimestamp", "transactionHash"];

/// A decoded contract event as delivered by the event source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedEvent {
    pub kind: EventKind,
    /// Decoded parameter values keyed by ABI parameter name.
    pub params: HashMap<String, DecodedValue>,
    pub transaction_hash: B256,
    pub log_index: u64,
    pub block_number: u64,
    pub block_timestamp: u64,
}

impl DecodedEvent {
    /// Get a parameter by name, returning an error if missing.
    pub fn get(&self, name: &str) -> Result<&DecodedValue, MappingError> {
        self.params
            .get(name)
            .ok_or_else(|| MappingError::MissingParam {
                kind: self.kind,
                param: name.to_string(),
            })
    }

    /// Try to get a parameter by name.
    pub fn try_get(&self, name: &str) -> Option<&DecodedValue> {
        self.params.get(name)
    }

    /// Position of this log in the chain, for ordering checks.
    pub fn position(&self) -> (u64, u64) {
        (self.block_number, self.log_index)
    }
}

/// The immutable, stored form of one event occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub kind: EventKind,
    /// Exactly the fields declared for `kind`.
    pub fields: BTreeMap<String, DecodedValue>,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: B256,
}

impl Record {
    /// Derive the record for an event. Nothing is produced unless every
    /// field of the kind can be filled.
    pub fn from_event(event: &DecodedEvent) -> Result<Self, MappingError> {
        let id = RecordId::for_log(event.transaction_hash, event.log_index)?;
        let fields = map_fields(event.kind, &event.params)?;

        Ok(Self {
            id,
            kind: event.kind,
            fields,
            block_number: event.block_number,
            block_timestamp: event.block_timestamp,
            transaction_hash: event.transaction_hash,
        })
    }

    /// Look up a field by name, including `id` and the block metadata.
    pub fn field(&self, name: &str) -> Option<DecodedValue> {
        match name {
            "id" => Some(DecodedValue::Bytes(self.id.as_bytes().to_vec().into())),
            "blockNumber" => Some(DecodedValue::Uint256(U256::from(self.block_number))),
            "blockTimestamp" => Some(DecodedValue::Uint256(U256::from(self.block_timestamp))),
            "transactionHash" => Some(DecodedValue::Bytes32(self.transaction_hash)),
            _ => self.fields.get(name).cloned(),
        }
    }
}
