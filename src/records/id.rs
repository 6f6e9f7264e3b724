//! Record identifiers.
//!
//! A record id is the originating transaction hash with the little-endian
//! 4-byte encoding of the log index appended. Downstream consumers key on
//! these exact bytes, so the layout must not change.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{FixedBytes, B256};
use serde::{Deserialize, Serialize};

use super::error::MappingError;

/// Globally unique, deterministic identifier of one event occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(FixedBytes<36>);

impl RecordId {
    /// Encoded length: 32-byte transaction hash + 4-byte log index.
    pub const LEN: usize = 36;

    /// Build the id for the log at `log_index` within transaction `tx_hash`.
    pub fn new(tx_hash: B256, log_index: u32) -> Self {
        let mut bytes = [0u8; Self::LEN];
        bytes[..32].copy_from_slice(tx_hash.as_slice());
        bytes[32..].copy_from_slice(&log_index.to_le_bytes());
        Self(FixedBytes(bytes))
    }

    /// Build the id from a log index as delivered by the chain.
    ///
    /// Indices beyond 32 bits are rejected instead of wrapping.
    pub fn for_log(tx_hash: B256, log_index: u64) -> Result<Self, MappingError> {
        let log_index =
            u32::try_from(log_index).map_err(|_| MappingError::LogIndexOutOfRange(log_index))?;
        Ok(Self::new(tx_hash, log_index))
    }

    /// Rebuild an id from its raw encoding (e.g. a database row).
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; Self::LEN] = bytes.try_into().ok()?;
        Some(Self(FixedBytes(bytes)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn transaction_hash(&self) -> B256 {
        B256::from_slice(&self.0[..32])
    }

    pub fn log_index(&self) -> u32 {
        let mut le = [0u8; 4];
        le.copy_from_slice(&self.0[32..]);
        u32::from_le_bytes(le)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for RecordId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(FixedBytes(bytes)))
    }
}
