//! Typed values carried by event parameters and record fields.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// A decoded value from an event parameter, stored verbatim as a record field.
///
/// Unsigned integers of every width collapse into `Uint256` so large
/// amounts keep arbitrary precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DecodedValue {
    Address(Address),
    Uint256(U256),
    Bool(bool),
    Bytes32(B256),
    Bytes(Bytes),
    String(String),
}

impl DecodedValue {
    /// Short name of the semantic type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            DecodedValue::Address(_) => "address",
            DecodedValue::Uint256(_) => "uint256",
            DecodedValue::Bool(_) => "bool",
            DecodedValue::Bytes32(_) => "bytes32",
            DecodedValue::Bytes(_) => "bytes",
            DecodedValue::String(_) => "string",
        }
    }

    /// Render the value the way verification tooling compares it:
    /// lowercase 0x-hex for addresses and byte strings, decimal for
    /// integers, `true`/`false` for booleans.
    pub fn render(&self) -> String {
        match self {
            DecodedValue::Address(a) => format!("0x{}", hex::encode(a)),
            DecodedValue::Uint256(v) => v.to_string(),
            DecodedValue::Bool(v) => v.to_string(),
            DecodedValue::Bytes32(b) => format!("0x{}", hex::encode(b)),
            DecodedValue::Bytes(b) => format!("0x{}", hex::encode(b)),
            DecodedValue::String(s) => s.clone(),
        }
    }
}

impl From<Address> for DecodedValue {
    fn from(value: Address) -> Self {
        DecodedValue::Address(value)
    }
}

impl From<U256> for DecodedValue {
    fn from(value: U256) -> Self {
        DecodedValue::Uint256(value)
    }
}

impl From<u64> for DecodedValue {
    fn from(value: u64) -> Self {
        DecodedValue::Uint256(U256::from(value))
    }
}

impl From<bool> for DecodedValue {
    fn from(value: bool) -> Self {
        DecodedValue::Bool(value)
    }
}

impl From<B256> for DecodedValue {
    fn from(value: B256) -> Self {
        DecodedValue::Bytes32(value)
    }
}

impl From<String> for DecodedValue {
    fn from(value: String) -> Self {
        DecodedValue::String(value)
    }
}

impl From<&str> for DecodedValue {
    fn from(value: &str) -> Self {
        DecodedValue::String(value.to_string())
    }
}
