//! Handler error types.

use thiserror::Error;

use crate::records::MappingError;
use crate::store::StoreError;

/// Failure to index one event (or one batch).
///
/// Either variant is fatal to the event being processed but leaves
/// previously stored records untouched. No retry happens here.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}
