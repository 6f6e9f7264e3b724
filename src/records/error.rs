use thiserror::Error;

use super::kind::EventKind;

/// An event could not be turned into a complete record.
///
/// Raised before anything is written, so a failed event never leaves a
/// partial record behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("{kind} event is missing parameter '{param}'")]
    MissingParam { kind: EventKind, param: String },

    #[error("{kind} parameter '{param}' is {found}, expected {expected}")]
    TypeMismatch {
        kind: EventKind,
        param: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Log index {0} does not fit in 32 bits")]
    LogIndexOutOfRange(u64),

    #[error("Handler for {expected} received a {found} event")]
    KindMismatch { expected: EventKind, found: EventKind },

    #[error("Unknown event kind: {0}")]
    UnknownKind(String),
}
