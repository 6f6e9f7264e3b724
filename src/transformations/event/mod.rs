//! Per-contract event handlers.

pub mod delegator_factory;
pub mod governor_alpha;
