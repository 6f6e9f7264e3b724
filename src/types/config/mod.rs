pub mod indexer;
pub mod source;
pub mod store;

pub use indexer::IndexerConfig;
pub use source::SourceConfig;
pub use store::StoreConfig;
