/// A value that can be stored in the database.
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    /// Unsigned 64-bit integer (stored as BIGINT)
    Uint64(u64),
    /// VARCHAR (length constraint enforced at schema level)
    VarChar(String),
    /// Raw bytes (stored as BYTEA)
    Bytes(Vec<u8>),
    /// 32-byte hash (stored as BYTEA)
    Bytes32([u8; 32]),
}

/// Database operation produced by the record store.
///
/// Records are never updated in place or deleted, so only upserts exist.
#[derive(Debug, Clone, PartialEq)]
pub enum DbOperation {
    /// INSERT with ON CONFLICT DO UPDATE (upsert)
    Upsert {
        table: String,
        columns: Vec<String>,
        values: Vec<DbValue>,
        /// Columns that form the unique constraint
        conflict_columns: Vec<String>,
        /// Columns to update on conflict
        update_columns: Vec<String>,
    },
}
