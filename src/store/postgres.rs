use std::collections::BTreeMap;
use std::path::Path;

use alloy_primitives::B256;
use async_trait::async_trait;
use tokio_postgres::Row;

use super::{ensure_key_matches, RecordStore, StoreError};
use crate::db::{DbError, DbOperation, DbPool, DbValue};
use crate::records::{DecodedValue, EventKind, Record, RecordId};

const RECORDS_TABLE: &str = "records";

const RECORD_COLUMNS: [&str; 6] = [
    "id",
    "kind",
    "fields",
    "block_number",
    "block_timestamp",
    "transaction_hash",
];

/// Durable record store on PostgreSQL, one row per record.
///
/// `fields` is kept as serialized JSON in a BYTEA column: JSONB rejects
/// strings containing NUL, and event strings are stored verbatim.
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, pool_size: usize) -> Result<Self, StoreError> {
        Ok(Self::new(DbPool::new(database_url, pool_size).await?))
    }

    pub async fn run_migrations(&self, dir: &Path) -> Result<(), StoreError> {
        Ok(self.pool.run_migrations(dir).await?)
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn upsert(&self, id: &RecordId, record: &Record) -> Result<(), StoreError> {
        ensure_key_matches(id, record)?;
        self.upsert_batch(std::slice::from_ref(record)).await
    }

    async fn upsert_batch(&self, records: &[Record]) -> Result<(), StoreError> {
        let ops = records
            .iter()
            .map(upsert_record)
            .collect::<Result<Vec<_>, _>>()?;
        self.pool.execute_transaction(ops).await?;
        Ok(())
    }

    async fn get(&self, id: &RecordId) -> Result<Option<Record>, StoreError> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1",
            RECORD_COLUMNS.join(", "),
            RECORDS_TABLE
        );
        let id_bytes = id.as_bytes().to_vec();
        let rows = self.pool.query(&query, &[&id_bytes]).await?;

        rows.first().map(record_from_row).transpose()
    }

    async fn count(&self, kind: EventKind) -> Result<u64, StoreError> {
        let query = format!("SELECT COUNT(*) FROM {} WHERE kind = $1", RECORDS_TABLE);
        let rows = self.pool.query(&query, &[&kind.as_str()]).await?;

        let count: i64 = match rows.first() {
            Some(row) => row.try_get(0).map_err(DbError::from)?,
            None => 0,
        };
        Ok(count.max(0) as u64)
    }

    async fn latest_block(&self, kind: EventKind) -> Result<Option<u64>, StoreError> {
        let query = format!(
            "SELECT MAX(block_number) FROM {} WHERE kind = $1",
            RECORDS_TABLE
        );
        let rows = self.pool.query(&query, &[&kind.as_str()]).await?;

        let latest: Option<i64> = match rows.first() {
            Some(row) => row.try_get(0).map_err(DbError::from)?,
            None => None,
        };
        latest.map(|block| to_u64("block_number", block)).transpose()
    }
}

fn encode_fields(fields: &BTreeMap<String, DecodedValue>) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec(fields)?)
}

fn decode_fields(bytes: &[u8]) -> Result<BTreeMap<String, DecodedValue>, StoreError> {
    Ok(serde_json::from_slice(bytes)?)
}

fn to_u64(column: &str, value: i64) -> Result<u64, StoreError> {
    u64::try_from(value).map_err(|_| StoreError::CorruptRow(format!("{} is {}", column, value)))
}

fn upsert_record(record: &Record) -> Result<DbOperation, StoreError> {
    let columns: Vec<String> = RECORD_COLUMNS.iter().map(|c| c.to_string()).collect();
    let update_columns = columns[1..].to_vec();

    Ok(DbOperation::Upsert {
        table: RECORDS_TABLE.to_string(),
        values: vec![
            DbValue::Bytes(record.id.as_bytes().to_vec()),
            DbValue::VarChar(record.kind.as_str().to_string()),
            DbValue::Bytes(encode_fields(&record.fields)?),
            DbValue::Uint64(record.block_number),
            DbValue::Uint64(record.block_timestamp),
            DbValue::Bytes32(record.transaction_hash.0),
        ],
        columns,
        conflict_columns: vec!["id".to_string()],
        update_columns,
    })
}

fn record_from_row(row: &Row) -> Result<Record, StoreError> {
    let id: Vec<u8> = row.try_get("id").map_err(DbError::from)?;
    let kind: String = row.try_get("kind").map_err(DbError::from)?;
    let fields: Vec<u8> = row.try_get("fields").map_err(DbError::from)?;
    let block_number: i64 = row.try_get("block_number").map_err(DbError::from)?;
    let block_timestamp: i64 = row.try_get("block_timestamp").map_err(DbError::from)?;
    let transaction_hash: Vec<u8> = row.try_get("transaction_hash").map_err(DbError::from)?;

    let id = RecordId::from_slice(&id)
        .ok_or_else(|| StoreError::CorruptRow(format!("id has {} bytes", id.len())))?;
    let kind = kind
        .parse::<EventKind>()
        .map_err(|e| StoreError::CorruptRow(e.to_string()))?;
    if transaction_hash.len() != 32 {
        return Err(StoreError::CorruptRow(format!(
            "transaction_hash has {} bytes",
            transaction_hash.len()
        )));
    }
    let fields = decode_fields(&fields)?;

    Ok(Record {
        id,
        kind,
        fields,
        block_number: to_u64("block_number", block_number)?,
        block_timestamp: to_u64("block_timestamp", block_timestamp)?,
        transaction_hash: B256::from_slice(&transaction_hash),
    })
}
