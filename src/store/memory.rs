use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use super::{ensure_key_matches, RecordStore, StoreError};
use crate::records::{EventKind, Record, RecordId};

/// In-process record store for tests and dry runs.
///
/// Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<BTreeMap<RecordId, Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored records across all kinds.
    ///
    /// Writes insert whole records, so the map stays consistent even if a
    /// writer panicked while holding the lock.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn upsert(&self, id: &RecordId, record: &Record) -> Result<(), StoreError> {
        ensure_key_matches(id, record)?;
        let mut guard = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        guard.insert(*id, record.clone());
        Ok(())
    }

    async fn upsert_batch(&self, records: &[Record]) -> Result<(), StoreError> {
        let mut guard = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        for record in records {
            guard.insert(record.id, record.clone());
        }
        Ok(())
    }

    async fn get(&self, id: &RecordId) -> Result<Option<Record>, StoreError> {
        let guard = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.get(id).cloned())
    }

    async fn count(&self, kind: EventKind) -> Result<u64, StoreError> {
        let guard = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.values().filter(|r| r.kind == kind).count() as u64)
    }

    async fn latest_block(&self, kind: EventKind) -> Result<Option<u64>, StoreError> {
        let guard = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard
            .values()
            .filter(|r| r.kind == kind)
            .map(|r| r.block_number)
            .max())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;

    use super::*;
    use crate::records::DecodedValue;
    use crate::testing::{create_reward_added_event, mock_event, with_log};

    fn record_at(kind: EventKind, tx: u8, log_index: u64) -> Record {
        Record::from_event(&with_log(mock_event(kind), tx, log_index)).unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_stored_record() {
        let store = MemoryStore::new();
        let record = record_at(EventKind::Staked, 1, 0);

        store.upsert(&record.id, &record).await.unwrap();

        assert_eq!(store.get(&record.id).await.unwrap(), Some(record.clone()));
        assert_eq!(store.get(&RecordId::new(record.transaction_hash, 9)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_repeated_upsert_is_idempotent() {
        let store = MemoryStore::new();
        let record = record_at(EventKind::WaitTimeUpdated, 1, 0);

        store.upsert(&record.id, &record).await.unwrap();
        store.upsert(&record.id, &record).await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.count(EventKind::WaitTimeUpdated).await.unwrap(), 1);
        assert_eq!(store.get(&record.id).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_count_is_per_kind() {
        let store = MemoryStore::new();
        let records = vec![
            record_at(EventKind::Staked, 1, 0),
            record_at(EventKind::Staked, 1, 1),
            record_at(EventKind::Withdrawn, 2, 0),
        ];

        store.upsert_batch(&records).await.unwrap();

        assert_eq!(store.count(EventKind::Staked).await.unwrap(), 2);
        assert_eq!(store.count(EventKind::Withdrawn).await.unwrap(), 1);
        assert_eq!(store.count(EventKind::VoteCast).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_upsert_under_foreign_key_is_rejected() {
        let store = MemoryStore::new();
        let record = record_at(EventKind::VoteCast, 1, 0);
        let foreign = RecordId::new(record.transaction_hash, 9);

        let err = store.upsert(&foreign, &record).await.unwrap_err();

        assert!(matches!(err, StoreError::IdMismatch { .. }));
        assert!(store.is_empty());
        assert_eq!(store.get(&foreign).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_latest_block_per_kind() {
        let store = MemoryStore::new();
        let mut records = Vec::new();
        for (kind, block, log_index) in [
            (EventKind::Staked, 7, 0),
            (EventKind::Staked, 3, 1),
            (EventKind::Withdrawn, 11, 2),
        ] {
            let mut record = record_at(kind, 1, log_index);
            record.block_number = block;
            records.push(record);
        }
        store.upsert_batch(&records).await.unwrap();

        assert_eq!(store.latest_block(EventKind::Staked).await.unwrap(), Some(7));
        assert_eq!(store.latest_block(EventKind::Withdrawn).await.unwrap(), Some(11));
        assert_eq!(store.latest_block(EventKind::VoteCast).await.unwrap(), None);
    }

    #[test]
    fn test_len_survives_a_poisoned_lock() {
        let store = MemoryStore::new();
        let record = record_at(EventKind::Staked, 1, 0);
        store
            .records
            .write()
            .unwrap()
            .insert(record.id, record.clone());

        let writer = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = writer.records.write().unwrap();
            panic!("writer crashed");
        })
        .join();

        assert!(store.records.is_poisoned());
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }

    #[tokio::test]
    async fn test_field_of() {
        let store = MemoryStore::new();
        let record = Record::from_event(&create_reward_added_event(U256::from(77u64))).unwrap();
        store.upsert(&record.id, &record).await.unwrap();

        assert_eq!(
            store.field_of(&record.id, "reward").await.unwrap(),
            Some(DecodedValue::Uint256(U256::from(77u64)))
        );
        assert_eq!(
            store.field_of(&record.id, "blockTimestamp").await.unwrap(),
            Some(DecodedValue::Uint256(U256::from(record.block_timestamp)))
        );
        assert_eq!(store.field_of(&record.id, "user").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_upserts_of_distinct_ids() {
        let store = MemoryStore::new();
        let mut tasks = tokio::task::JoinSet::new();

        for tx in 0..8u8 {
            let store = store.clone();
            tasks.spawn(async move {
                for log_index in 0..25u64 {
                    let record = record_at(EventKind::RewardPaid, tx, log_index);
                    store.upsert(&record.id, &record).await.unwrap();
                }
            });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap();
        }

        assert_eq!(store.count(EventKind::RewardPaid).await.unwrap(), 200);
    }
}
