//! In-Memory Storage Implementation
//!
//! Provides in-memory record storage for tests and request replay.
//! Data is lost when the process exits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::{RecordStore, RecordWrite, StorageError, StorageResult};
use crate::types::Address;

/// In-memory record store
///
/// Thread-safe; clones share the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    /// Record data indexed by address
    records: Arc<RwLock<HashMap<Address, Vec<u8>>>>,
}

impl MemoryRecordStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, address: &Address, data: Vec<u8>) -> StorageResult<()> {
        let mut records = self.records.write().await;

        if records.contains_key(address) {
            return Err(StorageError::Duplicate(address.to_string()));
        }

        records.insert(*address, data);
        Ok(())
    }

    async fn fetch(&self, address: &Address) -> StorageResult<Option<Vec<u8>>> {
        let records = self.records.read().await;
        Ok(records.get(address).cloned())
    }

    async fn commit(&self, writes: Vec<RecordWrite>) -> StorageResult<()> {
        let mut records = self.records.write().await;

        // Validate every target before touching any
        if let Some(missing) = writes.iter().find(|w| !records.contains_key(&w.address)) {
            return Err(StorageError::NotFound(missing.address.to_string()));
        }

        for write in writes {
            records.insert(write.address, write.data);
        }

        Ok(())
    }

    async fn scan(&self) -> StorageResult<Vec<(Address, Vec<u8>)>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .map(|(address, data)| (*address, data.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let store = MemoryRecordStore::new();

        store.create(&addr(1), vec![1, 2, 3]).await.unwrap();

        let data = store.fetch(&addr(1)).await.unwrap();
        assert_eq!(data, Some(vec![1, 2, 3]));
        assert_eq!(store.fetch(&addr(2)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_create_error() {
        let store = MemoryRecordStore::new();

        store.create(&addr(1), vec![1]).await.unwrap();
        let result = store.create(&addr(1), vec![2]).await;

        assert!(matches!(result, Err(StorageError::Duplicate(_))));
        assert_eq!(store.fetch(&addr(1)).await.unwrap(), Some(vec![1]));
    }

    #[tokio::test]
    async fn test_commit_overwrites_all() {
        let store = MemoryRecordStore::new();
        store.create(&addr(1), vec![0]).await.unwrap();
        store.create(&addr(2), vec![0]).await.unwrap();

        store
            .commit(vec![
                RecordWrite::new(addr(1), vec![10]),
                RecordWrite::new(addr(2), vec![20]),
            ])
            .await
            .unwrap();

        assert_eq!(store.fetch(&addr(1)).await.unwrap(), Some(vec![10]));
        assert_eq!(store.fetch(&addr(2)).await.unwrap(), Some(vec![20]));
    }

    #[tokio::test]
    async fn test_commit_with_missing_target_writes_nothing() {
        let store = MemoryRecordStore::new();
        store.create(&addr(1), vec![0]).await.unwrap();

        let result = store
            .commit(vec![
                RecordWrite::new(addr(1), vec![10]),
                RecordWrite::new(addr(9), vec![90]),
            ])
            .await;

        assert!(matches!(result, Err(StorageError::NotFound(_))));
        assert_eq!(store.fetch(&addr(1)).await.unwrap(), Some(vec![0]));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_create_single_winner() {
        let store = MemoryRecordStore::new();

        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(&addr(7), vec![i]).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.len().await, 1);
    }
}
