//! Storage Trait Definitions
//!
//! Defines the record store the ledger runs against. Records are opaque
//! byte blobs keyed by [`Address`]; typing happens in the `typed` views.
//! Implementations are supplied by the host (in-memory for tests and the
//! replay CLI).

use async_trait::async_trait;
use thiserror::Error;

use crate::types::Address;

/// Storage errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

impl StorageError {
    /// Transient failures the caller may retry
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Database(_) | StorageError::Connection(_))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A staged overwrite of an existing record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordWrite {
    pub address: Address,
    pub data: Vec<u8>,
}

impl RecordWrite {
    pub fn new(address: Address, data: Vec<u8>) -> Self {
        Self { address, data }
    }
}

/// Record store interface
///
/// Implementations:
/// - `MemoryRecordStore` - In-memory storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create a record only if the address is free
    ///
    /// Must be atomic: of two concurrent creates at one address, exactly
    /// one succeeds and the other gets `Duplicate`.
    async fn create(&self, address: &Address, data: Vec<u8>) -> StorageResult<()>;

    /// Fetch a record, `None` if the address is empty
    async fn fetch(&self, address: &Address) -> StorageResult<Option<Vec<u8>>>;

    /// Overwrite existing records as one unit
    ///
    /// Either every write lands or none does. Fails with `NotFound` if any
    /// target address is empty.
    async fn commit(&self, writes: Vec<RecordWrite>) -> StorageResult<()>;

    /// All records currently stored
    async fn scan(&self) -> StorageResult<Vec<(Address, Vec<u8>)>>;
}
