//! Storage Layer Module
//!
//! Provides the record stores the ledger operates on.
//!
//! This module contains:
//! - Storage trait definitions for abstraction
//! - In-memory implementation
//! - Typed settings/account views over a byte-level store

pub mod memory;
pub mod traits;
pub mod typed;

// Re-exports for convenience
pub use memory::MemoryRecordStore;
pub use traits::{RecordStore, RecordWrite, StorageError, StorageResult};
pub use typed::{AccountStore, SettingsStore};
