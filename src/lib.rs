//! Coin Ledger - Minimal Fungible Token Ledger
//!
//! A single settings record (mint authority + total supply) and one balance
//! account per holder. The ledger is host-agnostic: records live in an
//! injected [`RecordStore`], addresses come from an injected
//! [`AddressResolver`], and caller identities arrive already authenticated.
//!
//! ## Layers
//!
//! 1. **State machine** - pure transitions over mutable records
//! 2. **Ledger service** - resolve, load, validate, commit atomically
//! 3. **Storage** - byte-level record store plus typed settings/account views
//!
//! ```no_run
//! use coin_ledger::{Identity, Ledger, MemoryRecordStore, SeedResolver};
//!
//! # async fn demo() -> coin_ledger::LedgerResult<()> {
//! let ledger = Ledger::new(MemoryRecordStore::new(), SeedResolver::default());
//! let authority = Identity::new([1; 32]);
//! let holder = Identity::new([2; 32]);
//!
//! ledger.initialize(authority).await?;
//! ledger.open_account(holder).await?;
//! ledger.mint(authority, holder, 100).await?;
//! assert_eq!(ledger.total_supply().await?, 100);
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod derivation;
pub mod ledger;
pub mod storage;
pub mod types;

// Re-exports: ledger
pub use ledger::{
    AuditReport, Ledger, LedgerError, LedgerRequest, LedgerResponse, LedgerResult,
};

// Re-exports: addressing
pub use derivation::{AddressResolver, SeedResolver};

// Re-exports: storage
pub use storage::{MemoryRecordStore, RecordStore, StorageError, StorageResult};

// Re-exports: records
pub use types::{Address, CoinAccount, CoinSettings, Identity};
