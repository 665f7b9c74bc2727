//! Shared Types Module
//!
//! Data types shared across the ledger.

pub mod identity;
pub mod records;

// Re-exports for convenience
pub use identity::{Address, Identity, KeyParseError, KEY_LEN};
pub use records::{discriminator, CoinAccount, CoinSettings, Record, RecordError, DISCRIMINATOR_LEN};
