//! Coin Ledger
//!
//! Settings singleton (mint authority + total supply) and one balance
//! account per holder, with four operations:
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | `initialize` | create settings, requester becomes mint authority |
//! | `open_account` | create an empty account for the requester |
//! | `mint` | authority credits a holder, supply grows by the same amount |
//! | `transfer` | source owner moves coins, supply unchanged |
//!
//! Invariant after every successful operation: total supply equals the sum
//! of all account balances.

pub mod error;
pub mod request;
pub mod service;
pub mod state_machine;

pub use error::{LedgerError, LedgerResult};
pub use request::{LedgerRequest, LedgerResponse};
pub use service::{AuditReport, Ledger};
