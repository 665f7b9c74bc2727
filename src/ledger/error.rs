//! Ledger error taxonomy

use thiserror::Error;

use crate::storage::StorageError;

/// Ledger operation failures
///
/// Every validation failure is detected before any record is written.
/// Numeric codes start at 6000 to stay clear of host/system codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Ledger settings already initialized")]
    AlreadyInitialized,

    #[error("Ledger settings not initialized")]
    NotInitialized,

    #[error("Coin account already exists")]
    AccountAlreadyExists,

    #[error("Coin account not found")]
    AccountNotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not enough coins to perform this action")]
    InsufficientBalance,

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl LedgerError {
    /// Stable numeric code
    pub fn code(&self) -> u32 {
        match self {
            LedgerError::AlreadyInitialized => 6000,
            LedgerError::NotInitialized => 6001,
            LedgerError::AccountAlreadyExists => 6002,
            LedgerError::AccountNotFound => 6003,
            LedgerError::Unauthorized => 6004,
            LedgerError::InsufficientBalance => 6005,
            LedgerError::Overflow => 6006,
            LedgerError::Storage(_) => 6100,
        }
    }

    /// Stable string code for responses and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            LedgerError::AlreadyInitialized => "ALREADY_INITIALIZED",
            LedgerError::NotInitialized => "NOT_INITIALIZED",
            LedgerError::AccountAlreadyExists => "ACCOUNT_ALREADY_EXISTS",
            LedgerError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            LedgerError::Unauthorized => "UNAUTHORIZED",
            LedgerError::InsufficientBalance => "INSUFFICIENT_BALANCE",
            LedgerError::Overflow => "OVERFLOW",
            LedgerError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Only transient host storage failures are worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Storage(e) if e.is_transient())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
