//! Common Error Types
//!
//! Root error for the binary surface: configuration, logging, request
//! files and ledger failures.

use thiserror::Error;

use crate::ledger::LedgerError;

/// Root error type for the coin ledger
#[derive(Debug, Error)]
pub enum CoinLedgerError {
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),

    #[error("logging error: {0}")]
    Logging(#[from] super::logging::LoggingError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("invalid request file: {0}")]
    Requests(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoinLedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Get error code for CLI output
    pub fn error_code(&self) -> &'static str {
        match self {
            CoinLedgerError::Config(_) => "CONFIG_ERROR",
            CoinLedgerError::Logging(_) => "LOGGING_ERROR",
            CoinLedgerError::Ledger(e) => e.error_code(),
            CoinLedgerError::Requests(_) => "REQUEST_ERROR",
            CoinLedgerError::Validation(_) => "VALIDATION_ERROR",
            CoinLedgerError::Io(_) => "IO_ERROR",
        }
    }
}

/// Result type alias using CoinLedgerError
pub type Result<T> = std::result::Result<T, CoinLedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_code_passthrough() {
        let err = CoinLedgerError::from(LedgerError::Unauthorized);
        assert_eq!(err.error_code(), "UNAUTHORIZED");
        assert!(err.to_string().contains("Unauthorized"));
    }

    #[test]
    fn test_validation_error() {
        let err = CoinLedgerError::validation("bad identity");
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("bad identity"));
    }
}
