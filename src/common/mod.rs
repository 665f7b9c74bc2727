//! Common Infrastructure Module
//!
//! This module contains:
//! - Configuration loading from environment variables
//! - Structured logging setup
//! - Common error types

pub mod config;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use config::{ConfigError, LedgerConfig, LogFormat};
pub use error::{CoinLedgerError, Result};
pub use logging::{
    generate_correlation_id, init_from_config, init_logging, log_ledger_event, log_security_event,
    log_system_event,
    ErrorDetails, EventCategory, LogEvent, LogLevel, LoggingError,
};
