//! Structured Logging for the Coin Ledger
//!
//! Provides structured logging with:
//! - JSON output for log aggregation
//! - Correlation IDs tying a request to its log lines
//! - Security events for rejected authority checks
//!
//! # Usage
//!
//! ```no_run
//! use coin_ledger::common::logging::{init_logging, LogLevel};
//!
//! init_logging(LogLevel::Info, false).expect("logging");
//! tracing::info!(target: "coin_ledger::ledger", "ready");
//! ```

use serde::Serialize;
use std::str::FromStr;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use super::config::ConfigError;

// ============================================================================
// Log Levels
// ============================================================================

/// Application log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidValue(
                "COIN_LEDGER_LOG_LEVEL".to_string(),
                format!("unknown level: {} (use trace, debug, info, warn or error)", s),
            )),
        }
    }
}

// ============================================================================
// Structured Event Types
// ============================================================================

/// Event categories for structured logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Ledger state transitions
    Ledger,
    /// Authority check failures
    Security,
    /// Startup, replay, audit
    System,
}

/// Structured log event
#[derive(Debug, Serialize)]
pub struct LogEvent {
    /// Event timestamp (RFC 3339)
    pub timestamp: String,
    pub level: String,
    pub category: EventCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

/// Error details for rejected operations
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl LogEvent {
    pub fn new(level: LogLevel, category: EventCategory, message: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level: level.as_filter().to_uppercase(),
            category,
            message: message.into(),
            correlation_id: None,
            data: None,
            error: None,
        }
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_error(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.error = Some(ErrorDetails {
            code: code.into(),
            message: message.into(),
        });
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                "{{\"error\": \"failed to serialize log\", \"message\": \"{}\"}}",
                self.message
            )
        })
    }
}

// ============================================================================
// Event Logging
// ============================================================================

/// Log the outcome of a ledger operation
///
/// `error` carries `(code, message)` for rejected operations.
pub fn log_ledger_event(
    operation: &str,
    correlation_id: &str,
    details: serde_json::Value,
    error: Option<(&str, &str)>,
) {
    let level = if error.is_some() {
        LogLevel::Warn
    } else {
        LogLevel::Info
    };
    let mut event = LogEvent::new(level, EventCategory::Ledger, operation)
        .with_correlation_id(correlation_id)
        .with_data(details);

    match error {
        Some((code, message)) => {
            event = event.with_error(code, message);
            tracing::warn!(target: "coin_ledger::ledger", "{}", event.to_json());
        }
        None => tracing::info!(target: "coin_ledger::ledger", "{}", event.to_json()),
    }
}

/// Log a rejected authority check
pub fn log_security_event(event_type: &str, details: serde_json::Value, correlation_id: Option<&str>) {
    let event = LogEvent::new(LogLevel::Warn, EventCategory::Security, event_type)
        .with_data(details);

    let event = match correlation_id {
        Some(id) => event.with_correlation_id(id),
        None => event,
    };

    tracing::warn!(target: "coin_ledger::security", "{}", event.to_json());
}

/// Log a process-level event (replay start, audit outcome)
pub fn log_system_event(message: &str, details: serde_json::Value, failed: bool) {
    let level = if failed { LogLevel::Error } else { LogLevel::Info };
    let event = LogEvent::new(level, EventCategory::System, message).with_data(details);

    if failed {
        tracing::error!(target: "coin_ledger::system", "{}", event.to_json());
    } else {
        tracing::info!(target: "coin_ledger::system", "{}", event.to_json());
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Initialize the logging system
///
/// Logs go to stderr; `RUST_LOG` wins over `level` when set.
pub fn init_logging(level: LogLevel, json_format: bool) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("coin_ledger={}", level.as_filter())));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .map_err(|e| LoggingError::InitFailed(e.to_string()))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
            .map_err(|e| LoggingError::InitFailed(e.to_string()))?;
    }

    Ok(())
}

/// Initialize logging from LedgerConfig
pub fn init_from_config(config: &super::config::LedgerConfig) -> Result<(), LoggingError> {
    init_logging(config.log_level, config.log_format.is_json())
}

/// Logging errors
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to initialize logging: {0}")]
    InitFailed(String),
}

/// Generate a unique correlation ID for a ledger request
pub fn generate_correlation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_serialization() {
        let event = LogEvent::new(LogLevel::Warn, EventCategory::Ledger, "transfer")
            .with_correlation_id("req-1")
            .with_data(serde_json::json!({"amount": 42}))
            .with_error("INSUFFICIENT_BALANCE", "Not enough coins");

        let json = event.to_json();
        assert!(json.contains("\"category\":\"ledger\""));
        assert!(json.contains("req-1"));
        assert!(json.contains("42"));
        assert!(json.contains("INSUFFICIENT_BALANCE"));
        assert!(json.contains("\"level\":\"WARN\""));
    }

    #[test]
    fn test_optional_fields_skipped() {
        let json = LogEvent::new(LogLevel::Info, EventCategory::System, "start").to_json();
        assert!(!json.contains("correlation_id"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!(matches!(
            "verbose".parse::<LogLevel>(),
            Err(ConfigError::InvalidValue(var, _)) if var == "COIN_LEDGER_LOG_LEVEL"
        ));
    }

    #[test]
    fn test_correlation_ids_unique() {
        assert_ne!(generate_correlation_id(), generate_correlation_id());
    }
}
