//! Environment-based Configuration
//!
//! # Environment Variables
//!
//! - `COIN_LEDGER_NAMESPACE` - 64 hex chars, namespace (program id) for
//!   address derivation (default: sha256("coin-ledger"))
//! - `COIN_LEDGER_LOG_LEVEL` - trace, debug, info, warn, error (default: "info")
//! - `COIN_LEDGER_LOG_FORMAT` - "pretty" or "json" (default: "pretty")

use std::env;
use std::str::FromStr;
use thiserror::Error;

use super::logging::LogLevel;
use crate::derivation::SeedResolver;
use crate::types::Address;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn is_json(&self) -> bool {
        matches!(self, LogFormat::Json)
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue(
                "COIN_LEDGER_LOG_FORMAT".to_string(),
                format!("unknown format: {} (use 'pretty' or 'json')", s),
            )),
        }
    }
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Namespace for address derivation
    pub namespace: [u8; 32],

    pub log_level: LogLevel,

    pub log_format: LogFormat,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            namespace: SeedResolver::default_namespace(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Pretty,
        }
    }
}

impl LedgerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("COIN_LEDGER_NAMESPACE") {
            config.namespace = parse_namespace(&value)?;
        }

        if let Some(value) = lookup("COIN_LEDGER_LOG_LEVEL") {
            config.log_level = value.parse()?;
        }

        if let Some(value) = lookup("COIN_LEDGER_LOG_FORMAT") {
            config.log_format = value.parse()?;
        }

        Ok(config)
    }

    /// Address resolver for the configured namespace
    pub fn resolver(&self) -> SeedResolver {
        SeedResolver::new(self.namespace)
    }
}

fn parse_namespace(value: &str) -> Result<[u8; 32], ConfigError> {
    value
        .parse::<Address>()
        .map(Address::to_bytes)
        .map_err(|e| ConfigError::InvalidValue("COIN_LEDGER_NAMESPACE".to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.namespace, SeedResolver::default_namespace());
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let namespace = "11".repeat(32);
        let config = LedgerConfig::from_lookup(lookup(&[
            ("COIN_LEDGER_NAMESPACE", namespace.as_str()),
            ("COIN_LEDGER_LOG_LEVEL", "debug"),
            ("COIN_LEDGER_LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.namespace, [0x11; 32]);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.log_format.is_json());
        assert_eq!(config.resolver(), SeedResolver::new([0x11; 32]));
    }

    #[test]
    fn test_invalid_namespace() {
        let result = LedgerConfig::from_lookup(lookup(&[("COIN_LEDGER_NAMESPACE", "abcd")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue(var, _)) if var == "COIN_LEDGER_NAMESPACE"));
    }

    #[test]
    fn test_invalid_log_level() {
        let result = LedgerConfig::from_lookup(lookup(&[("COIN_LEDGER_LOG_LEVEL", "verbose")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue(var, _)) if var == "COIN_LEDGER_LOG_LEVEL"));
    }

    #[test]
    fn test_namespace_errors_name_the_variable() {
        let result = LedgerConfig::from_lookup(lookup(&[("COIN_LEDGER_NAMESPACE", "zz")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue(var, reason))
                if var == "COIN_LEDGER_NAMESPACE" && reason.contains("invalid hex")
        ));
    }

    #[test]
    fn test_invalid_format() {
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
