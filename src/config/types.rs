//! Configuration types.
//!
//! This module defines the library configuration and the enums shared with
//! the command-line parser.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{DEFAULT_MAX_CONCURRENCY, DEFAULT_WHOAPI_ENDPOINT, DNS_TIMEOUT_SECS};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what would be accepted
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use mail_spoof::Config;
///
/// let config = Config {
///     domains: vec!["example.com".to_string()],
///     max_concurrency: 20,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Domains passed directly
    pub domains: Vec<String>,

    /// File with one domain per line (`#` starts a comment line)
    pub input_list: Option<PathBuf>,

    /// JSON output path, `-` for stdout
    pub output: PathBuf,

    /// Per-query timeout for DNS and HTTP requests, in seconds
    pub timeout_secs: f64,

    /// Nameservers to query instead of the system resolver
    pub nameservers: Vec<IpAddr>,

    /// Maximum domains scanned concurrently
    pub max_concurrency: usize,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// WhoAPI key; registration checks are skipped when absent
    pub whoapi_key: Option<String>,

    /// WhoAPI endpoint
    pub whoapi_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            input_list: None,
            output: PathBuf::from("-"),
            timeout_secs: DNS_TIMEOUT_SECS,
            nameservers: Vec::new(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            whoapi_key: None,
            whoapi_endpoint: DEFAULT_WHOAPI_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    /// Per-query timeout as a `Duration`.
    ///
    /// Only meaningful after `validate()` succeeded.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_secs)
    }

    /// Checks the configuration for values the scanner cannot work with.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            return Err(ConfigValidationError {
                field: "timeout_secs",
                message: format!(
                    "must be a number greater than 0 (got {})",
                    self.timeout_secs
                ),
            });
        }
        if Duration::try_from_secs_f64(self.timeout_secs).is_err() {
            return Err(ConfigValidationError {
                field: "timeout_secs",
                message: format!("is too large (got {})", self.timeout_secs),
            });
        }
        if self.max_concurrency == 0 {
            return Err(ConfigValidationError {
                field: "max_concurrency",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.domains.is_empty() && self.input_list.is_none() {
            return Err(ConfigValidationError {
                field: "domains",
                message: "pass at least one --domain or an --input-list file".to_string(),
            });
        }
        if self.whoapi_key.is_some() && self.whoapi_endpoint.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "whoapi_endpoint",
                message: "must not be empty when a WhoAPI key is configured".to_string(),
            });
        }
        Ok(())
    }
}
