//! Error type definitions.
//!
//! This module defines the error types used throughout the scanner. DNS and
//! registration failures are recovered into findings or log lines by the
//! evaluators; only `InitializationError` and batch-level `anyhow` errors ever
//! reach the binary.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client used for registration checks.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Outcome of a failed TXT record fetch.
///
/// The first four variants must stay distinguishable: the evaluators map each
/// of them to a different finding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The domain has TXT data, but no value starts with the requested prefix.
    #[error("no TXT record with prefix '{prefix}' for {domain}")]
    #[allow(missing_docs)]
    NotFound { domain: String, prefix: String },

    /// The domain does not exist (NXDOMAIN).
    #[error("non-existent domain {0}")]
    NameResolution(String),

    /// The domain exists but returned no TXT data at all.
    #[error("no TXT records for {0}")]
    NoRecords(String),

    /// The query exceeded the configured deadline.
    #[error("DNS query for {0} timed out")]
    Timeout(String),

    /// Any other resolver failure (connection refused, malformed response, ...).
    #[error("DNS lookup for {domain} failed: {message}")]
    #[allow(missing_docs)]
    Resolver { domain: String, message: String },
}

/// Errors raised while walking an SPF include chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpfChainError {
    /// A mechanism of `domain`'s record points straight back at `domain`.
    #[error("trivial recursion in {domain}: '{value}' references itself")]
    SelfReference {
        /// Domain whose record contains the mechanism
        domain: String,
        /// The mechanism value
        value: String,
    },
}

/// Errors returned by a domain registration lookup.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// The service answered with a non-zero status.
    #[error("registration service error: {0}")]
    Service(String),

    /// Transport or decoding failure.
    #[error("registration request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The response did not carry the `taken` flag.
    #[error("registration response for {0} has no 'taken' field")]
    MissingField(String),
}

/// Fatal outcome of one evaluator for one domain.
///
/// The `Scanner` logs these and moves on; they never escape a scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// A fetch outcome that has no finding mapping.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
