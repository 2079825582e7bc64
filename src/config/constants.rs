//! Configuration constants.
//!
//! This module defines the constants used throughout the scanner: record
//! prefixes, lookup limits, timeouts and service endpoints.

/// DNS query timeout in seconds.
///
/// Applied both to each resolver attempt and to the whole lookup.
pub const DNS_TIMEOUT_SECS: f64 = 5.0;

/// Maximum number of domains scanned at the same time.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Maximum DNS-querying mechanisms a receiver will evaluate (RFC 7208 section 4.6.4).
pub const SPF_LOOKUP_LIMIT: usize = 10;

/// Lookup count past which an SPF chain is no longer expanded.
///
/// Shared includes are expanded once per branch, so a record can fan out
/// exponentially; anything past this is far over `SPF_LOOKUP_LIMIT` anyway.
pub const SPF_MAX_COUNTED_LOOKUPS: usize = 1000;

/// TXT prefix identifying an SPF record.
pub const SPF_PREFIX: &str = "v=spf1 ";

/// TXT prefix identifying a DMARC record.
pub const DMARC_PREFIX: &str = "v=DMARC1;";

/// Label prepended to a domain to locate its DMARC record.
pub const DMARC_LABEL: &str = "_dmarc";

/// WhoAPI endpoint for "is this domain taken" checks.
pub const DEFAULT_WHOAPI_ENDPOINT: &str = "https://api.whoapi.com/";

/// Environment variable holding the WhoAPI key.
pub const WHOAPI_KEY_ENV: &str = "WHOAPI_KEY";

/// Batch progress is logged every N completed domains.
pub const LOGGING_INTERVAL: usize = 25;
