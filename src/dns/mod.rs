//! DNS TXT record fetching.
//!
//! This module provides:
//! - TXT record queries over `hickory-resolver` with per-query deadlines
//! - Classification of resolver failures into `FetchError`
//! - The `TxtFetcher` abstraction used by the SPF and DMARC evaluators

mod fetch;
mod records;

// Re-export public API
pub use fetch::{DnsTxtFetcher, TxtFetcher};
pub use records::{classify_resolve_error, lookup_txt_records, select_prefixed, strip_quotes};
