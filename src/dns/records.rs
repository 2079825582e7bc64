//! TXT record queries.
//!
//! Resolver failures are classified into the `FetchError` variants the
//! evaluators care about: NXDOMAIN, empty answer, timeout, anything else.

use std::time::Duration;

use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::FetchError;

/// Queries TXT (text) records for a domain.
///
/// # Arguments
///
/// * `domain` - The domain to query
/// * `resolver` - The DNS resolver instance
/// * `timeout` - Deadline for the whole lookup, retries included
///
/// # Returns
///
/// One string per TXT record, with the record's character-strings joined and
/// surrounding quotes removed.
///
/// # Errors
///
/// - `FetchError::NameResolution` if the domain does not exist
/// - `FetchError::NoRecords` if the domain has no TXT data
/// - `FetchError::Timeout` if the lookup exceeds `timeout`
/// - `FetchError::Resolver` for any other resolver failure
pub async fn lookup_txt_records(
    domain: &str,
    resolver: &TokioAsyncResolver,
    timeout: Duration,
) -> Result<Vec<String>, FetchError> {
    let lookup = match tokio::time::timeout(timeout, resolver.lookup(domain, RecordType::TXT)).await
    {
        Ok(Ok(lookup)) => lookup,
        Ok(Err(e)) => return Err(classify_resolve_error(domain, &e)),
        Err(_) => {
            log::warn!("TXT record lookup timed out for {domain}");
            return Err(FetchError::Timeout(domain.to_string()));
        }
    };

    let txt_records: Vec<String> = lookup
        .iter()
        .filter_map(|rdata| {
            if let RData::TXT(txt) = rdata {
                // TXT records can contain multiple strings - join them
                let joined = txt
                    .iter()
                    .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                    .collect::<Vec<String>>()
                    .join("");
                Some(strip_quotes(&joined).to_string())
            } else {
                None
            }
        })
        .collect();

    if txt_records.is_empty() {
        return Err(FetchError::NoRecords(domain.to_string()));
    }
    Ok(txt_records)
}

/// Maps a resolver error onto a `FetchError`.
pub fn classify_resolve_error(domain: &str, e: &ResolveError) -> FetchError {
    match e.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. }
            if *response_code == ResponseCode::NXDomain =>
        {
            FetchError::NameResolution(domain.to_string())
        }
        ResolveErrorKind::NoRecordsFound { .. } => FetchError::NoRecords(domain.to_string()),
        ResolveErrorKind::Timeout => {
            log::warn!("TXT record lookup timed out for {domain}: {e}");
            FetchError::Timeout(domain.to_string())
        }
        _ => {
            let error_msg = e.to_string();
            // Transport-level timeouts surface as protocol errors
            if error_msg.contains("timed out") || error_msg.contains("timeout") {
                log::warn!("TXT record lookup timed out for {domain}: {e}");
                FetchError::Timeout(domain.to_string())
            } else {
                log::warn!("Failed to lookup TXT records for {domain}: {e}");
                FetchError::Resolver {
                    domain: domain.to_string(),
                    message: error_msg,
                }
            }
        }
    }
}

/// Removes surrounding double quotes from a TXT value.
pub fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"')
}

/// Returns the first TXT value that starts with `prefix`.
///
/// Values are compared after removing surrounding quotes.
pub fn select_prefixed(txt_records: &[String], prefix: &str) -> Option<String> {
    txt_records
        .iter()
        .map(|txt| strip_quotes(txt))
        .find(|txt| txt.starts_with(prefix))
        .map(str::to_string)
}
