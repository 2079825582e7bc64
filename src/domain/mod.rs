//! Domain normalization and registered-domain extraction.
//!
//! Uses the Public Suffix List (`psl`) to reduce any host to its registrable
//! domain (eTLD+1), e.g. `_spf.mail.example.co.uk` to `example.co.uk`.
//!
//! Key functions:
//! - `normalize_domain()` - lowercases and strips the root dot
//! - `registered_domain()` - eTLD+1 of a (sub)domain

use psl::Psl;

/// Normalizes a domain name for comparison and lookups.
///
/// Trims whitespace, lowercases and removes a trailing root dot.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Returns true if two domain names refer to the same name.
pub fn same_domain(a: &str, b: &str) -> bool {
    normalize_domain(a) == normalize_domain(b)
}

/// Extracts the registered domain from a domain or subdomain.
///
/// # Arguments
///
/// * `domain` - The host to reduce, e.g. `_spf.google.com`
///
/// # Returns
///
/// The registrable domain (e.g. `google.com`). If the Public Suffix List has
/// no registrable part (a bare suffix, a single label, an IP literal) the
/// normalized input is returned unchanged.
pub fn registered_domain(domain: &str) -> String {
    let normalized = normalize_domain(domain);
    if normalized.parse::<std::net::IpAddr>().is_ok() {
        return normalized;
    }
    match psl::List.domain(normalized.as_bytes()) {
        Some(d) => String::from_utf8_lossy(d.as_bytes()).to_string(),
        None => normalized,
    }
}
