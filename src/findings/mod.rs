//! Findings and the finding catalog.
//!
//! Every weakness the scanner can report is a `FindingKind`. Each kind maps to
//! a stable numeric code, a title and a detail template. Templates contain
//! named `{placeholder}`s which are filled in when a `Finding` is created;
//! a `Finding` is an owned value and never shares its text with the catalog.

mod catalog;

use serde::{Deserialize, Serialize};

pub use catalog::FindingKind;

/// One reported weakness.
///
/// Serialized as `{"code": .., "title": .., "detail": ..}`; `code` is the
/// compatibility contract for downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable numeric code of the finding kind
    pub code: u32,
    /// Short human-readable title
    pub title: String,
    /// Explanation with placeholders filled in
    pub detail: String,
}

impl Finding {
    /// Builds a finding for `kind`, substituting `values` into its template.
    ///
    /// Placeholders without a matching value are left as-is; use the typed
    /// constructors below, which always supply what their template needs.
    pub fn new(kind: FindingKind, values: &[(&str, &str)]) -> Self {
        Self {
            code: kind.code(),
            title: kind.title().to_string(),
            detail: render(kind.template(), values),
        }
    }

    /// A finding whose template has no placeholders.
    pub fn plain(kind: FindingKind) -> Self {
        Self::new(kind, &[])
    }

    /// `NX_DOMAIN` for `domain`.
    pub fn nx_domain(domain: &str) -> Self {
        Self::new(FindingKind::NxDomain, &[("domain", domain)])
    }

    /// `DNS_TIMEOUT` for `domain`.
    pub fn dns_timeout(domain: &str) -> Self {
        Self::new(FindingKind::DnsTimeout, &[("domain", domain)])
    }

    /// `SPF_RECURSE`: `recursive_domain` is the offending mechanism value.
    pub fn spf_recurse(domain: &str, recursive_domain: &str) -> Self {
        Self::new(
            FindingKind::SpfRecurse,
            &[("domain", domain), ("recursive_domain", recursive_domain)],
        )
    }

    /// Lists `domains` comma-separated in iteration order.
    pub fn unregistered_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = domains
            .into_iter()
            .map(|d| d.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(FindingKind::SpfUnregisteredDomains, &[("domains", &joined)])
    }

    /// `DMARC_LAX_POLICY` with the raw `p` value.
    pub fn dmarc_lax_policy(policy: &str) -> Self {
        Self::new(FindingKind::DmarcLaxPolicy, &[("policy", policy)])
    }

    /// `DMARC_LAX_SUBDOMAIN_POLICY` with the raw `sp` value.
    pub fn dmarc_lax_subdomain_policy(policy: &str) -> Self {
        Self::new(FindingKind::DmarcLaxSubdomainPolicy, &[("policy", policy)])
    }

    /// `DMARC_NOT_100_PCT` with the raw `pct` value.
    pub fn dmarc_partial_pct(pct: &str) -> Self {
        Self::new(FindingKind::DmarcNot100Pct, &[("pct", pct)])
    }

    /// Returns true if this finding was created from `kind`.
    pub fn is(&self, kind: FindingKind) -> bool {
        self.code == kind.code()
    }
}

/// Replaces every `{name}` in `template` whose name appears in `values`.
///
/// Single pass: substituted text is never re-scanned, so values containing
/// braces are emitted verbatim.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match values.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
