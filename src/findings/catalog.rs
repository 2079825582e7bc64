//! Static finding catalog.

use strum_macros::{EnumIter, IntoStaticStr};

/// Symbolic finding kinds.
///
/// Codes are part of the external output format and must never be reused or
/// renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum FindingKind {
    NxDomain,
    NoSpf,
    SpfNoAll,
    SpfPassAll,
    SpfSoftFailAll,
    SpfLookupError,
    SpfUnregisteredDomains,
    NoDmarc,
    DmarcLaxPolicy,
    DmarcLaxSubdomainPolicy,
    #[strum(serialize = "DMARC_NOT_100_PCT")]
    DmarcNot100Pct,
    DnsTimeout,
    SpfRecurse,
}

impl FindingKind {
    /// Numeric code written to the output.
    pub fn code(self) -> u32 {
        match self {
            FindingKind::NxDomain => 0,
            FindingKind::NoSpf => 1,
            FindingKind::SpfNoAll => 2,
            FindingKind::SpfPassAll => 3,
            FindingKind::SpfSoftFailAll => 4,
            FindingKind::SpfLookupError => 5,
            FindingKind::SpfUnregisteredDomains => 6,
            FindingKind::NoDmarc => 7,
            FindingKind::DmarcLaxPolicy => 8,
            FindingKind::DmarcLaxSubdomainPolicy => 9,
            FindingKind::DmarcNot100Pct => 10,
            FindingKind::DnsTimeout => 11,
            FindingKind::SpfRecurse => 12,
        }
    }

    /// Catalog key, e.g. `SPF_PASS_ALL`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Short title, identical for every occurrence.
    pub fn title(self) -> &'static str {
        match self {
            FindingKind::NxDomain => "Non-existent domain",
            FindingKind::NoSpf => "No SPF",
            FindingKind::SpfNoAll => "No 'all' mechanism",
            FindingKind::SpfPassAll => "'Pass' qualifier for 'all' mechanism",
            FindingKind::SpfSoftFailAll => "'SoftFail' qualifier for 'all' mechanism",
            FindingKind::SpfLookupError => "Too many lookups for SPF validation",
            FindingKind::SpfUnregisteredDomains => "Unregistered domains in SPF validation chain",
            FindingKind::NoDmarc => "No DMARC",
            FindingKind::DmarcLaxPolicy => "Lax DMARC policy",
            FindingKind::DmarcLaxSubdomainPolicy => "Lax DMARC subdomain policy",
            FindingKind::DmarcNot100Pct => "Partial DMARC coverage",
            FindingKind::DnsTimeout => "DNS timeout",
            FindingKind::SpfRecurse => "Recursive SPF include",
        }
    }

    /// Detail template with `{placeholder}` markers.
    pub fn template(self) -> &'static str {
        match self {
            FindingKind::NxDomain => {
                "The DNS resolver reported that '{domain}' does not exist (NXDOMAIN)."
            }
            FindingKind::NoSpf => "There is no SPF DNS record for the domain.",
            FindingKind::SpfNoAll => {
                "The SPF record has no 'all' mechanism. It may be possible to spoof the \
                 domain without causing an SPF failure."
            }
            FindingKind::SpfPassAll => {
                "The 'all' mechanism uses the 'Pass' qualifier '+'. It should be possible \
                 to spoof the domain without causing an SPF failure."
            }
            FindingKind::SpfSoftFailAll => {
                "The 'all' mechanism uses the 'SoftFail' qualifier '~'. Spoofed mail only \
                 causes a soft SPF failure, which most filters let through with a raised \
                 spam score."
            }
            FindingKind::SpfLookupError => {
                "Validating the SPF record requires more than 10 DNS lookups, which RFC 7208 \
                 forbids. Recipients may answer with a PermError instead of evaluating the \
                 record, and some of them will continue processing the mail."
            }
            FindingKind::SpfUnregisteredDomains => {
                "One or more domains used in the SPF validation chain are not registered. \
                 An attacker could register them and publish an SPF record that authorizes \
                 their own servers. The affected domains are: {domains}"
            }
            FindingKind::NoDmarc => "There is no DMARC DNS record for the domain.",
            FindingKind::DmarcLaxPolicy => {
                "The DMARC policy is set to '{policy}'. Unless the policy is 'reject' or \
                 'quarantine', spoofed mail is likely to be accepted."
            }
            FindingKind::DmarcLaxSubdomainPolicy => {
                "The DMARC subdomain policy is set to '{policy}'. Unless the policy is \
                 'reject' or 'quarantine', spoofed mail from subdomains is likely to be \
                 accepted."
            }
            FindingKind::DmarcNot100Pct => {
                "The DMARC 'pct' value is '{pct}', so the policy only applies to {pct}% of \
                 incoming mail."
            }
            FindingKind::DnsTimeout => {
                "The DNS query for '{domain}' timed out; its records could not be checked."
            }
            FindingKind::SpfRecurse => {
                "The SPF record of '{domain}' references '{recursive_domain}', which points \
                 back at the record itself. Receivers will fail to evaluate it."
            }
        }
    }

    /// Placeholder names used by the template, in order of first appearance.
    pub fn placeholders(self) -> &'static [&'static str] {
        match self {
            FindingKind::NxDomain | FindingKind::DnsTimeout => &["domain"],
            FindingKind::SpfUnregisteredDomains => &["domains"],
            FindingKind::DmarcLaxPolicy | FindingKind::DmarcLaxSubdomainPolicy => &["policy"],
            FindingKind::DmarcNot100Pct => &["pct"],
            FindingKind::SpfRecurse => &["domain", "recursive_domain"],
            FindingKind::NoSpf
            | FindingKind::SpfNoAll
            | FindingKind::SpfPassAll
            | FindingKind::SpfSoftFailAll
            | FindingKind::SpfLookupError
            | FindingKind::NoDmarc => &[],
        }
    }
}
