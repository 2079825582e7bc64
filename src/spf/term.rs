//! SPF term grammar.
//!
//! Only the parts of RFC 7208 syntax needed for cost estimation and the
//! `all` check are recognized; every other token is `SpfTerm::Other`.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a qualified `all` mechanism, e.g. `-all` or `~ALL`.
static ALL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([-?~+])all$").expect("ALL_PATTERN is a valid regex"));

/// SPF qualifier prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    /// `+`
    Pass,
    /// `-`
    Fail,
    /// `~`
    SoftFail,
    /// `?`
    Neutral,
}

impl Qualifier {
    /// Parses a qualifier character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Qualifier::Pass),
            '-' => Some(Qualifier::Fail),
            '~' => Some(Qualifier::SoftFail),
            '?' => Some(Qualifier::Neutral),
            _ => None,
        }
    }
}

/// Mechanisms that take a `:value` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Mechanism {
    Include,
    A,
    Mx,
    Ptr,
    Exists,
    Redirect,
    Ip4,
    Ip6,
    /// Any other name; costs nothing.
    Unknown,
}

impl Mechanism {
    fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "include" => Mechanism::Include,
            "a" => Mechanism::A,
            "mx" => Mechanism::Mx,
            "ptr" => Mechanism::Ptr,
            "exists" => Mechanism::Exists,
            "redirect" => Mechanism::Redirect,
            "ip4" => Mechanism::Ip4,
            "ip6" => Mechanism::Ip6,
            _ => Mechanism::Unknown,
        }
    }

    /// DNS lookups a receiver performs to evaluate this mechanism.
    pub fn lookup_cost(self) -> usize {
        match self {
            Mechanism::Include
            | Mechanism::A
            | Mechanism::Mx
            | Mechanism::Ptr
            | Mechanism::Exists
            | Mechanism::Redirect => 1,
            Mechanism::Ip4 | Mechanism::Ip6 | Mechanism::Unknown => 0,
        }
    }

    /// Whether the value names a host whose owner takes part in validation.
    pub fn references_domain(self) -> bool {
        matches!(self, Mechanism::Include | Mechanism::A | Mechanism::Mx)
    }
}

/// One whitespace-delimited token of an SPF record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpfTerm<'a> {
    /// A qualified `all` mechanism.
    All(Qualifier),
    /// A `mechanism:value` pair. The qualifier, if any, is dropped.
    Mechanism {
        /// Mechanism kind, matched case-insensitively
        mechanism: Mechanism,
        /// Everything after the first `:`
        value: &'a str,
    },
    /// Anything else: version tag, bare mechanisms, modifiers.
    Other(&'a str),
}

impl<'a> SpfTerm<'a> {
    /// Classifies one token.
    pub fn parse(token: &'a str) -> Self {
        if let Some(captures) = ALL_PATTERN.captures(token) {
            if let Some(q) = captures[1].chars().next().and_then(Qualifier::from_char) {
                return SpfTerm::All(q);
            }
        }

        match token.split_once(':') {
            Some((name, value)) => {
                let name = name
                    .strip_prefix(['+', '-', '~', '?'])
                    .unwrap_or(name);
                SpfTerm::Mechanism {
                    mechanism: Mechanism::from_name(name),
                    value,
                }
            }
            None => SpfTerm::Other(token),
        }
    }
}

/// Splits a record into terms.
pub fn terms(record: &str) -> impl Iterator<Item = SpfTerm<'_>> {
    record.split_whitespace().map(SpfTerm::parse)
}

/// Qualifier of the record's final term, if that term is a qualified `all`.
pub fn all_qualifier(record: &str) -> Option<Qualifier> {
    match terms(record).last() {
        Some(SpfTerm::All(q)) => Some(q),
        _ => None,
    }
}

/// Host part of an `a`/`mx` value, without a `/cidr` suffix.
pub fn host_of(value: &str) -> &str {
    value.split('/').next().unwrap_or(value)
}
