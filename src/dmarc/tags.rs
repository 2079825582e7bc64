//! DMARC tag-list grammar.

/// One `tag=value` segment of a DMARC record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmarcTag<'a> {
    /// Tag name, e.g. `p`
    pub tag: &'a str,
    /// Tag value, e.g. `reject`
    pub value: &'a str,
}

/// Splits a DMARC record into its tags.
///
/// Segments are separated by `;` and split at their first `=`. Segments
/// without `=` (including the empty one after a trailing `;`) are skipped.
pub fn parse_tags(record: &str) -> Vec<DmarcTag<'_>> {
    record
        .split(';')
        .filter_map(|segment| {
            let (tag, value) = segment.trim().split_once('=')?;
            Some(DmarcTag {
                tag: tag.trim(),
                value: value.trim(),
            })
        })
        .collect()
}

/// True for the policies that make receivers act on failing mail.
pub fn is_enforcing_policy(policy: &str) -> bool {
    policy.eq_ignore_ascii_case("quarantine") || policy.eq_ignore_ascii_case("reject")
}
