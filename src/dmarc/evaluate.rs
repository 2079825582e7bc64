//! DMARC policy evaluation.

use log::{debug, warn};

use crate::config::{DMARC_LABEL, DMARC_PREFIX};
use crate::dmarc::tags::{is_enforcing_policy, parse_tags};
use crate::dns::TxtFetcher;
use crate::error_handling::{FetchError, ScanError};
use crate::findings::{Finding, FindingKind};

/// Produces DMARC findings for a domain.
pub struct DmarcEvaluator<'a, F> {
    fetcher: &'a F,
}

impl<'a, F: TxtFetcher> DmarcEvaluator<'a, F> {
    /// Creates an evaluator querying through `fetcher`.
    pub fn new(fetcher: &'a F) -> Self {
        Self { fetcher }
    }

    /// Evaluates the record published at `_dmarc.<domain>`.
    ///
    /// A missing record (including NXDOMAIN at the `_dmarc` label) yields
    /// `NO_DMARC`; a timeout yields `DNS_TIMEOUT` for `domain`. Otherwise
    /// findings follow tag order in the record.
    ///
    /// # Errors
    ///
    /// `ScanError` for resolver failures that have no finding of their own.
    pub async fn evaluate(&self, domain: &str) -> Result<Vec<Finding>, ScanError> {
        let dmarc_domain = format!("{DMARC_LABEL}.{domain}");
        debug!("checking DMARC for {domain} at {dmarc_domain}");

        let record = match self.fetcher.fetch(&dmarc_domain, DMARC_PREFIX).await {
            Ok(record) => record,
            Err(FetchError::NotFound { .. })
            | Err(FetchError::NoRecords(_))
            | Err(FetchError::NameResolution(_)) => {
                debug!("no DMARC record for {domain}");
                return Ok(vec![Finding::plain(FindingKind::NoDmarc)]);
            }
            Err(FetchError::Timeout(_)) => {
                warn!("dns timeout for {dmarc_domain}");
                return Ok(vec![Finding::dns_timeout(domain)]);
            }
            Err(e @ FetchError::Resolver { .. }) => return Err(e.into()),
        };

        Ok(evaluate_record(domain, &record))
    }
}

fn evaluate_record(domain: &str, record: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for tag in parse_tags(record) {
        match tag.tag {
            "p" if !is_enforcing_policy(tag.value) => {
                findings.push(Finding::dmarc_lax_policy(tag.value));
            }
            "sp" if !is_enforcing_policy(tag.value) => {
                findings.push(Finding::dmarc_lax_subdomain_policy(tag.value));
            }
            "pct" => match tag.value.parse::<i64>() {
                Ok(pct) if pct < 100 => findings.push(Finding::dmarc_partial_pct(tag.value)),
                Ok(_) => {}
                Err(e) => debug!("ignoring malformed pct '{}' for {domain}: {e}", tag.value),
            },
            _ => {}
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::MockFetcher;

    fn codes(findings: &[Finding]) -> Vec<u32> {
        findings.iter().map(|f| f.code).collect()
    }

    async fn evaluate_with(record: &str) -> Vec<Finding> {
        let fetcher = MockFetcher::new();
        fetcher.add_txt("_dmarc.acme.com", &[record]);
        DmarcEvaluator::new(&fetcher)
            .evaluate("acme.com")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_lax_policy_and_partial_pct() {
        let findings = evaluate_with("v=DMARC1; p=none; pct=50").await;
        assert_eq!(
            codes(&findings),
            vec![
                FindingKind::DmarcLaxPolicy.code(),
                FindingKind::DmarcNot100Pct.code()
            ]
        );
        assert!(findings[0].detail.contains("none"));
        assert!(findings[1].detail.contains("50"));
    }

    #[tokio::test]
    async fn test_enforcing_policy_is_clean() {
        assert!(evaluate_with("v=DMARC1; p=reject; rua=mailto:d@acme.com")
            .await
            .is_empty());
        assert!(evaluate_with("v=DMARC1; p=QUARANTINE; pct=100")
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_lax_subdomain_policy_only() {
        let findings = evaluate_with("v=DMARC1; p=reject; sp=none").await;
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is(FindingKind::DmarcLaxSubdomainPolicy));
        assert!(findings[0].detail.contains("none"));
    }

    #[tokio::test]
    async fn test_absent_sp_inherits() {
        let findings = evaluate_with("v=DMARC1; p=quarantine").await;
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_pct_is_skipped() {
        let findings = evaluate_with("v=DMARC1; p=none; pct=abc").await;
        assert_eq!(codes(&findings), vec![FindingKind::DmarcLaxPolicy.code()]);
    }

    #[tokio::test]
    async fn test_missing_record() {
        let fetcher = MockFetcher::new();
        fetcher.add_txt("_dmarc.acme.com", &["some-other-verification=1"]);
        let findings = DmarcEvaluator::new(&fetcher)
            .evaluate("acme.com")
            .await
            .unwrap();
        assert_eq!(findings, vec![Finding::plain(FindingKind::NoDmarc)]);
    }

    #[tokio::test]
    async fn test_nxdomain_at_label_is_missing_record() {
        let fetcher = MockFetcher::new();
        let findings = DmarcEvaluator::new(&fetcher)
            .evaluate("acme.com")
            .await
            .unwrap();
        assert_eq!(findings, vec![Finding::plain(FindingKind::NoDmarc)]);
        assert_eq!(fetcher.query_count("_dmarc.acme.com"), 1);
    }

    #[tokio::test]
    async fn test_timeout_names_the_domain() {
        let fetcher = MockFetcher::new();
        fetcher.set_error(
            "_dmarc.acme.com",
            FetchError::Timeout("_dmarc.acme.com".into()),
        );
        let findings = DmarcEvaluator::new(&fetcher)
            .evaluate("acme.com")
            .await
            .unwrap();
        assert_eq!(findings, vec![Finding::dns_timeout("acme.com")]);
    }

    #[tokio::test]
    async fn test_resolver_failure_is_an_error() {
        let fetcher = MockFetcher::new();
        fetcher.set_error(
            "_dmarc.acme.com",
            FetchError::Resolver {
                domain: "_dmarc.acme.com".into(),
                message: "servfail".into(),
            },
        );
        assert!(DmarcEvaluator::new(&fetcher)
            .evaluate("acme.com")
            .await
            .is_err());
    }
}
