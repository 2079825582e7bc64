//! Per-domain scan orchestration.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::dmarc::DmarcEvaluator;
use crate::dns::TxtFetcher;
use crate::findings::Finding;
use crate::spf::SpfEvaluator;
use crate::whois::{RegistrationChecker, WhoApiClient};

/// Findings for one scanned domain, as written to the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// The domain as given on input.
    pub domain: String,
    /// SPF findings followed by DMARC findings.
    pub issues: Vec<Finding>,
}

/// Runs the SPF and DMARC evaluators for a domain.
///
/// Holds no per-domain state, so one `Scanner` can be shared (behind an `Arc`)
/// by every concurrent scan task.
pub struct Scanner<F, R = WhoApiClient> {
    fetcher: F,
    registry: Option<R>,
}

impl<F, R> Scanner<F, R>
where
    F: TxtFetcher,
    R: RegistrationChecker,
{
    /// Creates a scanner. Without a `registry` the unregistered-domain check is skipped.
    pub fn new(fetcher: F, registry: Option<R>) -> Self {
        Self { fetcher, registry }
    }

    /// Returns SPF findings followed by DMARC findings for `domain`.
    ///
    /// An evaluator that fails is logged and contributes no findings; the
    /// other one still runs.
    pub async fn scan(&self, domain: &str) -> Vec<Finding> {
        let mut findings = match SpfEvaluator::new(&self.fetcher, self.registry.as_ref())
            .evaluate(domain)
            .await
        {
            Ok(findings) => findings,
            Err(e) => {
                warn!("SPF evaluation failed for {domain}: {e}");
                Vec::new()
            }
        };

        match DmarcEvaluator::new(&self.fetcher).evaluate(domain).await {
            Ok(dmarc) => findings.extend(dmarc),
            Err(e) => warn!("DMARC evaluation failed for {domain}: {e}"),
        }

        findings
    }

    /// Like `scan`, paired with the domain.
    pub async fn scan_result(&self, domain: &str) -> ScanResult {
        ScanResult {
            domain: domain.to_string(),
            issues: self.scan(domain).await,
        }
    }
}
