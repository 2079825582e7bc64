//! SPF policy evaluation.

use std::collections::BTreeSet;

use log::{debug, error, info, warn};

use crate::config::{SPF_LOOKUP_LIMIT, SPF_PREFIX};
use crate::dns::TxtFetcher;
use crate::error_handling::{FetchError, ScanError, SpfChainError};
use crate::findings::{Finding, FindingKind};
use crate::spf::resolver::{strip_embedded_quotes, SpfChainResolver};
use crate::spf::term::{all_qualifier, Qualifier};
use crate::whois::RegistrationChecker;

/// Produces SPF findings for a domain.
pub struct SpfEvaluator<'a, F, R> {
    fetcher: &'a F,
    registry: Option<&'a R>,
}

impl<'a, F, R> SpfEvaluator<'a, F, R>
where
    F: TxtFetcher,
    R: RegistrationChecker,
{
    /// `registry` is `None` when no registration-check credential is configured.
    pub fn new(fetcher: &'a F, registry: Option<&'a R>) -> Self {
        Self { fetcher, registry }
    }

    /// Evaluates `domain`'s SPF record.
    ///
    /// Findings come in a fixed order: lookup cost, unregistered domains,
    /// `all` mechanism. A missing, non-existent or timed-out record and a
    /// self-referencing chain each yield exactly one finding.
    ///
    /// # Errors
    ///
    /// `ScanError` for resolver failures that have no finding of their own.
    pub async fn evaluate(&self, domain: &str) -> Result<Vec<Finding>, ScanError> {
        debug!("checking SPF for {domain}");

        let record = match self.fetcher.fetch(domain, SPF_PREFIX).await {
            // Large records arrive split across quoted segments
            Ok(record) => strip_embedded_quotes(&record),
            Err(FetchError::NotFound { .. }) | Err(FetchError::NoRecords(_)) => {
                debug!("no SPF record for {domain}");
                return Ok(vec![Finding::plain(FindingKind::NoSpf)]);
            }
            Err(FetchError::NameResolution(_)) => {
                debug!("non-existent domain {domain}");
                return Ok(vec![Finding::nx_domain(domain)]);
            }
            Err(FetchError::Timeout(_)) => {
                warn!("dns timeout for {domain}");
                return Ok(vec![Finding::dns_timeout(domain)]);
            }
            Err(e @ FetchError::Resolver { .. }) => return Err(e.into()),
        };

        let chain = match SpfChainResolver::new(self.fetcher)
            .resolve_record(domain, &record)
            .await
        {
            Ok(chain) => chain,
            Err(SpfChainError::SelfReference { value, .. }) => {
                info!("recursive SPF include in {domain}: {value}");
                return Ok(vec![Finding::spf_recurse(domain, &value)]);
            }
        };

        let mut findings = Vec::new();

        if chain.lookup_count > SPF_LOOKUP_LIMIT {
            debug!(
                "{domain} needs {} SPF lookups (limit {SPF_LOOKUP_LIMIT})",
                chain.lookup_count
            );
            findings.push(Finding::plain(FindingKind::SpfLookupError));
        }

        if let Some(registry) = self.registry {
            let unregistered =
                find_unregistered(registry, &chain.referenced_root_domains).await;
            if !unregistered.is_empty() {
                findings.push(Finding::unregistered_domains(&unregistered));
            }
        }

        match all_qualifier(&record) {
            None => findings.push(Finding::plain(FindingKind::SpfNoAll)),
            Some(Qualifier::Pass) => findings.push(Finding::plain(FindingKind::SpfPassAll)),
            Some(Qualifier::SoftFail) => {
                findings.push(Finding::plain(FindingKind::SpfSoftFailAll))
            }
            Some(Qualifier::Fail) | Some(Qualifier::Neutral) => {}
        }

        Ok(findings)
    }
}

/// Queries every domain's registration status, keeping the ones that are free.
///
/// Lookup failures are logged and the domain is skipped.
async fn find_unregistered<R: RegistrationChecker>(
    registry: &R,
    domains: &BTreeSet<String>,
) -> BTreeSet<String> {
    let mut unregistered = BTreeSet::new();
    for domain in domains {
        match registry.is_registered(domain).await {
            Ok(true) => {}
            Ok(false) => {
                info!("found unregistered domain {domain}");
                unregistered.insert(domain.clone());
            }
            Err(e) => error!("registration check failed for {domain}: {e}"),
        }
    }
    unregistered
}
