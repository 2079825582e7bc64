//! SPF include-chain resolution.
//!
//! Walks a record's `include` mechanisms, counting the DNS lookups a receiver
//! would perform and collecting the registered domains the policy depends on.
//! This is a cost estimate, not RFC 7208 evaluation: dead branches are
//! dropped silently and nothing is matched against an IP.

use std::collections::{BTreeSet, HashMap, HashSet};

use log::{debug, warn};

use crate::config::{SPF_MAX_COUNTED_LOOKUPS, SPF_PREFIX};
use crate::dns::TxtFetcher;
use crate::domain::{normalize_domain, registered_domain, same_domain};
use crate::error_handling::{FetchError, SpfChainError};
use crate::spf::term::{host_of, terms, Mechanism, SpfTerm};

/// Result of resolving an SPF chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpfChain {
    /// Registered domains named by `include`, `a` and `mx` anywhere in the chain.
    pub referenced_root_domains: BTreeSet<String>,
    /// DNS-querying mechanisms encountered anywhere in the chain.
    pub lookup_count: usize,
}

/// Accumulator for one resolution. Owned by a single `resolve` call.
#[derive(Debug, Default)]
pub struct ResolutionState {
    /// Domains on the branch currently being expanded, root included
    pub visited_includes: HashSet<String>,
    /// Running lookup cost
    pub lookup_count: usize,
    /// Registered domains seen so far
    pub referenced_root_domains: BTreeSet<String>,
}

impl ResolutionState {
    /// Starts a resolution rooted at `root_domain`.
    pub fn new(root_domain: &str) -> Self {
        let mut state = Self::default();
        state.visited_includes.insert(normalize_domain(root_domain));
        state
    }

    /// Accounts for every term of `domain`'s record.
    ///
    /// Returns every included domain, normalized, in record order.
    ///
    /// # Errors
    ///
    /// `SpfChainError::SelfReference` if any mechanism value equals `domain`.
    pub fn expand_record(
        &mut self,
        domain: &str,
        record: &str,
    ) -> Result<Vec<String>, SpfChainError> {
        let mut includes = Vec::new();

        for term in terms(record) {
            let SpfTerm::Mechanism { mechanism, value } = term else {
                continue;
            };

            if same_domain(value, domain) {
                return Err(SpfChainError::SelfReference {
                    domain: domain.to_string(),
                    value: value.to_string(),
                });
            }

            self.lookup_count += mechanism.lookup_cost();
            if mechanism.references_domain() {
                self.referenced_root_domains
                    .insert(registered_domain(host_of(value)));
            }
            if mechanism == Mechanism::Include {
                includes.push(normalize_domain(value));
            }
        }

        Ok(includes)
    }

    /// Finishes the resolution.
    pub fn into_chain(self) -> SpfChain {
        SpfChain {
            referenced_root_domains: self.referenced_root_domains,
            lookup_count: self.lookup_count,
        }
    }
}

/// Resolves SPF include chains through a `TxtFetcher`.
pub struct SpfChainResolver<'a, F> {
    fetcher: &'a F,
}

impl<'a, F: TxtFetcher> SpfChainResolver<'a, F> {
    /// Creates a resolver querying through `fetcher`.
    pub fn new(fetcher: &'a F) -> Self {
        Self { fetcher }
    }

    /// Fetches `root_domain`'s SPF record and resolves its chain.
    ///
    /// A root without a reachable record yields an empty chain.
    pub async fn resolve(&self, root_domain: &str) -> Result<SpfChain, SpfChainError> {
        match self.fetcher.fetch(root_domain, SPF_PREFIX).await {
            Ok(record) => self.resolve_record(root_domain, &record).await,
            Err(e) => {
                log_dead_branch(root_domain, &e);
                Ok(SpfChain::default())
            }
        }
    }

    /// Resolves the chain of an already fetched root record.
    pub async fn resolve_record(
        &self,
        root_domain: &str,
        record: &str,
    ) -> Result<SpfChain, SpfChainError> {
        let mut state = ResolutionState::new(root_domain);
        let root_includes = state.expand_record(root_domain, &strip_embedded_quotes(record))?;
        let mut branch = vec![(normalize_domain(root_domain), root_includes.into_iter())];
        // Shared includes are expanded once per branch but queried once
        let mut records: HashMap<String, Option<String>> = HashMap::new();

        loop {
            let next = match branch.last_mut() {
                Some((_, includes)) => includes.next(),
                None => break,
            };
            let Some(include) = next else {
                if let Some((finished, _)) = branch.pop() {
                    state.visited_includes.remove(&finished);
                }
                continue;
            };

            if state.visited_includes.contains(&include) {
                debug!("include cycle through {include}, not expanding again");
                continue;
            }
            if state.lookup_count > SPF_MAX_COUNTED_LOOKUPS {
                warn!("SPF chain of {root_domain} exceeds {SPF_MAX_COUNTED_LOOKUPS} lookups, stopping");
                break;
            }

            let record = match records.get(&include) {
                Some(cached) => cached.clone(),
                None => {
                    let fetched = match self.fetcher.fetch(&include, SPF_PREFIX).await {
                        Ok(record) => Some(strip_embedded_quotes(&record)),
                        Err(e) => {
                            log_dead_branch(&include, &e);
                            None
                        }
                    };
                    records.insert(include.clone(), fetched.clone());
                    fetched
                }
            };
            let Some(record) = record else {
                continue;
            };

            let includes = state.expand_record(&include, &record)?;
            state.visited_includes.insert(include.clone());
            branch.push((include, includes.into_iter()));
        }

        debug!(
            "SPF chain of {root_domain}: {} lookups, {} referenced domains",
            state.lookup_count,
            state.referenced_root_domains.len()
        );
        Ok(state.into_chain())
    }
}

/// Removes the quote characters left between split TXT segments.
pub fn strip_embedded_quotes(record: &str) -> String {
    record.replace('"', "")
}

fn log_dead_branch(domain: &str, e: &FetchError) {
    match e {
        FetchError::Timeout(_) => warn!("dns timeout for {domain}, skipping include"),
        _ => debug!("no usable SPF record for {domain}: {e}"),
    }
}
