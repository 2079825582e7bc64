//! Shared test doubles for the public fetcher and registry traits.
//!
//! Included with `mod helpers;` by the test files that need them.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mail_spoof::{FetchError, RegistrationChecker, RegistrationError, TxtFetcher};

/// In-memory DNS: TXT values per domain, or a fixed error.
///
/// Domains without an entry answer like NXDOMAIN.
#[derive(Default)]
pub struct ZoneFetcher {
    txt: HashMap<String, Vec<String>>,
    errors: HashMap<String, FetchError>,
    delay: Option<Duration>,
    probe: ConcurrencyProbe,
}

/// Tracks how many fetches overlap. Clones share the counters.
#[derive(Clone, Default)]
pub struct ConcurrencyProbe {
    current: Arc<AtomicUsize>,
    max: Arc<AtomicUsize>,
}

impl ConcurrencyProbe {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.max.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    /// Highest number of fetches that were running at the same time.
    pub fn max(&self) -> usize {
        self.max.load(Ordering::SeqCst)
    }
}

impl ZoneFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn txt(mut self, domain: &str, records: &[&str]) -> Self {
        self.txt.insert(
            domain.to_string(),
            records.iter().map(|r| r.to_string()).collect(),
        );
        self
    }

    pub fn error(mut self, domain: &str, error: FetchError) -> Self {
        self.errors.insert(domain.to_string(), error);
        self
    }

    /// Makes every fetch take `delay`, so concurrent scans overlap.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn probe(&self) -> ConcurrencyProbe {
        self.probe.clone()
    }
}

impl TxtFetcher for ZoneFetcher {
    async fn fetch(&self, domain: &str, prefix: &str) -> Result<String, FetchError> {
        self.probe.enter();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.probe.leave();

        if let Some(e) = self.errors.get(domain) {
            return Err(e.clone());
        }
        let records = self
            .txt
            .get(domain)
            .ok_or_else(|| FetchError::NameResolution(domain.to_string()))?;
        if records.is_empty() {
            return Err(FetchError::NoRecords(domain.to_string()));
        }
        records
            .iter()
            .find(|r| r.starts_with(prefix))
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                domain: domain.to_string(),
                prefix: prefix.to_string(),
            })
    }
}

/// Registry that treats every domain as registered except the listed ones.
#[derive(Default)]
pub struct ListRegistry {
    free: HashSet<String>,
}

impl ListRegistry {
    pub fn with_free(domains: &[&str]) -> Self {
        Self {
            free: domains.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl RegistrationChecker for ListRegistry {
    async fn is_registered(&self, domain: &str) -> Result<bool, RegistrationError> {
        Ok(!self.free.contains(domain))
    }
}
