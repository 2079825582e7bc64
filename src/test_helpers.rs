//! In-memory fetcher and registry for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::dns::{select_prefixed, TxtFetcher};
use crate::error_handling::{FetchError, RegistrationError};
use crate::whois::RegistrationChecker;

/// TXT data keyed by domain. Unknown domains behave like NXDOMAIN.
#[derive(Default)]
pub(crate) struct MockFetcher {
    txt: Mutex<HashMap<String, Vec<String>>>,
    errors: Mutex<HashMap<String, FetchError>>,
    queries: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_txt(&self, domain: &str, records: &[&str]) {
        self.txt.lock().unwrap().insert(
            domain.to_lowercase(),
            records.iter().map(|r| r.to_string()).collect(),
        );
    }

    pub(crate) fn set_error(&self, domain: &str, error: FetchError) {
        self.errors
            .lock()
            .unwrap()
            .insert(domain.to_lowercase(), error);
    }

    pub(crate) fn query_count(&self, domain: &str) -> usize {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.as_str() == domain)
            .count()
    }
}

impl TxtFetcher for MockFetcher {
    async fn fetch(&self, domain: &str, prefix: &str) -> Result<String, FetchError> {
        let key = domain.to_lowercase();
        self.queries.lock().unwrap().push(key.clone());

        if let Some(e) = self.errors.lock().unwrap().get(&key) {
            return Err(e.clone());
        }
        let txt = self.txt.lock().unwrap();
        let records = txt
            .get(&key)
            .ok_or_else(|| FetchError::NameResolution(domain.to_string()))?;
        if records.is_empty() {
            return Err(FetchError::NoRecords(domain.to_string()));
        }
        select_prefixed(records, prefix).ok_or_else(|| FetchError::NotFound {
            domain: domain.to_string(),
            prefix: prefix.to_string(),
        })
    }
}

/// Registry where every domain is registered unless listed otherwise.
#[derive(Default)]
pub(crate) struct MockRegistry {
    unregistered: HashSet<String>,
    failing: HashSet<String>,
    checked: Mutex<Vec<String>>,
}

impl MockRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn unregistered(mut self, domain: &str) -> Self {
        self.unregistered.insert(domain.to_string());
        self
    }

    pub(crate) fn failing(mut self, domain: &str) -> Self {
        self.failing.insert(domain.to_string());
        self
    }

    pub(crate) fn checked(&self) -> Vec<String> {
        self.checked.lock().unwrap().clone()
    }
}

impl RegistrationChecker for MockRegistry {
    async fn is_registered(&self, domain: &str) -> Result<bool, RegistrationError> {
        self.checked.lock().unwrap().push(domain.to_string());
        if self.failing.contains(domain) {
            return Err(RegistrationError::Service("Daily limit reached".to_string()));
        }
        Ok(!self.unregistered.contains(domain))
    }
}
