//! Prefixed TXT record fetching.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;

use crate::dns::records::{lookup_txt_records, select_prefixed};
use crate::error_handling::FetchError;

/// Fetches the single TXT record of a domain that starts with a given prefix.
///
/// Implemented over DNS by `DnsTxtFetcher`; tests substitute in-memory fetchers.
pub trait TxtFetcher: Send + Sync {
    /// Returns the first TXT value of `domain` starting with `prefix`.
    ///
    /// # Errors
    ///
    /// `FetchError::NotFound` when TXT data exists but none carries the prefix;
    /// otherwise the lookup failure as classified by the implementation.
    fn fetch(
        &self,
        domain: &str,
        prefix: &str,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// `TxtFetcher` backed by a hickory resolver.
#[derive(Clone)]
pub struct DnsTxtFetcher {
    resolver: Arc<TokioAsyncResolver>,
    timeout: Duration,
}

impl DnsTxtFetcher {
    /// Wraps `resolver`; every lookup is abandoned after `timeout`.
    pub fn new(resolver: Arc<TokioAsyncResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }
}

impl TxtFetcher for DnsTxtFetcher {
    async fn fetch(&self, domain: &str, prefix: &str) -> Result<String, FetchError> {
        let txt_records = lookup_txt_records(domain, &self.resolver, self.timeout).await?;
        select_prefixed(&txt_records, prefix).ok_or_else(|| FetchError::NotFound {
            domain: domain.to_string(),
            prefix: prefix.to_string(),
        })
    }
}
