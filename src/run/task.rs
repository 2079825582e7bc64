//! Per-domain scan task.

use std::sync::Arc;
use std::time::Instant;

use log::debug;
use tokio::sync::OwnedSemaphorePermit;

use crate::dns::TxtFetcher;
use crate::scan::{ScanResult, Scanner};
use crate::whois::RegistrationChecker;

/// Scans one domain while holding a concurrency permit.
///
/// Returns the domain's input position so results can be put back in order.
pub(crate) async fn scan_domain_task<F, R>(
    index: usize,
    domain: String,
    scanner: Arc<Scanner<F, R>>,
    _permit: OwnedSemaphorePermit,
) -> (usize, ScanResult)
where
    F: TxtFetcher,
    R: RegistrationChecker,
{
    let started = Instant::now();
    let result = scanner.scan_result(&domain).await;
    debug!(
        "{domain}: {} findings in {:.2}s",
        result.issues.len(),
        started.elapsed().as_secs_f64()
    );
    (index, result)
}
