//! Batch scan entry point.

mod task;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{info, warn};

use crate::app::{count_findings, load_domains, log_finding_statistics, log_progress};
use crate::config::{Config, LOGGING_INTERVAL};
use crate::dns::{DnsTxtFetcher, TxtFetcher};
use crate::export::write_results;
use crate::initialization::{init_client, init_resolver, init_semaphore};
use crate::scan::{ScanResult, Scanner};
use crate::whois::{RegistrationChecker, WhoApiClient};

use task::scan_domain_task;

/// Results of a batch scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// One entry per scanned domain, in input order
    pub results: Vec<ScanResult>,
    /// Number of domains scanned
    pub total_domains: usize,
    /// Number of domains with at least one finding
    pub domains_with_findings: usize,
    /// Finding count per finding code
    pub findings_by_code: BTreeMap<u32, usize>,
    /// Where the JSON results were written (`-` for stdout)
    pub output: PathBuf,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Scans every configured domain and writes the JSON results.
///
/// Domains are scanned concurrently, at most `config.max_concurrency` at a
/// time, sharing one resolver and one `Scanner`. Registration checks run only
/// when `config.whoapi_key` is set.
///
/// # Errors
///
/// Fails on invalid configuration, an unreadable input list, resolver or HTTP
/// client setup failure, or when the output cannot be written. Problems with
/// individual domains never fail the run.
///
/// # Example
///
/// ```no_run
/// use mail_spoof::{run_scan, Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     domains: vec!["example.com".to_string()],
///     ..Default::default()
/// };
/// let report = run_scan(config).await?;
/// println!("{} of {} domains have findings", report.domains_with_findings, report.total_domains);
/// # Ok(())
/// # }
/// ```
pub async fn run_scan(config: Config) -> Result<ScanReport> {
    config.validate().context("Invalid configuration")?;

    let start_time = Instant::now();
    let domains = load_domains(&config).await?;
    if domains.is_empty() {
        warn!("No domains to scan");
    }

    let timeout = config.timeout();
    let resolver =
        init_resolver(timeout, &config.nameservers).context("Failed to initialize DNS resolver")?;
    let fetcher = DnsTxtFetcher::new(resolver, timeout);

    let registry = match config.whoapi_key.as_deref() {
        Some(key) => {
            let client = init_client(timeout).context("Failed to initialize HTTP client")?;
            info!("Registration checks enabled ({})", config.whoapi_endpoint);
            Some(WhoApiClient::new(client, config.whoapi_endpoint.clone(), key))
        }
        None => {
            info!("No WhoAPI key configured, skipping registration checks");
            None
        }
    };

    let scanner = Arc::new(Scanner::new(fetcher, registry));
    let results = scan_domains(scanner, domains, config.max_concurrency).await;

    write_results(&config.output, &results)
        .await
        .context("Failed to write results")?;

    let findings_by_code = count_findings(&results);
    log_finding_statistics(&findings_by_code);

    Ok(ScanReport {
        total_domains: results.len(),
        domains_with_findings: results.iter().filter(|r| !r.issues.is_empty()).count(),
        findings_by_code,
        results,
        output: config.output,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}

/// Scans `domains` with at most `max_concurrency` in flight.
///
/// Results come back in input order. A task that panics is logged and its
/// domain is left out.
pub async fn scan_domains<F, R>(
    scanner: Arc<Scanner<F, R>>,
    domains: Vec<String>,
    max_concurrency: usize,
) -> Vec<ScanResult>
where
    F: TxtFetcher + 'static,
    R: RegistrationChecker + 'static,
{
    let total = domains.len();
    let start_time = Instant::now();
    let semaphore = init_semaphore(max_concurrency);
    let mut tasks = FuturesUnordered::new();

    for (index, domain) in domains.into_iter().enumerate() {
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Semaphore closed, skipping domain: {domain}");
                continue;
            }
        };
        let scanner = Arc::clone(&scanner);
        tasks.push(tokio::spawn(scan_domain_task(index, domain, scanner, permit)));
    }

    let mut indexed = Vec::with_capacity(total);
    while let Some(task_result) = tasks.next().await {
        match task_result {
            Ok(entry) => indexed.push(entry),
            Err(join_error) => warn!("Scan task panicked: {join_error:?}"),
        }
        let completed = indexed.len();
        if completed % LOGGING_INTERVAL == 0 {
            log_progress(start_time, completed, total);
        }
    }
    log_progress(start_time, indexed.len(), total);

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, result)| result).collect()
}
