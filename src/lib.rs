//! mail_spoof library: SPF and DMARC spoofability scanning
//!
//! This library checks a domain's SPF and DMARC records for weaknesses that
//! let third parties send mail the domain's receivers will accept: permissive
//! `all` qualifiers, SPF chains exceeding the 10-lookup limit, include chains
//! that reference domains anyone could register, and lax or partially applied
//! DMARC policies.
//!
//! # Example
//!
//! ```no_run
//! use mail_spoof::{run_scan, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domains: vec!["example.com".to_string()],
//!     max_concurrency: 20,
//!     ..Default::default()
//! };
//!
//! let report = run_scan(config).await?;
//! for result in &report.results {
//!     println!("{}: {} issues", result.domain, result.issues.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Single domains can be scanned without the batch runner by building a
//! `Scanner` over any `TxtFetcher` and `RegistrationChecker`.
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod dmarc;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod export;
pub mod findings;
pub mod initialization;
mod run;
pub mod scan;
pub mod spf;
pub mod whois;

#[cfg(test)]
mod test_helpers;

// Re-export public API
pub use config::{Config, ConfigValidationError, LogFormat, LogLevel, Opt};
pub use dns::{DnsTxtFetcher, TxtFetcher};
pub use error_handling::{
    FetchError, InitializationError, RegistrationError, ScanError, SpfChainError,
};
pub use findings::{Finding, FindingKind};
pub use run::{run_scan, scan_domains, ScanReport};
pub use scan::{ScanResult, Scanner};
pub use whois::{RegistrationChecker, WhoApiClient};
