//! Batch helpers used by `run_scan`: input loading, progress and statistics logging.

pub mod input;
pub mod logging;
pub mod statistics;

// Re-export public API
pub use input::{load_domains, parse_domain_list, validate_domain};
pub use logging::log_progress;
pub use statistics::{count_findings, log_finding_statistics};
