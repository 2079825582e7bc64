//! Shared resource setup for a scan run.
//!
//! - Logger (`env_logger`, plain or JSON)
//! - DNS resolver
//! - HTTP client for registration lookups
//! - Concurrency semaphore

mod client;
mod logger;
mod resolver;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Creates the semaphore that bounds how many domains are scanned at once.
///
/// A `count` of zero is raised to one so the run can make progress.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.max(1)))
}
