//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

/// Builds the HTTP client used for registration lookups.
///
/// Every request, including connection setup, is bounded by `timeout`.
///
/// # Errors
///
/// Returns a `reqwest::Error` if the TLS backend cannot be initialized.
pub fn init_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
