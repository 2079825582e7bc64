//! Domain registration checks.
//!
//! An unregistered domain referenced from an SPF chain can be bought by anyone,
//! who then controls part of the sender's SPF policy. The scanner asks a
//! `RegistrationChecker` about every root domain in the chain; the production
//! implementation queries WhoAPI's `r=taken` endpoint.

mod types;

use std::future::Future;

use crate::error_handling::RegistrationError;
use types::WhoApiResponse;

/// Answers whether a domain is currently registered.
pub trait RegistrationChecker: Send + Sync {
    /// Returns `true` if `domain` is registered (taken).
    fn is_registered(
        &self,
        domain: &str,
    ) -> impl Future<Output = Result<bool, RegistrationError>> + Send;
}

/// WhoAPI client.
///
/// The API key is handed over at construction; nothing is read from the
/// environment here.
#[derive(Clone)]
pub struct WhoApiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl WhoApiClient {
    /// Creates a client for `endpoint` (normally `https://api.whoapi.com/`).
    ///
    /// The request timeout is configured on `client`.
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

impl RegistrationChecker for WhoApiClient {
    async fn is_registered(&self, domain: &str) -> Result<bool, RegistrationError> {
        log::debug!("checking registration status of {domain}");

        let response: WhoApiResponse = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("domain", domain),
                ("r", "taken"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.is_ok() {
            return Err(RegistrationError::Service(response.error_description()));
        }
        response
            .taken()
            .ok_or_else(|| RegistrationError::MissingField(domain.to_string()))
    }
}
