//! HTTP client for product pages and the storefront GraphQL endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::types::GraphQlResponse;

/// HTTP client shared by every stage of a batch run.
///
/// Page fetches and stock queries retry transient errors (network failures,
/// 429, 5xx) up to `max_retries` additional attempts. Catalog lookups go
/// through [`Self::send_graphql`] and are attempted once.
pub struct StoreClient {
    pub(crate) client: Client,
    pub(crate) graphql_url: String,
    /// Maximum number of retry attempts after the first failure.
    pub(crate) max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    pub(crate) backoff_base_secs: u64,
}

impl StoreClient {
    /// Creates a `StoreClient` with a per-request timeout, `User-Agent`, and
    /// retry policy.
    ///
    /// `accept_invalid_certs` turns off TLS certificate validation for every
    /// request made by this client, exposing the run to interception. A
    /// warning is logged whenever it is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        graphql_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
        accept_invalid_certs: bool,
    ) -> Result<Self, ScraperError> {
        if accept_invalid_certs {
            tracing::warn!(
                "TLS certificate validation is DISABLED; responses can be intercepted or forged"
            );
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;
        Ok(Self {
            client,
            graphql_url: graphql_url.to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Builds a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn from_config(config: &stockcheck_core::AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.graphql_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
            config.accept_invalid_certs,
        )
    }

    /// Fetches the HTML body of a product page.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::Http`]: network, timeout, or TLS failure.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self
                .client
                .get(url)
                .header(
                    reqwest::header::ACCEPT,
                    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
                )
                .send()
                .await?;
            let response = check_status(response, url)?;
            Ok(response.text().await?)
        })
        .await
    }

    /// Posts a GraphQL operation with retries on transient errors.
    pub(crate) async fn post_graphql<T: DeserializeOwned>(
        &self,
        operation_name: &str,
        query: &str,
        variables: &serde_json::Value,
    ) -> Result<T, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            self.send_graphql(operation_name, query, variables)
        })
        .await
    }

    /// Posts a GraphQL operation once and unwraps the response envelope.
    ///
    /// A response without `data` is reported as [`ScraperError::GraphQl`]
    /// carrying the server's error messages.
    pub(crate) async fn send_graphql<T: DeserializeOwned>(
        &self,
        operation_name: &str,
        query: &str,
        variables: &serde_json::Value,
    ) -> Result<T, ScraperError> {
        let payload = serde_json::json!({
            "query": query,
            "variables": variables,
            "operationName": operation_name,
        });

        let response = self
            .client
            .post(&self.graphql_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await?;
        let response = check_status(response, &self.graphql_url)?;

        let body = response.text().await?;
        let envelope = serde_json::from_str::<GraphQlResponse<T>>(&body).map_err(|e| {
            ScraperError::Deserialize {
                context: format!("{operation_name} response"),
                source: e,
            }
        })?;

        match envelope.data {
            Some(data) => {
                if !envelope.errors.is_empty() {
                    tracing::debug!(
                        operation = operation_name,
                        errors = envelope.errors.len(),
                        "GraphQL returned data alongside errors"
                    );
                }
                Ok(data)
            }
            None => {
                let message = if envelope.errors.is_empty() {
                    "response contained no data".to_owned()
                } else {
                    envelope
                        .errors
                        .iter()
                        .map(|e| e.message.as_str())
                        .collect::<Vec<_>>()
                        .join("; ")
                };
                Err(ScraperError::GraphQl {
                    operation: operation_name.to_owned(),
                    message,
                })
            }
        }
    }
}

/// Maps non-2xx responses to typed errors, passing successful ones through.
fn check_status(
    response: reqwest::Response,
    url: &str,
) -> Result<reqwest::Response, ScraperError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(ScraperError::RateLimited {
            url: url.to_owned(),
            retry_after_secs,
        });
    }

    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
