//! HTTP client wrapper for fetching JSON resources with retry.
//!
//! This module provides the [`HttpClient`] struct used by every provider call.
//! It owns one pooled `reqwest::Client` and the [`RetryPolicy`] applied to
//! each fetch.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::constants::{CONNECT_TIMEOUT_SECS, KEEP_ALIVE_SECS};
use super::error::FetchError;
use super::retry::{RetryDecision, RetryPolicy, classify_error};
use crate::user_agent::browser_headers;

/// HTTP client that fetches and decodes JSON with bounded retries.
///
/// The client is created once and cloned into every task; clones share the
/// same connection pool and configuration.
///
/// # Example
///
/// ```no_run
/// use bird_enricher::fetch::{HttpClient, RetryPolicy};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new(RetryPolicy::default())?;
/// let birds: serde_json::Value = client.fetch_json("https://aves.ninjas.cl/api/birds").await?;
/// println!("{birds}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    retry_policy: RetryPolicy,
}

impl HttpClient {
    /// Creates a client with the default 30 second connect timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the underlying client cannot be built.
    pub fn new(retry_policy: RetryPolicy) -> Result<Self, FetchError> {
        Self::with_connect_timeout(retry_policy, Duration::from_secs(CONNECT_TIMEOUT_SECS))
    }

    /// Creates a client with an explicit connect timeout.
    ///
    /// Certificate verification stays enabled; keep-alive probes run every 30 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the underlying client cannot be built.
    #[instrument(level = "debug", skip(retry_policy))]
    pub fn with_connect_timeout(
        retry_policy: RetryPolicy,
        connect_timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .tcp_keepalive(Duration::from_secs(KEEP_ALIVE_SECS))
            .pool_idle_timeout(Duration::from_secs(KEEP_ALIVE_SECS))
            .default_headers(browser_headers())
            .gzip(true)
            .build()
            .map_err(|source| FetchError::ClientBuild { source })?;

        debug!(
            max_attempts = retry_policy.max_attempts(),
            retry_delay_ms = retry_policy.delay().as_millis(),
            "created HTTP client"
        );

        Ok(Self {
            client,
            retry_policy,
        })
    }

    /// Returns the retry policy applied to every fetch.
    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Fetches `url` and decodes the JSON body into `T`, retrying transient failures.
    ///
    /// Each failed attempt is logged with its attempt number. Decode errors are
    /// returned immediately. Once the attempt budget is spent the last error is
    /// wrapped in [`FetchError::Exhausted`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Exhausted`] after the final transient failure, or
    /// the permanent error ([`FetchError::Decode`], [`FetchError::InvalidUrl`]) as is.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let max_attempts = self.retry_policy.max_attempts();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            debug!(attempt, "attempting fetch");

            let error = match self.fetch_once(url).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            warn!(attempt, max_attempts, error = %error, "fetch attempt failed");

            match self.retry_policy.should_retry(classify_error(&error), attempt) {
                RetryDecision::Retry { delay, .. } => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                RetryDecision::DoNotRetry { reason } => {
                    debug!(%reason, "not retrying fetch");
                    if matches!(error, FetchError::Decode { .. } | FetchError::InvalidUrl { .. }) {
                        return Err(error);
                    }
                    return Err(FetchError::exhausted(url, attempt, error));
                }
            }
        }
    }

    /// Performs a single GET and decode without retrying.
    async fn fetch_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::http_status(url, status.as_u16(), &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::network(url, e))?;

        serde_json::from_str(&body).map_err(|e| FetchError::decode(url, e))
    }
}
