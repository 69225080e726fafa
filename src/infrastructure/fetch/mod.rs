//! Outbound redirect probe.
//!
//! The redirect service needs to observe redirect responses itself, so the
//! HTTP client never follows them: one GET, and the raw status plus
//! `Location` header come back as-is.

use async_trait::async_trait;
use std::time::Duration;

/// Transport-level probe failure (timeout, DNS, connection refused).
///
/// Callers treat this the same as "not a redirect": there is deliberately no
/// distinction between a definite non-redirect and a transient failure.
#[derive(Debug, thiserror::Error)]
#[error("Redirect probe failed: {0}")]
pub struct FetchError(pub String);

/// What a single non-following GET observed.
#[derive(Debug, Clone)]
pub struct RedirectProbeResponse {
    pub status: u16,
    /// Raw `Location` header value, if the response carried one.
    pub location: Option<String>,
}

/// A single non-following GET against a URL.
///
/// # Implementations
///
/// - [`HttpRedirectFetcher`] - `reqwest`-backed production implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectFetcher: Send + Sync {
    /// Issues the probe.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on any transport failure.
    async fn fetch(&self, url: &str) -> Result<RedirectProbeResponse, FetchError>;
}

/// Production probe with redirect-following disabled and a bounded timeout.
pub struct HttpRedirectFetcher {
    client: reqwest::Client,
}

impl HttpRedirectFetcher {
    /// Builds the probe client.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the underlying client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RedirectFetcher for HttpRedirectFetcher {
    async fn fetch(&self, url: &str) -> Result<RedirectProbeResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError(e.to_string()))?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        Ok(RedirectProbeResponse { status, location })
    }
}
