//! Public client surface + builder.
//! Internals are split into `constants` (UA + defaults) and `retry` (policy + cache mode).

mod constants;
mod retry;

pub use retry::{Backoff, CacheMode, RetryConfig};

use crate::core::IcError;
use constants::{
    DEFAULT_BASE_LISTING, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, USER_AGENT,
};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use url::Url;

/// HTTP client for the insider listing.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct IcClient {
    http: Client,
    base_listing: Url,
    retry: RetryConfig,
}

impl Default for IcClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl IcClient {
    /// Create a new builder.
    pub fn builder() -> IcClientBuilder {
        IcClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_listing(&self) -> &Url {
        &self.base_listing
    }

    /// The retry policy requests use unless a call overrides it.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Send a request, retrying per the effective policy.
    ///
    /// Returns the final response even when its status is not a success; callers map
    /// non-2xx statuses to [`IcError::Status`] with the URL they requested.
    pub(crate) async fn send_with_retry(
        &self,
        req: RequestBuilder,
        retry_override: Option<&RetryConfig>,
    ) -> Result<Response, IcError> {
        let cfg = retry_override.unwrap_or(&self.retry);
        let mut attempt = 0u32;

        loop {
            let this_try = req
                .try_clone()
                .ok_or_else(|| IcError::InvalidParams("request body is not cloneable".into()))?;

            match this_try.send().await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if attempt < cfg.max_retries && cfg.should_retry_status(status) {
                        let wait = cfg.backoff.delay(attempt);
                        tracing::debug!(status, attempt, ?wait, "retrying after status");
                        tokio::time::sleep(wait).await;
                        attempt += 1;
                        continue;
                    }
                    return Ok(resp);
                }
                Err(e) => {
                    if attempt < cfg.max_retries && cfg.should_retry_error(&e) {
                        let wait = cfg.backoff.delay(attempt);
                        tracing::debug!(error = %e, attempt, ?wait, "retrying after transport error");
                        tokio::time::sleep(wait).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(IcError::Http(e));
                }
            }
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct IcClientBuilder {
    user_agent: Option<String>,
    base_listing: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: Option<RetryConfig>,
}

impl IcClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the listing page URL (e.g., `https://www.dataroma.com/m/ins/ins.php`).
    pub fn base_listing(mut self, url: Url) -> Self {
        self.base_listing = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: 30 seconds.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: 10 seconds.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Set the retry policy. Default: retries disabled.
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    pub fn build(self) -> Result<IcClient, IcError> {
        let base_listing = match self.base_listing {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_LISTING)?,
        };

        let http = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .timeout(
                self.timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            )
            .connect_timeout(
                self.connect_timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
            )
            .build()?;

        Ok(IcClient {
            http,
            base_listing,
            retry: self.retry.unwrap_or_default(),
        })
    }
}
