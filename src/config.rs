//! Environment-driven settings for the `insider-report` binary.

use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::core::{IcClient, IcError, Timeframe};
use crate::feed::{DATASET_TTL, DEFAULT_PAGES, FailurePolicy, InsiderFeed};

#[derive(Debug, Clone)]
pub struct Settings {
    /// Listing URL override (`IC_BASE_URL`).
    pub base_url: Option<Url>,
    /// Request timeout (`IC_TIMEOUT_SECS`).
    pub timeout: Option<Duration>,
    /// Pages to fetch (`IC_PAGES`).
    pub pages: u32,
    /// Minimum transaction amount (`IC_MIN_AMOUNT`).
    pub min_amount: u64,
    /// Reporting window (`IC_TIMEFRAME`: d, w, m, q).
    pub timeframe: Timeframe,
    /// Dataset freshness window (`IC_CACHE_TTL_SECS`).
    pub cache_ttl: Duration,
    /// Page requests in flight (`IC_CONCURRENCY`).
    pub concurrency: usize,
    /// Skip pages that fail to download (`IC_BEST_EFFORT=1`).
    pub best_effort: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: None,
            pages: DEFAULT_PAGES,
            min_amount: 25_000,
            timeframe: Timeframe::Quarter,
            cache_ttl: DATASET_TTL,
            concurrency: 1,
            best_effort: false,
        }
    }
}

fn var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed<T: FromStr>(name: &str) -> Result<Option<T>, IcError> {
    var(name)
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| IcError::Config(format!("{name} has an invalid value: {v:?}")))
        })
        .transpose()
}

impl Settings {
    /// Read settings from the environment, loading a `.env` file first if present.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`IcError::Config`] when a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, IcError> {
        dotenv::dotenv().ok();
        let d = Self::default();

        let base_url = var("IC_BASE_URL")
            .map(|v| {
                Url::parse(&v).map_err(|e| IcError::Config(format!("IC_BASE_URL: {e}")))
            })
            .transpose()?;

        let timeframe = match var("IC_TIMEFRAME") {
            Some(v) => v
                .parse::<Timeframe>()
                .map_err(|e| IcError::Config(format!("IC_TIMEFRAME: {e}")))?,
            None => d.timeframe,
        };

        Ok(Self {
            base_url,
            timeout: parsed::<u64>("IC_TIMEOUT_SECS")?.map(Duration::from_secs),
            pages: parsed("IC_PAGES")?.unwrap_or(d.pages),
            min_amount: parsed("IC_MIN_AMOUNT")?.unwrap_or(d.min_amount),
            timeframe,
            cache_ttl: parsed::<u64>("IC_CACHE_TTL_SECS")?
                .map_or(d.cache_ttl, Duration::from_secs),
            concurrency: parsed("IC_CONCURRENCY")?.unwrap_or(d.concurrency),
            best_effort: var("IC_BEST_EFFORT").is_some_and(|v| v == "1" || v == "true"),
        })
    }

    /// Build the HTTP client these settings describe.
    ///
    /// # Errors
    ///
    /// Propagates client construction failures.
    pub fn client(&self) -> Result<IcClient, IcError> {
        let mut b = IcClient::builder();
        if let Some(u) = &self.base_url {
            b = b.base_listing(u.clone());
        }
        if let Some(t) = self.timeout {
            b = b.timeout(t);
        }
        b.build()
    }

    /// Build a feed over `client` with these settings.
    pub fn feed(&self, client: &IcClient) -> InsiderFeed {
        InsiderFeed::new(client)
            .pages(self.pages)
            .min_amount(self.min_amount)
            .timeframe(self.timeframe)
            .concurrency(self.concurrency)
            .ttl(self.cache_ttl)
            .failure_policy(if self.best_effort {
                FailurePolicy::BestEffort
            } else {
                FailurePolicy::Abort
            })
    }
}
