use std::time::Duration;

/// Wait between attempts.
#[derive(Clone, Debug)]
pub enum Backoff {
    /// The same pause before every retry.
    Fixed(Duration),
    /// `base * factor^attempt`, never longer than `max`.
    Exponential {
        base: Duration,
        factor: f64,
        max: Duration,
    },
}

impl Backoff {
    pub(crate) fn delay(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Fixed(d) => *d,
            Backoff::Exponential { base, factor, max } => {
                let exp = i32::try_from(attempt).unwrap_or(i32::MAX);
                let secs = base.as_secs_f64() * factor.powi(exp);
                if !secs.is_finite() || secs >= max.as_secs_f64() {
                    *max
                } else {
                    Duration::from_secs_f64(secs)
                }
            }
        }
    }
}

/// When and how a listing request is retried.
///
/// Listing pages have always been fetched without retries, so the default is
/// disabled; turn it on with [`RetryConfig::enabled`] and the client builder.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    pub enabled: bool,
    /// Retries after the first attempt; a request is sent at most `max_retries + 1` times.
    pub max_retries: u32,
    pub backoff: Backoff,
    /// Response statuses worth another attempt (rate limiting, gateway and server errors).
    pub retry_on_status: Vec<u16>,
    pub retry_on_timeout: bool,
    pub retry_on_connect: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_retries: 2,
            backoff: Backoff::Exponential {
                base: Duration::from_millis(500),
                factor: 2.0,
                max: Duration::from_secs(5),
            },
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
            retry_on_timeout: true,
            retry_on_connect: true,
        }
    }
}

impl RetryConfig {
    /// The default policy with retries switched on.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub(crate) fn should_retry_status(&self, status: u16) -> bool {
        self.enabled && self.retry_on_status.contains(&status)
    }

    pub(crate) fn should_retry_error(&self, err: &reqwest::Error) -> bool {
        self.enabled
            && ((self.retry_on_timeout && err.is_timeout())
                || (self.retry_on_connect && err.is_connect()))
    }
}

/// Defines how a load interacts with the in-memory dataset cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Read from the cache if a fresh value is present; otherwise run the pipeline
    /// and store the result. (Default)
    #[default]
    Use,
    /// Always run the pipeline, bypassing any cached value, and store the new result.
    Refresh,
    /// Always run the pipeline and neither read from nor write to the cache.
    Bypass,
}
