//! Single-slot, time-bounded memo for the fetch-and-normalize pipeline.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::core::client::CacheMode;

#[derive(Debug)]
struct Entry<T> {
    value: Arc<T>,
    stored_at: Instant,
}

/// Holds at most one value and recomputes it once it is older than the caller's TTL.
///
/// The slot lock is held for the whole computation, so concurrent callers that miss
/// wait for the one in-flight computation and then share its result. A failed
/// computation leaves the slot untouched.
#[derive(Debug)]
pub struct TtlCache<T> {
    slot: Mutex<Option<Entry<T>>>,
}

impl<T> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TtlCache<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return the stored value if it is younger than `ttl`, otherwise run `compute` and store its result.
    ///
    /// # Errors
    ///
    /// Returns whatever error `compute` returns; nothing is cached in that case.
    pub async fn get_or_compute<F, Fut, E>(&self, ttl: Duration, compute: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.get_or_compute_with(ttl, CacheMode::Use, compute).await
    }

    /// Like [`get_or_compute`](Self::get_or_compute) with an explicit [`CacheMode`].
    ///
    /// # Errors
    ///
    /// Returns whatever error `compute` returns; nothing is cached in that case.
    pub async fn get_or_compute_with<F, Fut, E>(
        &self,
        ttl: Duration,
        mode: CacheMode,
        compute: F,
    ) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if mode == CacheMode::Bypass {
            return compute().await.map(Arc::new);
        }

        let mut slot = self.slot.lock().await;

        if mode == CacheMode::Use
            && let Some(entry) = slot.as_ref()
            && entry.stored_at.elapsed() < ttl
        {
            tracing::debug!(age = ?entry.stored_at.elapsed(), "dataset cache hit");
            return Ok(Arc::clone(&entry.value));
        }

        tracing::debug!(?mode, "dataset cache miss; running pipeline");
        let value = Arc::new(compute().await?);
        *slot = Some(Entry {
            value: Arc::clone(&value),
            stored_at: Instant::now(),
        });
        Ok(value)
    }

    /// The stored value regardless of age, if any.
    pub async fn peek(&self) -> Option<Arc<T>> {
        self.slot.lock().await.as_ref().map(|e| Arc::clone(&e.value))
    }

    /// How long ago the stored value was computed.
    pub async fn age(&self) -> Option<Duration> {
        self.slot.lock().await.as_ref().map(|e| e.stored_at.elapsed())
    }

    /// Drop the stored value so the next call recomputes.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}
