mod api;

pub use api::listing_url;

use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    core::{
        CacheMode, Dataset, IcClient, IcError, ListingQuery, PageSource, SkippedPage, Timeframe,
        TtlCache,
    },
    extract::{LISTING_TABLE_ORDINAL, RawTable, extract_table},
    normalize::normalize,
};

/// Pages fetched per load: indexes `1..=29`.
pub const DEFAULT_PAGES: u32 = 29;

/// Upper bound for [`InsiderFeed::pages`]; the live listing has far fewer pages.
pub const MAX_PAGES: u32 = 1_000;

/// How long a loaded dataset stays fresh in the cache.
pub const DATASET_TTL: Duration = Duration::from_secs(8 * 60 * 60);

/// What a load does when a page cannot be fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// The first failing page fails the whole load. (Default)
    #[default]
    Abort,
    /// Pages that fail to download are skipped and listed in [`Dataset::skipped_pages`].
    /// The load still fails if no page could be fetched. Pages that download but do not
    /// have the expected layout always fail the load.
    BestEffort,
}

/// A builder for loading the insider listing: fetch every page, extract the
/// transactions table, and normalize the rows into a [`Dataset`].
///
/// # Example
///
/// ```no_run
/// # use insider_collective::{IcClient, InsiderFeed, TtlCache, FailurePolicy};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IcClient::default();
/// let cache = TtlCache::new();
///
/// let dataset = InsiderFeed::new(&client)
///     .failure_policy(FailurePolicy::BestEffort)
///     .load_cached(&cache)
///     .await?;
/// println!("{} filings", dataset.len());
/// # Ok(())
/// # }
/// ```
pub struct InsiderFeed<S = IcClient> {
    source: S,
    query: ListingQuery,
    pages: u32,
    concurrency: usize,
    policy: FailurePolicy,
    cache_mode: CacheMode,
    ttl: Duration,
}

impl InsiderFeed<IcClient> {
    /// Creates a feed that fetches over HTTP with `client`.
    pub fn new(client: &IcClient) -> Self {
        Self::with_source(client.clone())
    }
}

impl<S: PageSource> InsiderFeed<S> {
    /// Creates a feed over any [`PageSource`].
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            query: ListingQuery::default(),
            pages: DEFAULT_PAGES,
            concurrency: 1,
            policy: FailurePolicy::default(),
            cache_mode: CacheMode::Use,
            ttl: DATASET_TTL,
        }
    }

    /// Sets the listing's reporting window. (Default: quarter)
    #[must_use]
    pub const fn timeframe(mut self, timeframe: Timeframe) -> Self {
        self.query.timeframe = timeframe;
        self
    }

    /// Sets the minimum transaction amount in dollars. (Default: 25,000)
    #[must_use]
    pub const fn min_amount(mut self, amount: u64) -> Self {
        self.query.min_amount = amount;
        self
    }

    /// Sets how many pages to fetch, starting at page 1. (Default: 29, at most [`MAX_PAGES`])
    #[must_use]
    pub const fn pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }

    /// Sets how many page requests may be in flight at once. (Default: 1, sequential)
    ///
    /// Rows are always concatenated in page order.
    #[must_use]
    pub const fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    /// Sets what happens when a page cannot be fetched. (Default: [`FailurePolicy::Abort`])
    #[must_use]
    pub const fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets how [`load_cached`](Self::load_cached) uses the cache. (Default: [`CacheMode::Use`])
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Sets the freshness window for [`load_cached`](Self::load_cached). (Default: 8 hours)
    #[must_use]
    pub const fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// The fixed query parameters this feed sends.
    pub const fn query(&self) -> &ListingQuery {
        &self.query
    }

    async fn load_page(&self, page: u32) -> Result<RawTable, IcError> {
        let html = self.source.fetch_page(&self.query, page).await?;
        extract_table(page, &html, LISTING_TABLE_ORDINAL)
    }

    /// Runs the full pipeline without touching any cache.
    ///
    /// # Errors
    ///
    /// [`IcError::InvalidParams`] when the page count is outside `1..=MAX_PAGES`.
    /// Under [`FailurePolicy::Abort`], the first network or status failure. Under either
    /// policy, [`IcError::PageFormat`] when a page lacks the transactions table or a row
    /// cannot be normalized, and [`IcError::SourceUnavailable`] when no page was fetched.
    #[tracing::instrument(skip(self), err, fields(pages = self.pages, policy = ?self.policy))]
    pub async fn load(&self) -> Result<Dataset, IcError> {
        if !(1..=MAX_PAGES).contains(&self.pages) {
            return Err(IcError::InvalidParams(format!(
                "pages must be between 1 and {MAX_PAGES}, got {}",
                self.pages
            )));
        }

        let results = futures::stream::iter(1..=self.pages)
            .map(|page| async move { (page, self.load_page(page).await) })
            .buffered(self.concurrency.max(1));
        let mut results = std::pin::pin!(results);

        let mut tables: Vec<(u32, RawTable)> = Vec::new();
        let mut skipped: Vec<SkippedPage> = Vec::new();

        while let Some((page, result)) = results.next().await {
            match result {
                Ok(table) => {
                    tracing::debug!(page, rows = table.rows.len(), "page extracted");
                    tables.push((page, table));
                }
                Err(e) if self.policy == FailurePolicy::BestEffort && e.is_source_unavailable() => {
                    tracing::warn!(page, error = %e, "skipping page");
                    skipped.push(SkippedPage {
                        page,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        if tables.is_empty() {
            return Err(IcError::SourceUnavailable(format!(
                "none of {} pages could be fetched",
                self.pages
            )));
        }

        let mut dataset = normalize(tables)?;
        dataset.skipped_pages = skipped;
        tracing::info!(
            rows = dataset.len(),
            skipped = dataset.skipped_pages.len(),
            "insider listing loaded"
        );
        Ok(dataset)
    }

    /// Returns the cached dataset if it is fresh, otherwise runs [`load`](Self::load) and caches it.
    ///
    /// Concurrent callers that miss share one pipeline run.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load); a failed load leaves the cache unchanged.
    pub async fn load_cached(&self, cache: &TtlCache<Dataset>) -> Result<Arc<Dataset>, IcError> {
        cache
            .get_or_compute_with(self.ttl, self.cache_mode, || self.load())
            .await
    }
}
