use crate::core::{IcError, ListingQuery};

/// Boxed future returned by [`PageSource::fetch_page`].
pub type PageFuture<'a> =
    std::pin::Pin<Box<dyn std::future::Future<Output = Result<String, IcError>> + Send + 'a>>;

/// A source of raw listing pages.
///
/// This decouples the load pipeline from HTTP, so the same normalization and
/// failure-policy logic runs over synthetic pages in tests. It is implemented by
/// [`IcClient`](crate::IcClient).
pub trait PageSource: Send + Sync {
    /// Fetch the HTML for one page of the listing.
    ///
    /// # Arguments
    /// * `query` - The fixed listing parameters for this load.
    /// * `page` - One-based page index.
    fn fetch_page<'a>(&'a self, query: &'a ListingQuery, page: u32) -> PageFuture<'a>;
}
