//! insider-collective: scrape, normalize, filter and summarize insider purchase filings.
//!
//! The pipeline runs one way:
//! [`InsiderFeed`] fetches every listing page and pulls out the transactions table
//! ([`extract`]), rows are renamed and coerced into [`Transaction`]s ([`normalize`]),
//! the resulting [`Dataset`] is memoized in a [`TtlCache`], narrowed by
//! [`FilterCriteria`], and summarized by [`Report`].

pub mod core;
pub mod extract;
pub mod feed;
pub mod filter;
pub mod normalize;
pub mod report;

#[cfg(feature = "cli")]
pub mod config;

#[cfg(feature = "dataframe")]
pub mod dataframe;

pub use crate::core::{
    CacheMode, Dataset, IcClient, IcClientBuilder, IcError, ListingQuery, PageSource,
    RetryConfig, Role, SkippedPage, Timeframe, Transaction, TtlCache,
};
pub use feed::{DATASET_TTL, DEFAULT_PAGES, FailurePolicy, InsiderFeed, MAX_PAGES};
pub use filter::{EmptySelection, FilterCriteria, RoleInterest};
pub use report::{Report, Summary, TOP_N};
