//! Core components of the `insider-collective` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The HTTP [`IcClient`] and its builder.
//! - The primary [`IcError`] type.
//! - Shared data models like [`Transaction`], [`Role`] and [`Dataset`].
//! - The single-slot [`TtlCache`] that shields the pipeline.

/// In-memory, single-flight TTL cache.
pub mod cache;
/// The HTTP client (`IcClient`), builder, and retry configuration.
pub mod client;
/// Cell coercions (numbers, dates) and money formatting.
pub mod conversions;
/// The primary error type (`IcError`) for the crate.
pub mod error;
/// Shared data models used across the pipeline stages.
pub mod models;
/// Service traits for abstracting where listing pages come from.
pub mod services;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::IcClient`
pub use cache::TtlCache;
pub use client::{CacheMode, IcClient, IcClientBuilder, RetryConfig};
pub use error::IcError;
pub use models::{Dataset, ListingQuery, Role, SkippedPage, Timeframe, Transaction};
pub use services::{PageFuture, PageSource};
