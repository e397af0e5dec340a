use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum IcError {
    /// An error occurred during an HTTP request (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// No usable page could be fetched from the listing.
    #[error("data source unavailable: {0}")]
    SourceUnavailable(String),

    /// The listing page no longer has the expected structure.
    #[error("page {page}: unexpected page format: {detail}")]
    PageFormat {
        /// One-based page index the problem was found on.
        page: u32,
        /// What was expected and what was found.
        detail: String,
    },

    /// An invalid date range was provided for a filter (start must not be after end).
    #[error("invalid date range: start must not be after end")]
    InvalidDates,

    /// A builder or filter parameter was out of range or unrecognized.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// A configuration value could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serializing a report to JSON failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IcError {
    /// True for failures that mean the remote listing could not be reached or refused to answer,
    /// as opposed to a page that was reached but could not be understood.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(
            self,
            IcError::Http(_) | IcError::Status { .. } | IcError::SourceUnavailable(_)
        )
    }

    pub(crate) fn page_format(page: u32, detail: impl Into<String>) -> Self {
        IcError::PageFormat {
            page,
            detail: detail.into(),
        }
    }
}
