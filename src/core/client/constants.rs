//! Centralized constants for the default endpoint, UA and listing parameters.

/// Desktop Firefox UA to avoid trivial bot blocking on the listing.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:105.0) ",
    "Gecko/20100101 Firefox/105.0"
);

/// Insider listing page (query string is appended per request).
pub(crate) const DEFAULT_BASE_LISTING: &str = "https://www.dataroma.com/m/ins/ins.php";

/// Overall request timeout applied unless the builder overrides it.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connect timeout applied unless the builder overrides it.
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
