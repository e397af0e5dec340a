#[cfg(feature = "test-mode")]
use std::env;

/// Read the response body as text.
/// In `test-mode`, if `IC_RECORD=1`, the body is saved as a fixture via `core::fixtures`.
pub(crate) async fn get_text(
    resp: reqwest::Response,
    _endpoint: &str,
    _key: &str,
    _ext: &str,
) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;

    #[cfg(feature = "test-mode")]
    {
        if env::var("IC_RECORD").ok().as_deref() == Some("1")
            && let Err(e) = crate::core::fixtures::record_fixture(_endpoint, _key, _ext, &text)
        {
            tracing::warn!(key = _key, error = %e, "IC_RECORD: failed to write fixture");
        }
    }

    Ok(text)
}

/// With `IC_DEBUG=1`, write a fetched page to the temp dir so format drift can be inspected.
pub(crate) fn debug_dump_page(page: u32, html: &str) {
    if std::env::var("IC_DEBUG").ok().as_deref() != Some("1") {
        return;
    }
    let path = std::env::temp_dir().join(format!("insider_collective-page-{page}.html"));
    match std::fs::write(&path, html) {
        Ok(()) => tracing::debug!(path = %path.display(), "IC_DEBUG: wrote page dump"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "IC_DEBUG: page dump failed"),
    }
}
