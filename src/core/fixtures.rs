//! Recording of fetched listing pages as offline fixtures (`test-mode` only).

use std::path::PathBuf;

/// `IC_FIXDIR`, or `tests/fixtures` under the crate root.
pub(crate) fn fixture_dir() -> PathBuf {
    std::env::var_os("IC_FIXDIR").map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures"),
        PathBuf::from,
    )
}

/// Write `body` to `{endpoint}_{key}.{ext}` in the fixture dir, replacing any previous recording.
pub(crate) fn record_fixture(
    endpoint: &str,
    key: &str,
    ext: &str,
    body: &str,
) -> std::io::Result<PathBuf> {
    let dir = fixture_dir();
    std::fs::create_dir_all(&dir)?;

    let path = dir.join(format!("{endpoint}_{key}.{ext}"));
    std::fs::write(&path, body)?;
    tracing::debug!(path = %path.display(), bytes = body.len(), "IC_RECORD: wrote fixture");
    Ok(path)
}
