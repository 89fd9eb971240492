//! Version extraction: render a page and read the `v` query parameter off
//! the final resolved address.

use crate::renderer::Renderer;
use anyhow::Result;
use tracing::{debug, warn};
use url::Url;

/// Query parameter carrying the version identifier.
pub const VERSION_PARAM: &str = "v";

/// Extract a version string from the final address of `url`.
///
/// Returns `Some("v=<value>")` when the parameter is present and non-empty,
/// `None` otherwise. Every failure along the way (context creation,
/// navigation, timeout, unparseable final URL) is logged and absorbed into
/// `None`; extraction never aborts the run. The render context is released
/// on every path before this returns.
pub async fn extract_version(renderer: &dyn Renderer, url: &str, timeout_ms: u64) -> Option<String> {
    match try_extract(renderer, url, timeout_ms).await {
        Ok(version) => {
            debug!(url, version = version.as_deref(), "extraction finished");
            version
        }
        Err(e) => {
            warn!(url, "version extraction failed: {e:#}");
            None
        }
    }
}

async fn try_extract(
    renderer: &dyn Renderer,
    url: &str,
    timeout_ms: u64,
) -> Result<Option<String>> {
    let mut ctx = renderer.new_context().await?;
    // Hold the navigation result so the context is closed on both paths.
    let nav = ctx.navigate(url, timeout_ms).await;
    ctx.close().await?;

    let nav = nav?;
    Ok(parse_version_param(&nav.final_url))
}

/// Pull the first non-empty `v` parameter out of a resolved URL.
pub fn parse_version_param(final_url: &str) -> Option<String> {
    let parsed = Url::parse(final_url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, value)| key == VERSION_PARAM && !value.is_empty())
        .map(|(_, value)| format!("{VERSION_PARAM}={value}"))
}
