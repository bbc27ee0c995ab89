//! File download helper for build steps that fetch external inputs.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

/// Download `url` to `dest`, streaming the body to disk.
///
/// Redirects are followed; parent directories of `dest` are created. The
/// response body is never buffered whole in memory.
///
/// # Errors
///
/// Returns an error on connection failure, a non-success HTTP status, or
/// any filesystem fault.
pub fn download(url: &str, dest: &Path) -> Result<()> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(crate::USER_AGENT)
        .build()
        .context("failed to build HTTP client")?;

    let mut response = client
        .get(url)
        .send()
        .with_context(|| format!("request failed: {url}"))?
        .error_for_status()
        .with_context(|| format!("download failed: {url}"))?;

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(dest)
        .with_context(|| format!("failed to create {}", dest.display()))?;
    let bytes = response
        .copy_to(&mut file)
        .with_context(|| format!("failed to stream {url}"))?;

    tracing::debug!(url, bytes, dest = %dest.display(), "downloaded file");
    Ok(())
}
