//! Blocking HEAD request via libcurl.

use anyhow::{Context, Result};
use std::time::Duration;

const USER_AGENT: &str = concat!("docshift/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const TOTAL_TIMEOUT: Duration = Duration::from_secs(30);

/// Performs one HEAD request and returns the final HTTP status code.
///
/// Follows redirects, so the status is that of the last hop. No body is read.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn head_status(url: &str) -> Result<u32> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.useragent(USER_AGENT)?;
    easy.connect_timeout(CONNECT_TIMEOUT)?;
    easy.timeout(TOTAL_TIMEOUT)?;

    easy.perform().context("HEAD request failed")?;

    let code = easy.response_code().context("no response code")?;
    Ok(code)
}
