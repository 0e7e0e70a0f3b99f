//! `docshift cache list|clear`.

use std::path::Path;

use anyhow::{anyhow, Result};
use docshift_core::config::DocshiftConfig;
use docshift_core::control;
use docshift_core::intercept::Message;
use docshift_core::redirect_cache::RedirectCache;
use docshift_core::store::Store;

use crate::cli::control_socket;

pub async fn run_cache_list(store: Store) -> Result<()> {
    let entries = RedirectCache::load(store).await?.entries();
    if entries.is_empty() {
        println!("No confirmed redirects.");
        return Ok(());
    }
    println!("{:<12} {}", "CONFIRMED", "LEGACY URL");
    for e in entries {
        println!("{:<12} {}", e.confirmed_at, e.legacy_url);
    }
    Ok(())
}

pub async fn run_cache_clear(cfg: &DocshiftConfig, store: Store) -> Result<()> {
    let socket = control::control_socket_path(cfg).ok();
    let removed = clear_confirmed(socket.as_deref(), store).await?;
    println!("Removed {removed} confirmed redirect(s).");
    Ok(())
}

/// A running server owns the in-memory cache, so it does the clearing when
/// one is listening; otherwise the store is cleared directly.
async fn clear_confirmed(socket: Option<&Path>, store: Store) -> Result<u64> {
    if let Some(path) = socket {
        let line = serde_json::to_string(&Message::ClearCache)?;
        if let Some(out) = control_socket::send_line(path, &line).await? {
            let out: serde_json::Value = serde_json::from_str(&out)?;
            return out
                .get("reply")
                .and_then(serde_json::Value::as_u64)
                .ok_or_else(|| anyhow!("server did not clear the cache: {out}"));
        }
    }
    RedirectCache::load(store).await?.clear().await
}
