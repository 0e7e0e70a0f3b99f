//! `docshift enable` / `docshift disable`.
//!
//! Persists the flag, and if `docshift serve` is running, updates its
//! in-memory copy too.

use anyhow::Result;
use docshift_core::config::DocshiftConfig;
use docshift_core::control;
use docshift_core::enablement::Enablement;
use docshift_core::intercept::Message;
use docshift_core::store::Store;

use crate::cli::control_socket;

pub async fn run_set_enabled(cfg: &DocshiftConfig, store: Store, enabled: bool) -> Result<()> {
    Enablement::new(store).set_enabled_durable(enabled).await?;

    if let Ok(path) = control::control_socket_path(cfg) {
        let line = serde_json::to_string(&Message::SetEnabled { enabled })?;
        if let Err(e) = control_socket::send_line(&path, &line).await {
            tracing::debug!("notify running server: {:#}", e);
        }
    }

    println!(
        "Redirecting {}",
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}
