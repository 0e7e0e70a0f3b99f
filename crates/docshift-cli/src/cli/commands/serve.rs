//! `docshift serve` – host the redirect engine on the control socket until Ctrl-C.

use anyhow::Result;
use docshift_core::affordance::TabBoard;
use docshift_core::config::DocshiftConfig;
use docshift_core::control;
use docshift_core::intercept::Interceptor;
use docshift_core::store::Store;
use docshift_core::verify::HeadVerifier;
use std::sync::Arc;

use crate::cli::control_socket;

pub async fn run_serve(cfg: &DocshiftConfig, store: Store) -> Result<()> {
    let path = control::control_socket_path(cfg)?;
    let interceptor =
        Arc::new(Interceptor::open(cfg, store, HeadVerifier, Arc::new(TabBoard::new())).await?);
    let listener = control_socket::spawn_control_listener(Arc::clone(&interceptor), &path)?;
    tracing::info!(
        confirmed = interceptor.cache().len(),
        "serving on {}",
        path.display()
    );
    println!("docshift listening on {}", path.display());

    tokio::select! {
        res = listener => {
            if let Err(e) = res {
                tracing::warn!("control listener stopped: {}", e);
            }
        }
        res = tokio::signal::ctrl_c() => {
            res?;
            tracing::info!("shutting down");
        }
    }

    let _ = std::fs::remove_file(&path);
    Ok(())
}
