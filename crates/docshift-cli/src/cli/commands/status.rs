//! `docshift status` – enablement, cache size, server state, log location.

use anyhow::Result;
use docshift_core::config::DocshiftConfig;
use docshift_core::control;
use docshift_core::enablement::Enablement;
use docshift_core::logging;
use docshift_core::store::Store;

pub async fn run_status(cfg: &DocshiftConfig, store: Store) -> Result<()> {
    let confirmed = store.list_confirmed().await?.len();
    let enabled = Enablement::new(store).load().await?;
    let socket = control::control_socket_path(cfg)?;

    println!("{:<10} {}", "enabled", if enabled { "yes" } else { "no" });
    println!("{:<10} {}", "confirmed", confirmed);
    println!(
        "{:<10} {} ({})",
        "socket",
        socket.display(),
        if socket.exists() { "present" } else { "absent" }
    );
    if let Ok(log) = logging::log_file_path() {
        println!("{:<10} {}", "log", log.display());
    }
    Ok(())
}
