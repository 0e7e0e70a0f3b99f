//! `docshift send <json>` – one-shot client for the control socket.

use anyhow::{bail, Result};
use docshift_core::config::DocshiftConfig;
use docshift_core::control;

use crate::cli::control_socket;

pub async fn run_send(cfg: &DocshiftConfig, message: &str) -> Result<()> {
    let path = control::control_socket_path(cfg)?;
    match control_socket::send_line(&path, message).await? {
        Some(response) => println!("{response}"),
        None => bail!("docshift serve is not running (no socket at {})", path.display()),
    }
    Ok(())
}
