//! Control socket location shared by `docshift serve` and its clients.

use std::path::PathBuf;

use crate::config::DocshiftConfig;

/// Default path for the control socket (same XDG state dir as the store).
pub fn default_control_socket_path() -> std::io::Result<PathBuf> {
    let dir = xdg::BaseDirectories::with_prefix("docshift")?.get_state_home();
    Ok(dir.join("control.sock"))
}

/// Socket path from config, falling back to the XDG default.
pub fn control_socket_path(cfg: &DocshiftConfig) -> std::io::Result<PathBuf> {
    match &cfg.socket_path {
        Some(path) => Ok(path.clone()),
        None => default_control_socket_path(),
    }
}
