use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/docshift/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocshiftConfig {
    /// Control socket path for `docshift serve`. Defaults to the XDG state dir.
    #[serde(default)]
    pub socket_path: Option<PathBuf>,
    /// Extra page overrides: legacy trailing path -> trailing path under the current root.
    /// Entries here replace built-in overrides with the same key.
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("docshift")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DocshiftConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DocshiftConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: DocshiftConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
