//! `docshift rewrite <url>` – show the candidate without touching the network.

use anyhow::{bail, Result};
use docshift_core::config::DocshiftConfig;
use docshift_core::rewrite::Rewriter;

pub fn run_rewrite(cfg: &DocshiftConfig, url: &str) -> Result<()> {
    let Some(candidate) = Rewriter::from_config(cfg).rewrite(url) else {
        bail!("not a legacy docs URL: {url}");
    };
    println!("{candidate}");
    Ok(())
}
