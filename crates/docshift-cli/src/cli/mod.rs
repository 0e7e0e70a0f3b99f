//! CLI for docshift.

mod commands;
mod control_socket;

use anyhow::Result;
use clap::{Parser, Subcommand};
use docshift_core::config;
use docshift_core::store::Store;

use commands::{
    run_cache_clear, run_cache_list, run_rewrite, run_send, run_serve, run_set_enabled,
    run_status, run_verify,
};

/// Top-level CLI for docshift.
#[derive(Debug, Parser)]
#[command(name = "docshift")]
#[command(about = "docshift: redirect legacy docs URLs to verified current pages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Serve the redirect engine on the control socket.
    Serve,

    /// Print the current-version candidate for a legacy docs URL (no network).
    Rewrite {
        /// Legacy docs URL.
        url: String,
    },

    /// Rewrite a legacy docs URL and check that the candidate exists (HEAD).
    Verify {
        /// Legacy docs URL.
        url: String,
    },

    /// Turn redirecting on.
    Enable,

    /// Turn redirecting off.
    Disable,

    /// Show enablement, cache size and socket state.
    Status,

    /// Inspect or clear confirmed redirects.
    Cache {
        #[command(subcommand)]
        action: CacheCommand,
    },

    /// Send one raw JSON message to a running `docshift serve` and print the response.
    Send {
        /// Message, e.g. '{"action":"isEnabled"}'.
        message: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// List confirmed legacy URLs.
    List,
    /// Forget every confirmed legacy URL.
    Clear,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Serve => run_serve(&cfg, Store::open_default().await?).await?,
            CliCommand::Rewrite { url } => run_rewrite(&cfg, &url)?,
            CliCommand::Verify { url } => run_verify(&cfg, &url).await?,
            CliCommand::Enable => {
                run_set_enabled(&cfg, Store::open_default().await?, true).await?
            }
            CliCommand::Disable => {
                run_set_enabled(&cfg, Store::open_default().await?, false).await?
            }
            CliCommand::Status => run_status(&cfg, Store::open_default().await?).await?,
            CliCommand::Cache { action } => {
                let store = Store::open_default().await?;
                match action {
                    CacheCommand::List => run_cache_list(store).await?,
                    CacheCommand::Clear => run_cache_clear(&cfg, store).await?,
                }
            }
            CliCommand::Send { message } => run_send(&cfg, &message).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
