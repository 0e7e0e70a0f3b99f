//! `docshift verify <url>` – rewrite and check the candidate with one HEAD request.
//!
//! Does not record the result; confirmed redirects are only written by the
//! redirect flow in `docshift serve`.

use anyhow::{bail, Result};
use docshift_core::config::DocshiftConfig;
use docshift_core::intercept::failure_title;
use docshift_core::rewrite::Rewriter;
use docshift_core::verify::{HeadVerifier, Verification, Verifier};

pub async fn run_verify(cfg: &DocshiftConfig, url: &str) -> Result<()> {
    let Some(candidate) = Rewriter::from_config(cfg).rewrite(url) else {
        bail!("not a legacy docs URL: {url}");
    };
    match HeadVerifier.verify(&candidate).await {
        Verification::Confirmed(target) => println!("ok  {target}"),
        Verification::Failed(err) => bail!("{}: {}", candidate, failure_title(&err)),
    }
    Ok(())
}
