//! Message-initiated redirect flow.

use super::{Interceptor, MessageSender, Responder};
use crate::verify::{Verification, Verifier, VerifyError};

/// Tab title while the candidate is being checked.
pub const TITLE_REDIRECTING: &str = "Redirecting...";

/// Tab title after a failed check.
pub fn failure_title(err: &VerifyError) -> String {
    match err.status() {
        Some(code) => format!("Could not redirect (HTTP status code: {code})"),
        None => format!("Could not redirect ({err})"),
    }
}

impl<V: Verifier> Interceptor<V> {
    /// Verify the rewrite of the sender's page and reply with the candidate
    /// URL (confirmed) or null (failed).
    ///
    /// Disabled or non-legacy pages release `responder` without a reply and
    /// touch nothing else.
    pub async fn handle_redirect(&self, sender: &MessageSender, responder: Responder) {
        let tab = sender.tab_id;
        if !self.enablement.is_enabled() {
            tracing::debug!(tab, "redirect: disabled");
            return;
        }
        let Some(candidate) = self.rewriter.rewrite(&sender.url) else {
            tracing::debug!(tab, url = %sender.url, "redirect: not a legacy docs URL");
            return;
        };

        self.tabs.show(tab);
        self.tabs.set_title(tab, TITLE_REDIRECTING);

        match self.verifier.verify(&candidate).await {
            Verification::Confirmed(target) => {
                if let Err(e) = self.cache.mark_confirmed(&sender.url).await {
                    tracing::warn!(url = %sender.url, "persist confirmed redirect: {:#}", e);
                }
                self.tabs.show(tab);
                tracing::info!(tab, from = %sender.url, to = %target, "redirect confirmed");
                responder.reply(Some(target.as_str()));
            }
            Verification::Failed(err) => {
                tracing::info!(tab, url = %candidate, "redirect failed: {}", err);
                self.tabs.set_title(tab, &failure_title(&err));
                responder.reply(Option::<&str>::None);
            }
        }
    }
}
