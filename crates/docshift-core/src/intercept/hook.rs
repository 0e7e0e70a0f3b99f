//! Network-request hook: instant redirect for URLs already confirmed.
//!
//! Synchronous and network-free. A cache miss is not an error and never
//! starts a verification; that only happens in the message flow.

use serde::{Deserialize, Serialize};

use super::Interceptor;
use crate::verify::Verifier;

/// Host the hook is restricted to (subdomains included).
const LEGACY_DOCS_DOMAIN: &str = "postgresql.org";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    MainFrame,
    SubFrame,
    Stylesheet,
    Script,
    Image,
    Xmlhttprequest,
    #[serde(other)]
    Other,
}

/// What the browser shell reports about an outgoing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDetails {
    pub url: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
}

/// Tells the browser to send the in-flight request elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectInstruction {
    #[serde(rename = "redirectUrl")]
    pub redirect_url: String,
}

/// Main-frame request to the docs host under `/docs/`.
pub fn is_docs_navigation(details: &RequestDetails) -> bool {
    if details.resource_type != ResourceType::MainFrame {
        return false;
    }
    let Ok(parsed) = url::Url::parse(&details.url) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    let host_ok = parsed.host_str().is_some_and(|host| {
        host == LEGACY_DOCS_DOMAIN
            || host
                .strip_suffix(LEGACY_DOCS_DOMAIN)
                .is_some_and(|prefix| prefix.ends_with('.'))
    });
    host_ok && parsed.path().starts_with("/docs/")
}

impl<V: Verifier> Interceptor<V> {
    /// Redirect instruction for `details`, or `None` to let the request through.
    pub fn before_request(&self, details: &RequestDetails) -> Option<RedirectInstruction> {
        if !self.enablement.is_enabled() || !is_docs_navigation(details) {
            return None;
        }
        if !self.cache.has(&details.url) {
            tracing::trace!(url = %details.url, "hook: not confirmed yet");
            return None;
        }
        let candidate = self.rewriter.rewrite(&details.url)?;
        tracing::info!(from = %details.url, to = %candidate, "hook: cached redirect");
        Some(RedirectInstruction {
            redirect_url: candidate.into_string(),
        })
    }
}
