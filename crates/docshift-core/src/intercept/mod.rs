//! Interception layer: the request hook and the message handlers.
//!
//! Both entry points check [`Enablement`] first; when disabled they return
//! without side effects.

mod flow;
mod hook;
mod message;
mod responder;
pub mod wire;


use std::sync::Arc;

use anyhow::Result;

use crate::affordance::TabIndicator;
use crate::config::DocshiftConfig;
use crate::enablement::Enablement;
use crate::redirect_cache::RedirectCache;
use crate::rewrite::Rewriter;
use crate::store::Store;
use crate::verify::Verifier;

pub use flow::{failure_title, TITLE_REDIRECTING};
pub use hook::{is_docs_navigation, RedirectInstruction, RequestDetails, ResourceType};
pub use message::{Message, MessageSender};
pub use responder::Responder;

pub struct Interceptor<V> {
    rewriter: Rewriter,
    cache: RedirectCache,
    enablement: Enablement,
    verifier: V,
    tabs: Arc<dyn TabIndicator>,
}

impl<V: Verifier> Interceptor<V> {
    pub fn new(
        rewriter: Rewriter,
        cache: RedirectCache,
        enablement: Enablement,
        verifier: V,
        tabs: Arc<dyn TabIndicator>,
    ) -> Self {
        Self {
            rewriter,
            cache,
            enablement,
            verifier,
            tabs,
        }
    }

    /// Startup wiring: the cache is loaded before returning (the hook needs
    /// it), the enablement flag loads in the background.
    pub async fn open(
        cfg: &DocshiftConfig,
        store: Store,
        verifier: V,
        tabs: Arc<dyn TabIndicator>,
    ) -> Result<Self> {
        let enablement = Enablement::new(store.clone());
        enablement.spawn_initial_load();
        let cache = RedirectCache::load(store).await?;
        Ok(Self::new(
            Rewriter::from_config(cfg),
            cache,
            enablement,
            verifier,
            tabs,
        ))
    }

    pub fn rewriter(&self) -> &Rewriter {
        &self.rewriter
    }

    pub fn cache(&self) -> &RedirectCache {
        &self.cache
    }

    pub fn enablement(&self) -> &Enablement {
        &self.enablement
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Route one inbound message. `responder` is consumed by messages that
    /// reply and dropped by those that don't.
    pub async fn dispatch(&self, message: Message, responder: Responder) {
        match message {
            Message::Redirect { sender } => self.handle_redirect(&sender, responder).await,
            Message::IsEnabled => responder.reply(self.enablement.is_enabled()),
            Message::SetEnabled { enabled } => self.enablement.set_enabled(enabled),
            Message::BeforeRequest(details) => responder.reply(self.before_request(&details)),
            Message::TabStatus { tab_id } => responder.reply(self.tabs.status(tab_id)),
            Message::ClearCache => match self.cache.clear().await {
                Ok(removed) => responder.reply(removed),
                Err(e) => tracing::warn!("clear redirect cache: {:#}", e),
            },
        }
    }
}
