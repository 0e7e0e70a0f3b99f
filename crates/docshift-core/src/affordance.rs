//! Per-tab UI affordances (indicator visibility and status title).
//!
//! The browser shell owns the real indicator; [`TabBoard`] keeps the state in
//! memory so the UI collaborator can fetch it over the control socket.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use serde::Serialize;

/// Browser tab identity as sent by the page-context collaborator.
pub type TabId = i64;

/// Outbound calls to the browser shell.
pub trait TabIndicator: Send + Sync {
    fn show(&self, tab: TabId);
    fn set_title(&self, tab: TabId, title: &str);

    /// Current state for `tab`, if this indicator tracks it.
    fn status(&self, _tab: TabId) -> Option<TabStatus> {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TabStatus {
    pub visible: bool,
    pub title: Option<String>,
}

/// Tabs tracked by a [`TabBoard`] before the oldest is forgotten.
pub const MAX_TRACKED_TABS: usize = 256;

/// In-memory indicator state, bounded to the most recently touched tabs.
#[derive(Debug)]
pub struct TabBoard {
    inner: RwLock<Tabs>,
    capacity: usize,
}

#[derive(Debug, Default)]
struct Tabs {
    by_id: HashMap<TabId, TabStatus>,
    /// Insertion order, oldest first.
    order: VecDeque<TabId>,
}

impl Tabs {
    fn entry(&mut self, tab: TabId, capacity: usize) -> &mut TabStatus {
        if !self.by_id.contains_key(&tab) {
            while self.order.len() >= capacity {
                let Some(oldest) = self.order.pop_front() else {
                    break;
                };
                self.by_id.remove(&oldest);
                tracing::trace!(tab = oldest, "indicator state evicted");
            }
            self.order.push_back(tab);
        }
        self.by_id.entry(tab).or_default()
    }
}

impl TabBoard {
    pub fn new() -> Self {
        Self::with_capacity(MAX_TRACKED_TABS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Tabs::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn update(&self, tab: TabId, f: impl FnOnce(&mut TabStatus)) {
        let mut tabs = self.inner.write().unwrap_or_else(|e| e.into_inner());
        f(tabs.entry(tab, self.capacity));
    }
}

impl Default for TabBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TabIndicator for TabBoard {
    fn show(&self, tab: TabId) {
        tracing::trace!(tab, "indicator shown");
        self.update(tab, |s| s.visible = true);
    }

    fn set_title(&self, tab: TabId, title: &str) {
        tracing::debug!(tab, title, "indicator title");
        self.update(tab, |s| s.title = Some(title.to_string()));
    }

    fn status(&self, tab: TabId) -> Option<TabStatus> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .by_id
            .get(&tab)
            .cloned()
    }
}
