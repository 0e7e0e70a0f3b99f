//! Confirmed-rewrite cache.
//!
//! `has` reads an in-memory mirror so the request hook never waits on disk;
//! `mark_confirmed` writes the mirror first and then the store. Entries are
//! never updated or expired.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::Result;

use crate::store::{unix_timestamp, ConfirmedRedirect, Store};

pub struct RedirectCache {
    confirmed: RwLock<HashMap<String, i64>>,
    store: Store,
}

impl RedirectCache {
    /// Load every confirmed URL from `store` into memory.
    pub async fn load(store: Store) -> Result<Self> {
        let confirmed = store
            .list_confirmed()
            .await?
            .into_iter()
            .map(|r| (r.legacy_url, r.confirmed_at))
            .collect::<HashMap<_, _>>();
        tracing::debug!(entries = confirmed.len(), "redirect cache loaded");
        Ok(Self {
            confirmed: RwLock::new(confirmed),
            store,
        })
    }

    /// True if `legacy_url` (exact string) has been confirmed before.
    pub fn has(&self, legacy_url: &str) -> bool {
        self.confirmed
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(legacy_url)
    }

    /// Record a confirmed rewrite. Marking an already-confirmed URL is a no-op.
    ///
    /// The in-memory entry is kept even if the store write fails.
    pub async fn mark_confirmed(&self, legacy_url: &str) -> Result<()> {
        {
            let mut confirmed = self.confirmed.write().unwrap_or_else(|e| e.into_inner());
            if confirmed.contains_key(legacy_url) {
                return Ok(());
            }
            confirmed.insert(legacy_url.to_string(), unix_timestamp());
        }
        self.store.insert_confirmed(legacy_url).await?;
        tracing::debug!(url = legacy_url, "redirect confirmed");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.confirmed.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the in-memory entries, oldest first.
    pub fn entries(&self) -> Vec<ConfirmedRedirect> {
        let mut out: Vec<ConfirmedRedirect> = self
            .confirmed
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(url, at)| ConfirmedRedirect {
                legacy_url: url.clone(),
                confirmed_at: *at,
            })
            .collect();
        out.sort_by(|a, b| {
            a.confirmed_at
                .cmp(&b.confirmed_at)
                .then_with(|| a.legacy_url.cmp(&b.legacy_url))
        });
        out
    }

    /// Forget every entry, in memory and on disk. Returns how many were removed from disk.
    pub async fn clear(&self) -> Result<u64> {
        self.confirmed
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        self.store.clear_confirmed().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::open_memory;

    const URL: &str = "http://www.postgresql.org/docs/9.6/library/sets.html";

    #[tokio::test]
    async fn empty_cache_has_nothing() {
        let cache = RedirectCache::load(open_memory().await.unwrap()).await.unwrap();
        assert!(cache.is_empty());
        assert!(!cache.has(URL));
    }

    #[tokio::test]
    async fn mark_confirmed_twice_equals_once() {
        let store = open_memory().await.unwrap();
        let cache = RedirectCache::load(store.clone()).await.unwrap();

        cache.mark_confirmed(URL).await.unwrap();
        let once_mem = cache.entries();
        let once_disk = store.list_confirmed().await.unwrap();

        cache.mark_confirmed(URL).await.unwrap();
        assert_eq!(cache.entries(), once_mem);
        assert_eq!(store.list_confirmed().await.unwrap(), once_disk);
        assert_eq!(cache.len(), 1);
        assert!(cache.has(URL));
    }

    #[tokio::test]
    async fn keys_are_exact_urls() {
        let cache = RedirectCache::load(open_memory().await.unwrap()).await.unwrap();
        cache.mark_confirmed(URL).await.unwrap();
        assert!(!cache.has("https://www.postgresql.org/docs/9.6/library/sets.html"));
        assert!(!cache.has("http://www.postgresql.org/docs/9.5/library/sets.html"));
    }

    #[tokio::test]
    async fn load_picks_up_persisted_entries() {
        let store = open_memory().await.unwrap();
        store.insert_confirmed(URL).await.unwrap();
        let cache = RedirectCache::load(store).await.unwrap();
        assert!(cache.has(URL));
    }

    #[tokio::test]
    async fn clear_forgets_memory_and_disk() {
        let store = open_memory().await.unwrap();
        let cache = RedirectCache::load(store.clone()).await.unwrap();
        cache.mark_confirmed(URL).await.unwrap();

        assert_eq!(cache.clear().await.unwrap(), 1);
        assert!(!cache.has(URL));
        assert!(store.list_confirmed().await.unwrap().is_empty());
    }
}
