//! Process-wide enable/disable flag.
//!
//! Reads hit an in-memory mirror. The mirror starts at `true` and is replaced
//! by the persisted value once the initial load finishes; writes update the
//! mirror immediately and are persisted by a single writer task, so the value
//! on disk always ends at the last value set.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use anyhow::Result;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::store::Store;

/// Settings key for the flag.
pub const ENABLED_KEY: &str = "isEnabled";
pub const DEFAULT_ENABLED: bool = true;

pub struct Enablement {
    flag: Arc<AtomicBool>,
    store: Store,
    /// Feeds the writer task; started on the first `set_enabled`.
    writer: OnceLock<watch::Sender<bool>>,
}

impl Enablement {
    /// Mirror holds the default until [`Enablement::load`] completes.
    pub fn new(store: Store) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(DEFAULT_ENABLED)),
            store,
            writer: OnceLock::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Read the persisted value into the mirror (default when unset).
    pub async fn load(&self) -> Result<bool> {
        let enabled = read_persisted(&self.store).await?;
        self.flag.store(enabled, Ordering::SeqCst);
        Ok(enabled)
    }

    /// Run [`Enablement::load`] in the background. Failures keep the default.
    pub fn spawn_initial_load(&self) -> JoinHandle<()> {
        let flag = Arc::clone(&self.flag);
        let store = self.store.clone();
        tokio::spawn(async move {
            match read_persisted(&store).await {
                Ok(enabled) => {
                    flag.store(enabled, Ordering::SeqCst);
                    tracing::debug!(enabled, "enablement loaded");
                }
                Err(e) => tracing::warn!("load enablement, keeping default: {:#}", e),
            }
        })
    }

    /// Update the mirror and persist in the background.
    pub fn set_enabled(&self, enabled: bool) {
        self.flag.store(enabled, Ordering::SeqCst);
        tracing::info!(enabled, "enablement changed");

        match self.writer() {
            Some(tx) => {
                tx.send_replace(enabled);
            }
            None => tracing::warn!("no async runtime; enablement change not persisted"),
        }
    }

    fn writer(&self) -> Option<&watch::Sender<bool>> {
        if let Some(tx) = self.writer.get() {
            return Some(tx);
        }
        let handle = Handle::try_current().ok()?;
        Some(
            self.writer
                .get_or_init(|| spawn_writer(&handle, self.store.clone())),
        )
    }

    /// Update the mirror and wait for the write to land.
    pub async fn set_enabled_durable(&self, enabled: bool) -> Result<()> {
        self.flag.store(enabled, Ordering::SeqCst);
        self.store.set_setting(ENABLED_KEY, &enabled).await
    }
}

/// Writes values in the order they were set. Intermediate values may be
/// skipped, the latest one is always written. Exits when the sender is dropped.
fn spawn_writer(handle: &Handle, store: Store) -> watch::Sender<bool> {
    let (tx, mut rx) = watch::channel(DEFAULT_ENABLED);
    handle.spawn(async move {
        while rx.changed().await.is_ok() {
            let enabled = *rx.borrow_and_update();
            if let Err(e) = store.set_setting(ENABLED_KEY, &enabled).await {
                tracing::warn!("persist enablement: {:#}", e);
            }
        }
    });
    tx
}

async fn read_persisted(store: &Store) -> Result<bool> {
    Ok(store
        .get_setting::<bool>(ENABLED_KEY)
        .await?
        .unwrap_or(DEFAULT_ENABLED))
}
