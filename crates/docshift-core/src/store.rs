//! Durable settings store (SQLite via sqlx).
//!
//! Holds the per-profile key/value settings (JSON-encoded values) and the set
//! of legacy URLs whose rewrite has been confirmed.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// One confirmed legacy URL as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedRedirect {
    pub legacy_url: String,
    /// Unix seconds of the first confirmation.
    pub confirmed_at: i64,
}

/// Handle to the SQLite-backed store.
///
/// The database file lives under the XDG state directory:
/// `~/.local/state/docshift/docshift.db`.
#[derive(Clone)]
pub struct Store {
    pool: Pool<Sqlite>,
}

impl Store {
    /// Open (or create) the default store and run migrations.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("docshift")?;
        let db_path = xdg_dirs.get_state_home().join("docshift.db");
        Self::open_at(&db_path).await
    }

    /// Open (or create) the store at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .with_context(|| format!("open store: {}", path.display()))?;
        let store = Store { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS confirmed_redirects (
                legacy_url TEXT PRIMARY KEY,
                confirmed_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Read a setting; `None` when unset.
    pub async fn get_setting<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some((raw,)) => {
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("decode setting {key}"))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Overwrite a setting with a new value.
    pub async fn set_setting<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(raw)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Record a confirmed legacy URL. Returns false if it was already present
    /// (the original timestamp is kept).
    pub async fn insert_confirmed(&self, legacy_url: &str) -> Result<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO confirmed_redirects (legacy_url, confirmed_at) VALUES (?, ?)",
        )
        .bind(legacy_url)
        .bind(unix_timestamp())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// All confirmed URLs, oldest first.
    pub async fn list_confirmed(&self) -> Result<Vec<ConfirmedRedirect>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT legacy_url, confirmed_at FROM confirmed_redirects \
             ORDER BY confirmed_at, legacy_url",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(legacy_url, confirmed_at)| ConfirmedRedirect {
                legacy_url,
                confirmed_at,
            })
            .collect())
    }

    /// Drop every confirmed URL. Returns how many were removed.
    pub async fn clear_confirmed(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM confirmed_redirects")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Current time as Unix seconds.
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory store for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<Store> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let store = Store { pool };
    store.migrate().await?;
    Ok(store)
}
