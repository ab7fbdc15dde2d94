use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Key under which the dashboard keeps its persisted state snapshot.
pub const STATE_SNAPSHOT_KEY: &str = "reduxState";

/// Persisted client-side storage of the dashboard: a flat string key/value
/// table, cleared wholesale on logout.
#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct StoredItem {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid sqlite url '{database_url}'"))?
            .create_if_missing(true);
        // An in-memory database lives only as long as a connection holds it.
        let max_connections = if database_url.starts_with("sqlite::memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open storage at '{database_url}'"))?;

        let storage = Self { pool };
        storage.ensure_local_storage_table().await?;
        Ok(storage)
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    async fn ensure_local_storage_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS local_storage (
                key        TEXT PRIMARY KEY NOT NULL,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to ensure local_storage table exists")?;
        Ok(())
    }

    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to store item '{key}'"))?;
        Ok(())
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to read item '{key}'"))?;
        Ok(row.map(|r| r.get::<String, _>(0)))
    }

    pub async fn remove_item(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to remove item '{key}'"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn items(&self) -> Result<Vec<StoredItem>> {
        let rows = sqlx::query("SELECT key, value, updated_at FROM local_storage ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .context("failed to list stored items")?;
        Ok(rows
            .into_iter()
            .map(|r| StoredItem {
                key: r.get::<String, _>(0),
                value: r.get::<String, _>(1),
                updated_at: r.get::<DateTime<Utc>, _>(2),
            })
            .collect())
    }

    pub async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items().await?.into_iter().map(|item| item.key).collect())
    }

    /// Removes every persisted entry, tokens and state snapshot included.
    pub async fn clear(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM local_storage")
            .execute(&self.pool)
            .await
            .context("failed to clear local storage")?;
        Ok(result.rows_affected())
    }

    pub async fn load_snapshot(&self) -> Result<Option<Value>> {
        let Some(raw) = self.get_item(STATE_SNAPSHOT_KEY).await? else {
            return Ok(None);
        };
        let snapshot = serde_json::from_str(&raw).context("persisted state snapshot is not valid json")?;
        Ok(Some(snapshot))
    }

    pub async fn save_snapshot(&self, snapshot: &Value) -> Result<()> {
        self.set_item(STATE_SNAPSHOT_KEY, &snapshot.to_string()).await
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
