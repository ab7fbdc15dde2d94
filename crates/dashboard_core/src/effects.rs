//! Side-effect boundaries the store drives around the pure reducer.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Path the dashboard reboots to after logout.
pub const ROOT_PATH: &str = "/";

/// Persisted client-side application state.
#[async_trait]
pub trait StateStorage: Send + Sync {
    /// Removes every persisted entry, tokens included.
    async fn clear(&self) -> Result<()>;
    async fn load_snapshot(&self) -> Result<Option<Value>>;
    async fn save_snapshot(&self, snapshot: &Value) -> Result<()>;
}

/// Page-level navigation. A hard redirect ends the current dashboard session;
/// callers do not wait for it to complete.
pub trait Navigator: Send + Sync {
    fn hard_redirect(&self, path: &str);
}

#[async_trait]
impl StateStorage for storage::Storage {
    async fn clear(&self) -> Result<()> {
        let removed = storage::Storage::clear(self).await?;
        tracing::debug!(removed, "cleared persisted storage");
        Ok(())
    }

    async fn load_snapshot(&self) -> Result<Option<Value>> {
        storage::Storage::load_snapshot(self).await
    }

    async fn save_snapshot(&self, snapshot: &Value) -> Result<()> {
        storage::Storage::save_snapshot(self, snapshot).await
    }
}
