use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Asynchronous string-keyed preference storage.
///
/// Implementations must be cheap to share across tasks; managers hold them
/// as [`SharedStore`].
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read a value. `Ok(None)` means the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a single key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Delete every key.
    async fn clear(&self) -> Result<()>;
}

/// Shared handle to a preference store
pub type SharedStore = Arc<dyn PreferenceStore>;
