//! Key-value storage collaborator trait.

use async_trait::async_trait;

use crate::error::Result;

/// Well-known key under which the character collection is persisted.
pub const CHARACTERS_KEY: &str = "characters";

/// String key-value storage, the only persistence primitive the core uses.
///
/// Values are opaque strings; callers own the serialization format.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Reads the value stored under `key`.
    /// Returns `None` if nothing was ever written.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes the value stored under `key`. Removing an absent key succeeds.
    async fn remove_item(&self, key: &str) -> Result<()>;
}
