//! File-backed key-value storage.
//!
//! Each key maps to one file, `{storage_dir}/{key}.json`. Writes go through a
//! temporary file that is fsynced and then renamed over the target, so a crash
//! mid-write leaves either the old value or the new one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use catrineando_core::CatrineandoError;
use catrineando_core::error::Result;
use catrineando_core::storage::KeyValueStorage;

/// Directory-based [`KeyValueStorage`].
#[derive(Debug, Clone)]
pub struct FileKeyValueStorage {
    storage_dir: PathBuf,
}

impl FileKeyValueStorage {
    const EXTENSION: &'static str = "json";

    /// Creates a storage rooted at `storage_dir`. The directory is created on
    /// first write.
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Returns the file backing `key`.
    ///
    /// Keys are restricted to ASCII alphanumerics, `-` and `_` so they can never
    /// escape the storage directory.
    pub fn item_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CatrineandoError::storage(format!(
                "invalid storage key '{}'",
                key
            )));
        }
        Ok(self
            .storage_dir
            .join(format!("{}.{}", key, Self::EXTENSION)))
    }

    fn temp_path(path: &Path) -> Result<PathBuf> {
        let parent = path
            .parent()
            .ok_or_else(|| CatrineandoError::io("Path has no parent directory"))?;
        let file_name = path
            .file_name()
            .ok_or_else(|| CatrineandoError::io("Path has no file name"))?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

#[async_trait]
impl KeyValueStorage for FileKeyValueStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CatrineandoError::io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;

        fs::create_dir_all(&self.storage_dir)
            .await
            .map_err(|e| CatrineandoError::io(format!("Failed to create directory: {}", e)))?;

        let tmp_path = Self::temp_path(&path)?;
        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(value.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, &path).await.map_err(|e| {
            CatrineandoError::io(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        tracing::debug!("[FileStorage] Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("[FileStorage] Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CatrineandoError::io(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileKeyValueStorage::new(temp_dir.path().join("storage"));

        assert_eq!(storage.get_item("characters").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileKeyValueStorage::new(temp_dir.path().join("storage"));

        storage.set_item("characters", "[]").await.unwrap();
        storage.set_item("characters", "[1]").await.unwrap();

        assert_eq!(
            storage.get_item("characters").await.unwrap(),
            Some("[1]".to_string())
        );
        assert!(temp_dir.path().join("storage/characters.json").exists());
    }

    #[tokio::test]
    async fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileKeyValueStorage::new(temp_dir.path());

        storage.set_item("characters", "[]").await.unwrap();

        assert!(!temp_dir.path().join(".characters.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileKeyValueStorage::new(temp_dir.path());

        storage.set_item("characters", "[]").await.unwrap();
        storage.remove_item("characters").await.unwrap();
        storage.remove_item("characters").await.unwrap();

        assert_eq!(storage.get_item("characters").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileKeyValueStorage::new(temp_dir.path());

        for key in ["", "../escape", "a/b", "with space"] {
            let err = storage.set_item(key, "x").await.unwrap_err();
            assert!(err.is_persistence(), "key {key:?} should be rejected");
        }
    }
}
