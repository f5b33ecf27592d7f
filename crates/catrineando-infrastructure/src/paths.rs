//! Unified path management for Catrineando files.
//!
//! Platform directories are resolved through the `dirs` crate so Linux,
//! macOS and Windows each get their conventional locations.

use std::path::PathBuf;

const APP_DIR: &str = "catrineando";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// No platform config directory could be determined.
    ConfigDirNotFound,
    /// No platform data directory could be determined.
    DataDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
            PathError::DataDirNotFound => write!(f, "Cannot find data directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Catrineando.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/catrineando/        # Config directory
/// └── config.toml               # Application configuration
///
/// ~/.local/share/catrineando/   # Data directory
/// └── storage/                  # Key-value storage (FileKeyValueStorage)
///     └── characters.json       # The character collection
/// ```
pub struct CatrineandoPaths;

impl CatrineandoPaths {
    /// Returns the Catrineando configuration directory (e.g. `~/.config/catrineando/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the Catrineando data directory (e.g. `~/.local/share/catrineando/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DataDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the key-value storage directory.
    ///
    /// `data_dir_override` replaces the platform data directory when set
    /// (from configuration or the command line).
    pub fn storage_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf, PathError> {
        let base = match data_dir_override {
            Some(dir) => dir.clone(),
            None => Self::data_dir()?,
        };
        Ok(base.join("storage"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        if let Ok(config_file) = CatrineandoPaths::config_file() {
            assert!(config_file.ends_with("catrineando/config.toml"));
        }
    }

    #[test]
    fn test_storage_dir_override() {
        let base = PathBuf::from("/tmp/catrineando-test");
        let dir = CatrineandoPaths::storage_dir(Some(&base)).unwrap();
        assert_eq!(dir, base.join("storage"));
    }

    #[test]
    fn test_storage_dir_default_is_under_data_dir() {
        if let Ok(data_dir) = CatrineandoPaths::data_dir() {
            let dir = CatrineandoPaths::storage_dir(None).unwrap();
            assert!(dir.starts_with(&data_dir));
            assert!(dir.ends_with("storage"));
        }
    }
}
