//! Configuration for a lorebook store.

use std::path::PathBuf;

/// File name of the per-lorebook metadata record.
pub const META_FILE: &str = "_meta.json";

/// File extension of entry records.
pub const ENTRY_EXTENSION: &str = "json";

/// Where lorebooks live on disk.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Mutable root holding user-owned lorebooks.
    pub user_root: PathBuf,
    /// Read-only root holding shipped presets.
    pub preset_root: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            user_root: PathBuf::from("data"),
            preset_root: PathBuf::from("presets"),
        }
    }
}

impl StoreConfig {
    /// Create a configuration from both roots.
    pub fn new(user_root: impl Into<PathBuf>, preset_root: impl Into<PathBuf>) -> Self {
        Self {
            user_root: user_root.into(),
            preset_root: preset_root.into(),
        }
    }

    /// Set the mutable user root.
    pub fn with_user_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.user_root = root.into();
        self
    }

    /// Set the read-only preset root.
    pub fn with_preset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.preset_root = root.into();
        self
    }
}
