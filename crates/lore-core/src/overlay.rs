//! Preset overlay resolution.
//!
//! Every slug can exist under two roots: the mutable user root and the
//! read-only preset root. A lorebook "exists" under a root when that root has
//! parseable metadata for it. The user copy, once present, shadows the preset
//! entirely.

use std::path::{Path, PathBuf};

use crate::config::{META_FILE, StoreConfig};
use crate::error::{LoreError, LoreResult};
use crate::fsio::read_json;
use crate::model::LorebookMeta;
use crate::slug::sanitize_slug;

/// Decides which storage root is authoritative for a slug.
#[derive(Debug, Clone)]
pub struct Overlay {
    user_root: PathBuf,
    preset_root: PathBuf,
}

impl Overlay {
    /// Create a resolver over the roots in `config`.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            user_root: config.user_root.clone(),
            preset_root: config.preset_root.clone(),
        }
    }

    /// The mutable root.
    pub fn user_root(&self) -> &Path {
        &self.user_root
    }

    /// The read-only root.
    pub fn preset_root(&self) -> &Path {
        &self.preset_root
    }

    /// Directory of `slug` under the mutable root.
    pub fn user_dir(&self, slug: &str) -> LoreResult<PathBuf> {
        Ok(self.user_root.join(sanitize_slug(slug)?))
    }

    /// Directory of `slug` under the read-only root.
    pub fn preset_dir(&self, slug: &str) -> LoreResult<PathBuf> {
        Ok(self.preset_root.join(sanitize_slug(slug)?))
    }

    /// True iff the read-only root has valid metadata for `slug`.
    pub async fn is_preset(&self, slug: &str) -> LoreResult<bool> {
        Ok(read_meta(&self.preset_dir(slug)?).await.is_some())
    }

    /// True iff `slug` is a preset with no user copy shadowing it.
    pub async fn is_read_only_preset(&self, slug: &str) -> LoreResult<bool> {
        if !self.is_preset(slug).await? {
            return Ok(false);
        }
        Ok(read_meta(&self.user_dir(slug)?).await.is_none())
    }

    /// The lorebook directory that reads and writes for `slug` go to.
    ///
    /// The user directory wins when it has metadata; otherwise the preset
    /// directory when it has metadata; otherwise the user directory, which is
    /// where a new lorebook would be created.
    pub async fn effective_root(&self, slug: &str) -> LoreResult<PathBuf> {
        let user = self.user_dir(slug)?;
        if read_meta(&user).await.is_some() {
            return Ok(user);
        }
        let preset = self.preset_dir(slug)?;
        if read_meta(&preset).await.is_some() {
            tracing::debug!(slug, root = %preset.display(), "resolved to preset root");
            return Ok(preset);
        }
        Ok(user)
    }

    /// Fail with [`LoreError::PresetImmutable`] if `slug` is a read-only preset.
    pub async fn assert_writable(&self, slug: &str) -> LoreResult<()> {
        if self.is_read_only_preset(slug).await? {
            return Err(LoreError::PresetImmutable(sanitize_slug(slug)?));
        }
        Ok(())
    }
}

/// Load the metadata of the lorebook rooted at `dir`, if valid.
pub(crate) async fn read_meta(dir: &Path) -> Option<LorebookMeta> {
    read_json(&dir.join(META_FILE)).await.ok()
}
