//! The storage interface and its filesystem implementation.

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::error::LoreResult;
use crate::model::{Entry, LorebookMeta, LorebookSummary, TreeNode};
use crate::overlay::Overlay;
use crate::{entries, registry, tree};

/// Everything callers can do with lorebooks.
///
/// Slugs are sanitized by the implementation; paths are slash-separated and
/// relative to the lorebook, without the record extension. Absence is never
/// an error: it is reported as `None` or `false`.
#[async_trait]
pub trait LoreStore: Send + Sync {
    /// Load the entry at `path`, or `None` if it is missing or unreadable.
    async fn load(&self, slug: &str, path: &str) -> LoreResult<Option<Entry>>;

    /// Create or overwrite the entry at `path`.
    async fn save(&self, slug: &str, path: &str, entry: &Entry) -> LoreResult<()>;

    /// Remove the entry at `path` and any directories left empty above it.
    async fn delete(&self, slug: &str, path: &str) -> LoreResult<bool>;

    /// Create the folder at `path` and its parents.
    async fn create_folder(&self, slug: &str, path: &str) -> LoreResult<()>;

    /// Remove the folder at `path` with everything beneath it.
    async fn delete_folder(&self, slug: &str, path: &str) -> LoreResult<bool>;

    /// Every readable entry of the lorebook with its path, sorted by path.
    async fn load_all(&self, slug: &str) -> LoreResult<Vec<(String, Entry)>>;

    /// The lorebook as a browse tree.
    async fn scan_tree(&self, slug: &str) -> LoreResult<Vec<TreeNode>>;

    /// All lorebooks visible through the overlay, sorted by slug.
    async fn list(&self) -> LoreResult<Vec<LorebookSummary>>;

    /// Create a new user lorebook.
    async fn create(&self, slug: &str, name: &str, template: bool)
    -> LoreResult<LorebookSummary>;

    /// Remove a user lorebook with all its entries.
    async fn delete_lorebook(&self, slug: &str) -> LoreResult<bool>;

    /// Duplicate `src` (user or preset) into a new user lorebook `dst`.
    async fn copy(
        &self,
        src: &str,
        dst: &str,
        dst_name: &str,
    ) -> LoreResult<Option<LorebookSummary>>;

    /// Metadata of the lorebook, if it exists.
    async fn load_meta(&self, slug: &str) -> LoreResult<Option<LorebookMeta>>;

    /// Overwrite the metadata of the lorebook.
    async fn save_meta(&self, slug: &str, meta: &LorebookMeta) -> LoreResult<()>;
}

/// A [`LoreStore`] backed by two directory trees.
#[derive(Debug, Clone)]
pub struct FsStore {
    overlay: Overlay,
}

impl FsStore {
    /// Create a store over the roots in `config`.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            overlay: Overlay::new(&config),
        }
    }

    /// The overlay resolver used by this store.
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// First free slug among `base`, `base-2`, `base-3`, ...
    pub async fn unique_slug(&self, base: &str) -> LoreResult<String> {
        registry::unique_slug(&self.overlay, base).await
    }
}

#[async_trait]
impl LoreStore for FsStore {
    async fn load(&self, slug: &str, path: &str) -> LoreResult<Option<Entry>> {
        entries::load(&self.overlay, slug, path).await
    }

    async fn save(&self, slug: &str, path: &str, entry: &Entry) -> LoreResult<()> {
        entries::save(&self.overlay, slug, path, entry).await
    }

    async fn delete(&self, slug: &str, path: &str) -> LoreResult<bool> {
        entries::delete(&self.overlay, slug, path).await
    }

    async fn create_folder(&self, slug: &str, path: &str) -> LoreResult<()> {
        entries::create_folder(&self.overlay, slug, path).await
    }

    async fn delete_folder(&self, slug: &str, path: &str) -> LoreResult<bool> {
        entries::delete_folder(&self.overlay, slug, path).await
    }

    async fn load_all(&self, slug: &str) -> LoreResult<Vec<(String, Entry)>> {
        entries::load_all(&self.overlay, slug).await
    }

    async fn scan_tree(&self, slug: &str) -> LoreResult<Vec<TreeNode>> {
        tree::scan_tree(&self.overlay, slug).await
    }

    async fn list(&self) -> LoreResult<Vec<LorebookSummary>> {
        registry::list(&self.overlay).await
    }

    async fn create(
        &self,
        slug: &str,
        name: &str,
        template: bool,
    ) -> LoreResult<LorebookSummary> {
        registry::create(&self.overlay, slug, name, template).await
    }

    async fn delete_lorebook(&self, slug: &str) -> LoreResult<bool> {
        registry::delete(&self.overlay, slug).await
    }

    async fn copy(
        &self,
        src: &str,
        dst: &str,
        dst_name: &str,
    ) -> LoreResult<Option<LorebookSummary>> {
        registry::copy(&self.overlay, src, dst, dst_name).await
    }

    async fn load_meta(&self, slug: &str) -> LoreResult<Option<LorebookMeta>> {
        registry::load_meta(&self.overlay, slug).await
    }

    async fn save_meta(&self, slug: &str, meta: &LorebookMeta) -> LoreResult<()> {
        registry::save_meta(&self.overlay, slug, meta).await
    }
}
