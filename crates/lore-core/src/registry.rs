//! Whole-lorebook operations: listing, creation, deletion and cloning.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::config::META_FILE;
use crate::error::{LoreError, LoreResult};
use crate::fsio::{Listed, classify, write_json};
use crate::model::{LorebookMeta, LorebookSummary};
use crate::overlay::{Overlay, read_meta};
use crate::slug::sanitize_slug;

pub(crate) async fn list(overlay: &Overlay) -> LoreResult<Vec<LorebookSummary>> {
    let mut books = BTreeMap::new();
    // Presets first so that user lorebooks overwrite them.
    for (meta_root, read_only) in [(overlay.preset_root(), true), (overlay.user_root(), false)] {
        for (slug, meta) in scan_root(meta_root).await? {
            books.insert(
                slug.clone(),
                LorebookSummary {
                    slug,
                    meta,
                    read_only,
                },
            );
        }
    }
    Ok(books.into_values().collect())
}

/// Top-level lorebooks under `root` with valid metadata.
async fn scan_root(root: &Path) -> LoreResult<Vec<(String, LorebookMeta)>> {
    let mut listing = match fs::read_dir(root).await {
        Ok(listing) => listing,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(LoreError::io(root, e)),
    };

    let mut found = Vec::new();
    while let Some(item) = listing
        .next_entry()
        .await
        .map_err(|e| LoreError::io(root, e))?
    {
        // Follows symlinks, like the overlay lookups do.
        let is_dir = fs::metadata(item.path()).await.is_ok_and(|m| m.is_dir());
        let Some(name) = item.file_name().to_str().map(str::to_string) else {
            continue;
        };
        // A directory whose name is not already a clean slug is unreachable.
        if !is_dir || sanitize_slug(&name).ok().as_deref() != Some(name.as_str()) {
            continue;
        }
        if let Some(meta) = read_meta(&item.path()).await {
            found.push((name, meta));
        }
    }
    Ok(found)
}

pub(crate) async fn create(
    overlay: &Overlay,
    slug: &str,
    name: &str,
    template: bool,
) -> LoreResult<LorebookSummary> {
    let slug = sanitize_slug(slug)?;
    let dir = overlay.user_dir(&slug)?;
    if read_meta(&dir).await.is_some() {
        return Err(LoreError::AlreadyExists(slug));
    }

    let meta = LorebookMeta::new(name).with_template(template);
    write_json(&dir.join(META_FILE), &meta).await?;
    tracing::info!(slug = %slug, name, template, "created lorebook");
    Ok(LorebookSummary {
        slug,
        meta,
        read_only: false,
    })
}

pub(crate) async fn delete(overlay: &Overlay, slug: &str) -> LoreResult<bool> {
    overlay.assert_writable(slug).await?;
    let dir = overlay.user_dir(slug)?;
    match fs::remove_dir_all(&dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(LoreError::io(&dir, e)),
    }
    tracing::info!(slug, "deleted lorebook");
    Ok(true)
}

pub(crate) async fn copy(
    overlay: &Overlay,
    src: &str,
    dst: &str,
    dst_name: &str,
) -> LoreResult<Option<LorebookSummary>> {
    let source = overlay.effective_root(src).await?;
    if read_meta(&source).await.is_none() {
        return Ok(None);
    }

    let dst = sanitize_slug(dst)?;
    let target = overlay.user_dir(&dst)?;
    if read_meta(&target).await.is_some() {
        return Err(LoreError::AlreadyExists(dst));
    }

    copy_tree(&source, &target).await?;
    let meta = LorebookMeta::new(dst_name);
    write_json(&target.join(META_FILE), &meta).await?;
    tracing::info!(src, dst = %dst, "copied lorebook");
    Ok(Some(LorebookSummary {
        slug: dst,
        meta,
        read_only: false,
    }))
}

/// Recursively duplicate the contents of `from` into `to`.
///
/// Not transactional: a failure part way leaves a partial copy behind.
async fn copy_tree(from: &Path, to: &Path) -> LoreResult<()> {
    let mut pending: Vec<(PathBuf, PathBuf)> = vec![(from.to_path_buf(), to.to_path_buf())];
    while let Some((src_dir, dst_dir)) = pending.pop() {
        fs::create_dir_all(&dst_dir)
            .await
            .map_err(|e| LoreError::io(&dst_dir, e))?;
        let mut listing = fs::read_dir(&src_dir)
            .await
            .map_err(|e| LoreError::io(&src_dir, e))?;
        while let Some(item) = listing
            .next_entry()
            .await
            .map_err(|e| LoreError::io(&src_dir, e))?
        {
            let dst_path = dst_dir.join(item.file_name());
            match classify(&item).await {
                Some(Listed::Dir) => pending.push((item.path(), dst_path)),
                Some(Listed::File) => {
                    let src_path = item.path();
                    fs::copy(&src_path, &dst_path)
                        .await
                        .map_err(|e| LoreError::io(&src_path, e))?;
                }
                None => {}
            }
        }
    }
    Ok(())
}

pub(crate) async fn load_meta(overlay: &Overlay, slug: &str) -> LoreResult<Option<LorebookMeta>> {
    let root = overlay.effective_root(slug).await?;
    Ok(read_meta(&root).await)
}

pub(crate) async fn save_meta(overlay: &Overlay, slug: &str, meta: &LorebookMeta) -> LoreResult<()> {
    overlay.assert_writable(slug).await?;
    let root = overlay.effective_root(slug).await?;
    write_json(&root.join(META_FILE), meta).await?;
    tracing::info!(slug, name = %meta.name, "saved lorebook metadata");
    Ok(())
}

pub(crate) async fn unique_slug(overlay: &Overlay, base: &str) -> LoreResult<String> {
    let base = sanitize_slug(base)?;
    let mut candidate = base.clone();
    let mut counter = 2u32;
    while is_taken(overlay, &candidate).await? {
        candidate = format!("{base}-{counter}");
        counter += 1;
    }
    Ok(candidate)
}

async fn is_taken(overlay: &Overlay, slug: &str) -> LoreResult<bool> {
    for dir in [overlay.user_dir(slug)?, overlay.preset_dir(slug)?] {
        if fs::try_exists(&dir)
            .await
            .map_err(|e| LoreError::io(&dir, e))?
        {
            return Ok(true);
        }
    }
    Ok(false)
}
