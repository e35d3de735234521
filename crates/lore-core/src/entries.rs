//! Entry CRUD against the effective root of a lorebook.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::config::{ENTRY_EXTENSION, META_FILE};
use crate::error::{LoreError, LoreResult};
use crate::fsio::{Listed, ReadOutcome, classify, is_empty_dir, read_json, write_json};
use crate::model::Entry;
use crate::overlay::Overlay;
use crate::slug::{resolve_dir_path, resolve_entry_path, trim_rel};

pub(crate) async fn load(overlay: &Overlay, slug: &str, path: &str) -> LoreResult<Option<Entry>> {
    let root = overlay.effective_root(slug).await?;
    let file = resolve_entry_path(&root, path)?;
    match read_json(&file).await {
        ReadOutcome::Found(entry) => Ok(Some(entry)),
        ReadOutcome::Missing => Ok(None),
        ReadOutcome::Malformed(reason) => {
            tracing::debug!(slug, path, %reason, "unreadable entry treated as missing");
            Ok(None)
        }
    }
}

pub(crate) async fn save(
    overlay: &Overlay,
    slug: &str,
    path: &str,
    entry: &Entry,
) -> LoreResult<()> {
    overlay.assert_writable(slug).await?;
    let root = overlay.effective_root(slug).await?;
    let file = resolve_entry_path(&root, path)?;
    write_json(&file, entry).await?;
    tracing::info!(slug, path = trim_rel(path), "saved entry");
    Ok(())
}

pub(crate) async fn delete(overlay: &Overlay, slug: &str, path: &str) -> LoreResult<bool> {
    overlay.assert_writable(slug).await?;
    let root = overlay.effective_root(slug).await?;
    let file = resolve_entry_path(&root, path)?;
    match fs::remove_file(&file).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(LoreError::io(&file, e)),
    }
    tracing::info!(slug, path = trim_rel(path), "deleted entry");

    let abs_root = resolve_dir_path(&root, "")?;
    if let Some(parent) = file.parent() {
        prune_empty_dirs(&abs_root, parent).await;
    }
    Ok(true)
}

/// Remove `start` and its ancestors while they are empty, never touching `root`.
///
/// Best effort: directories that vanish underneath us are skipped, and any
/// other failure ends the walk without an error.
async fn prune_empty_dirs(root: &Path, start: &Path) {
    let mut dir = start.to_path_buf();
    while dir.starts_with(root) && dir != root {
        match is_empty_dir(&dir).await {
            Ok(Some(true)) => match fs::remove_dir(&dir).await {
                Ok(()) => tracing::debug!(dir = %dir.display(), "removed empty directory"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::debug!(dir = %dir.display(), error = %e, "stopped directory cleanup");
                    break;
                }
            },
            Ok(Some(false)) => break,
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(error = %e, "stopped directory cleanup");
                break;
            }
        }
        if !dir.pop() {
            break;
        }
    }
}

pub(crate) async fn create_folder(overlay: &Overlay, slug: &str, path: &str) -> LoreResult<()> {
    overlay.assert_writable(slug).await?;
    let root = overlay.effective_root(slug).await?;
    let dir = resolve_dir_path(&root, path)?;
    fs::create_dir_all(&dir)
        .await
        .map_err(|e| LoreError::io(&dir, e))?;
    tracing::info!(slug, path = trim_rel(path), "created folder");
    Ok(())
}

pub(crate) async fn delete_folder(overlay: &Overlay, slug: &str, path: &str) -> LoreResult<bool> {
    overlay.assert_writable(slug).await?;
    let root = overlay.effective_root(slug).await?;
    let dir = resolve_dir_path(&root, path)?;
    if dir == resolve_dir_path(&root, "")? {
        return Err(LoreError::InvalidPath(path.to_string()));
    }
    match fs::remove_dir_all(&dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(LoreError::io(&dir, e)),
    }
    tracing::info!(slug, path = trim_rel(path), "deleted folder");
    Ok(true)
}

pub(crate) async fn load_all(overlay: &Overlay, slug: &str) -> LoreResult<Vec<(String, Entry)>> {
    let root = overlay.effective_root(slug).await?;
    let mut found = Vec::new();
    let mut pending: Vec<(PathBuf, String)> = vec![(root, String::new())];

    while let Some((dir, prefix)) = pending.pop() {
        let mut listing = match fs::read_dir(&dir).await {
            Ok(listing) => listing,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(LoreError::io(&dir, e)),
        };
        while let Some(item) = listing
            .next_entry()
            .await
            .map_err(|e| LoreError::io(&dir, e))?
        {
            let Some(kind) = classify(&item).await else {
                continue;
            };
            let item_path = item.path();
            let Some(name) = item_path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if kind == Listed::Dir {
                let child_prefix = join_rel(&prefix, name);
                pending.push((item_path.clone(), child_prefix));
                continue;
            }
            let Some(stem) = record_stem(&item_path, prefix.is_empty()) else {
                continue;
            };
            let rel = join_rel(&prefix, stem);
            match read_json::<Entry>(&item_path).await {
                ReadOutcome::Found(entry) => found.push((rel, entry)),
                ReadOutcome::Missing => {}
                ReadOutcome::Malformed(reason) => {
                    tracing::warn!(slug, path = %rel, %reason, "skipping corrupt entry");
                }
            }
        }
    }

    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}

/// The entry stem of `file` if it is a record file.
///
/// `at_root` excludes the lorebook metadata file.
pub(crate) fn record_stem(file: &Path, at_root: bool) -> Option<&str> {
    if file.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXTENSION) {
        return None;
    }
    let name = file.file_name()?.to_str()?;
    if at_root && name == META_FILE {
        return None;
    }
    file.file_stem()?.to_str()
}

pub(crate) fn join_rel(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
