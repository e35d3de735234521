//! Slug and path sanitization.
//!
//! Every filesystem access in this crate goes through [`sanitize_slug`],
//! [`resolve_entry_path`], or [`resolve_dir_path`]. The resolvers work
//! lexically: they never touch the disk, so they behave the same for paths
//! that do not exist yet.

use std::path::{Component, Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

use crate::config::{ENTRY_EXTENSION, META_FILE};
use crate::error::{LoreError, LoreResult};

/// Reduce a caller-supplied identifier to `[a-z0-9_-]`.
///
/// Characters outside `[a-zA-Z0-9_-]` are dropped, the rest lowercased.
/// Returns [`LoreError::InvalidSlug`] if nothing survives.
pub fn sanitize_slug(raw: &str) -> LoreResult<String> {
    let slug: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if slug.is_empty() {
        return Err(LoreError::InvalidSlug(raw.to_string()));
    }
    Ok(slug)
}

/// Derive a slug from a human-readable title.
///
/// `"The Cursed Tavern"` becomes `"the-cursed-tavern"`. Accented letters are
/// folded to their ASCII base (`"Café"` becomes `"cafe"`) and other non-ASCII
/// characters are dropped. Titles with no usable characters become
/// `"untitled"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    let folded = title
        .nfkd()
        .filter(|c| c.is_ascii() && !matches!(c, '\'' | '"'));
    for c in folded {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// Strip leading and trailing slashes from a relative path.
pub fn trim_rel(rel: &str) -> &str {
    rel.trim_matches('/')
}

/// Resolve the record file for `rel` inside `root`.
///
/// Appends the record extension, normalizes the result, and fails with
/// [`LoreError::PathTraversal`] if it lands outside `root`. Empty paths and
/// paths that would resolve to the metadata file are [`LoreError::InvalidPath`].
pub fn resolve_entry_path(root: &Path, rel: &str) -> LoreResult<PathBuf> {
    let trimmed = trim_rel(rel);
    if trimmed.is_empty() {
        return Err(LoreError::InvalidPath(rel.to_string()));
    }
    let root = absolute_root(root)?;
    let resolved = normalize(&root.join(format!("{trimmed}.{ENTRY_EXTENSION}")));
    if !resolved.starts_with(&root) || resolved == root {
        return Err(LoreError::PathTraversal(rel.to_string()));
    }
    if resolved == root.join(META_FILE) {
        return Err(LoreError::InvalidPath(rel.to_string()));
    }
    Ok(resolved)
}

/// Resolve the directory for `rel` inside `root`.
///
/// An empty `rel` resolves to `root` itself.
pub fn resolve_dir_path(root: &Path, rel: &str) -> LoreResult<PathBuf> {
    let root = absolute_root(root)?;
    let resolved = normalize(&root.join(trim_rel(rel)));
    if !resolved.starts_with(&root) {
        return Err(LoreError::PathTraversal(rel.to_string()));
    }
    Ok(resolved)
}

fn absolute_root(root: &Path) -> LoreResult<PathBuf> {
    let abs = std::path::absolute(root).map_err(|e| LoreError::io(root, e))?;
    Ok(normalize(&abs))
}

/// Collapse `.` and `..` components without consulting the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
