//! Browse-tree projection of a lorebook.

use std::collections::BTreeMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tokio::fs;

use crate::entries::{join_rel, record_stem};
use crate::error::{LoreError, LoreResult};
use crate::fsio::{Listed, ReadOutcome, classify, read_json};
use crate::model::{Entry, TreeNode};
use crate::overlay::Overlay;

pub(crate) async fn scan_tree(overlay: &Overlay, slug: &str) -> LoreResult<Vec<TreeNode>> {
    let root = overlay.effective_root(slug).await?;
    scan_dir(root, String::new()).await
}

/// What exists on disk under one name in a directory.
#[derive(Default)]
struct Slot {
    record: Option<PathBuf>,
    dir: Option<PathBuf>,
}

type ScanFuture = Pin<Box<dyn Future<Output = LoreResult<Vec<TreeNode>>> + Send>>;

fn scan_dir(dir: PathBuf, prefix: String) -> ScanFuture {
    Box::pin(async move {
        let mut listing = match fs::read_dir(&dir).await {
            Ok(listing) => listing,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LoreError::io(&dir, e)),
        };

        // Ordered by segment so siblings come out deterministically.
        let mut slots: BTreeMap<String, Slot> = BTreeMap::new();
        while let Some(item) = listing
            .next_entry()
            .await
            .map_err(|e| LoreError::io(&dir, e))?
        {
            let Some(kind) = classify(&item).await else {
                continue;
            };
            let item_path = item.path();
            if kind == Listed::Dir {
                let name = item_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_string);
                if let Some(name) = name {
                    slots.entry(name).or_default().dir = Some(item_path);
                }
            } else {
                let stem = record_stem(&item_path, prefix.is_empty()).map(str::to_string);
                if let Some(stem) = stem {
                    slots.entry(stem).or_default().record = Some(item_path);
                }
            }
        }

        let mut nodes = Vec::with_capacity(slots.len());
        for (segment, slot) in slots {
            let path = join_rel(&prefix, &segment);
            let children = match slot.dir {
                Some(child_dir) => scan_dir(child_dir, path.clone()).await?,
                None => Vec::new(),
            };
            let name = match &slot.record {
                Some(file) => display_name(file, &path).await,
                None => segment,
            };
            nodes.push(TreeNode {
                name,
                path,
                is_entry: slot.record.is_some(),
                children,
            });
        }
        Ok(nodes)
    })
}

/// Stored name of the record, or its stem when blank or unreadable.
async fn display_name(file: &Path, path: &str) -> String {
    match read_json::<Entry>(file).await {
        ReadOutcome::Found(entry) => entry.display_name(path).to_string(),
        ReadOutcome::Missing | ReadOutcome::Malformed(_) => {
            crate::model::path_stem(path).to_string()
        }
    }
}
