//! Small JSON file helpers shared by the store modules.

use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;

use crate::error::{LoreError, LoreResult};

/// Outcome of reading a JSON record from disk.
pub(crate) enum ReadOutcome<T> {
    Found(T),
    Missing,
    Malformed(String),
}

impl<T> ReadOutcome<T> {
    pub(crate) fn ok(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Missing | Self::Malformed(_) => None,
        }
    }
}

/// Read and parse a JSON file, distinguishing absence from corruption.
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> ReadOutcome<T> {
    let text = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return ReadOutcome::Missing,
        Err(e) => return ReadOutcome::Malformed(e.to_string()),
    };
    match serde_json::from_str(&text) {
        Ok(value) => ReadOutcome::Found(value),
        Err(e) => ReadOutcome::Malformed(e.to_string()),
    }
}

/// Write `value` as pretty JSON with a trailing newline.
///
/// Each write goes to its own temporary sibling which is then renamed into
/// place, so readers never observe a half-written record and concurrent
/// writers to one path end with the last rename winning.
pub(crate) async fn write_json<T: Serialize>(path: &Path, value: &T) -> LoreResult<()> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();
    fs::create_dir_all(&dir)
        .await
        .map_err(|e| LoreError::io(&dir, e))?;

    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || persist(&dir, &target, &bytes))
        .await
        .map_err(|e| LoreError::io(path, std::io::Error::other(e)))?
}

fn persist(dir: &Path, target: &Path, bytes: &[u8]) -> LoreResult<()> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".").suffix(".tmp");
    // Temp files default to owner-only; records are ordinary files.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    let mut tmp = builder
        .tempfile_in(dir)
        .map_err(|e| LoreError::io(dir, e))?;
    tmp.write_all(bytes)
        .map_err(|e| LoreError::io(tmp.path(), e))?;
    tmp.persist(target)
        .map_err(|e| LoreError::io(target, e.error))?;
    Ok(())
}

/// What a directory listing item is, for walking a lorebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Listed {
    File,
    Dir,
}

/// Classify `item`, following symlinks that point at regular files.
///
/// Symlinked directories are skipped so walks cannot loop.
pub(crate) async fn classify(item: &fs::DirEntry) -> Option<Listed> {
    let file_type = item.file_type().await.ok()?;
    if file_type.is_dir() {
        Some(Listed::Dir)
    } else if file_type.is_file() {
        Some(Listed::File)
    } else if file_type.is_symlink() {
        let meta = fs::metadata(item.path()).await.ok()?;
        meta.is_file().then_some(Listed::File)
    } else {
        None
    }
}

/// Whether `dir` exists and contains nothing.
///
/// A directory that has vanished reports `Ok(None)`.
pub(crate) async fn is_empty_dir(dir: &Path) -> LoreResult<Option<bool>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(LoreError::io(dir, e)),
    };
    let first = entries
        .next_entry()
        .await
        .map_err(|e| LoreError::io(dir, e))?;
    Ok(Some(first.is_none()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn written_records_end_with_newline() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested/record.json");
        write_json(&path, &serde_json::json!({ "name": "Sage" }))
            .await
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("}\n"));
        let value: Option<serde_json::Value> = read_json(&path).await.ok();
        assert_eq!(value.unwrap()["name"], "Sage");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn written_records_get_ordinary_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("record.json");
        write_json(&path, &serde_json::json!({})).await.unwrap();
        let plain = tmp.path().join("plain.json");
        std::fs::File::create(&plain).unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&plain));
    }
}
