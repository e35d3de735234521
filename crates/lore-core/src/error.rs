use std::path::PathBuf;

/// Alias for `Result<T, LoreError>`.
pub type LoreResult<T> = Result<T, LoreError>;

/// Errors that abort a lorebook operation.
///
/// Data-quality problems (missing records, corrupt JSON, bad patterns) are not
/// errors; they surface as `None`, `false`, or a skipped record instead.
#[derive(Debug, thiserror::Error)]
pub enum LoreError {
    /// The slug contains no `[a-zA-Z0-9_-]` characters.
    #[error("invalid slug: \"{0}\"")]
    InvalidSlug(String),

    /// A relative path resolved outside its lorebook root.
    #[error("path escapes lorebook root: \"{0}\"")]
    PathTraversal(String),

    /// A relative path is empty, names the metadata file, or targets the root.
    #[error("invalid path: \"{0}\"")]
    InvalidPath(String),

    /// The lorebook only exists as a shipped preset and cannot be modified.
    #[error("lorebook \"{0}\" is a read-only preset")]
    PresetImmutable(String),

    /// A user lorebook with this slug already exists.
    #[error("lorebook already exists: \"{0}\"")]
    AlreadyExists(String),

    /// A filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A record could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoreError {
    /// Wrap an I/O error together with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
