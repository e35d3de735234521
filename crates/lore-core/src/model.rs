use serde::{Deserialize, Serialize};

/// One lore record. Stored as a JSON file addressed by its relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    /// Display name. Falls back to the path stem when blank.
    pub name: String,
    /// Free-text lore injected into generation when the entry matches.
    pub content: String,
    /// Trigger words, matched case-insensitively as substrings.
    pub keywords: Vec<String>,
    /// Optional trigger pattern. Empty means no pattern trigger.
    pub regex: String,
    /// Higher priorities rank earlier among matches.
    pub priority: i64,
    /// Disabled entries are never matched.
    pub enabled: bool,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            name: String::new(),
            content: String::new(),
            keywords: Vec::new(),
            regex: String::new(),
            priority: 0,
            enabled: true,
        }
    }
}

impl Entry {
    /// Create an enabled entry with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the lore text.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Add a trigger keyword.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Set the trigger pattern.
    pub fn with_regex(mut self, pattern: impl Into<String>) -> Self {
        self.regex = pattern.into();
        self
    }

    /// Set the ranking priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Enable or disable the entry.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// The name to show for this entry stored at `path`.
    pub fn display_name<'a>(&'a self, path: &'a str) -> &'a str {
        if self.name.trim().is_empty() {
            path_stem(path)
        } else {
            &self.name
        }
    }
}

/// Last segment of a slash-separated path.
pub fn path_stem(path: &str) -> &str {
    let trimmed = path.trim_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Per-lorebook metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LorebookMeta {
    /// Display name of the lorebook.
    pub name: String,
    /// Marks a reusable starting point rather than a live world.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub template: bool,
}

impl LorebookMeta {
    /// Metadata for a live (non-template) lorebook.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: false,
        }
    }

    /// Set the template flag.
    pub fn with_template(mut self, template: bool) -> Self {
        self.template = template;
        self
    }
}

/// A lorebook as returned by the registry listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LorebookSummary {
    /// Sanitized identifier.
    pub slug: String,
    /// Metadata from the effective root.
    pub meta: LorebookMeta,
    /// True when the lorebook resolves to the read-only preset root.
    pub read_only: bool,
}

/// A node in the browse tree of a lorebook.
///
/// A node may be an entry and have children at the same time, when a record
/// and a directory share the same path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Display name.
    pub name: String,
    /// Relative path without extension.
    pub path: String,
    /// Whether a record exists at this path.
    pub is_entry: bool,
    /// Child nodes, ordered by path segment.
    pub children: Vec<TreeNode>,
}

/// An entry found relevant to a block of text, with its path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedEntry {
    /// Relative path of the record.
    pub path: String,
    /// The record itself.
    #[serde(flatten)]
    pub entry: Entry,
}
