//! Lorebook storage for interactive fiction worlds.
//!
//! A lorebook is a tree of lore entries (characters, locations, items, goals)
//! stored as JSON files under one directory per slug. Lorebooks live under two
//! roots: a mutable user root and a read-only preset root shipped with the
//! application. A user copy of a slug shadows the preset of the same slug as a
//! whole.
//!
//! Callers program against [`LoreStore`]; [`FsStore`] is the filesystem
//! implementation. [`find_matching_entries`] ranks the entries relevant to a
//! block of running text.

/// Store roots and reserved file names.
pub mod config;
/// Error types used throughout the crate.
pub mod error;
/// Keyword and pattern matching over a lorebook.
pub mod matching;
/// Entries, lorebook metadata, and the browse tree.
pub mod model;
/// Resolution between the user root and the preset root.
pub mod overlay;
/// Slug sanitizing and traversal-safe path resolution.
pub mod slug;
/// The storage trait and its filesystem implementation.
pub mod store;

mod entries;
mod fsio;
mod registry;
mod tree;

/// Re-export configuration.
pub use config::StoreConfig;
/// Re-export error types.
pub use error::{LoreError, LoreResult};
/// Re-export matching entry points.
pub use matching::{find_matching_entries, list_location_entries, rank_matches};
/// Re-export model types.
pub use model::{Entry, LorebookMeta, LorebookSummary, MatchedEntry, TreeNode};
/// Re-export the overlay resolver.
pub use overlay::Overlay;
/// Re-export the store.
pub use store::{FsStore, LoreStore};
