//! Keyword and pattern matching of lore entries against running text.
//!
//! An enabled entry matches when any of its keywords occurs in the text
//! (case-insensitive substring), or when its pattern compiles and matches
//! case-insensitively. Matches are ranked by priority, highest first, with
//! ties broken by path so the order is stable across runs.
//!
//! ```no_run
//! # async fn demo() -> lore_core::LoreResult<()> {
//! use lore_core::{FsStore, StoreConfig, find_matching_entries};
//!
//! let store = FsStore::new(StoreConfig::default());
//! let hits = find_matching_entries(&store, "tavern", "Gabrielle pours an ale").await?;
//! for hit in hits {
//!     println!("{} ({})", hit.entry.name, hit.path);
//! }
//! # Ok(())
//! # }
//! ```

use regex::RegexBuilder;

use crate::error::LoreResult;
use crate::model::{Entry, MatchedEntry};
use crate::store::LoreStore;

/// Path prefix of entries shown in the location projection.
pub const LOCATIONS_PREFIX: &str = "locations/";

/// Rank the entries of `slug` that are relevant to `text`.
pub async fn find_matching_entries<S>(
    store: &S,
    slug: &str,
    text: &str,
) -> LoreResult<Vec<MatchedEntry>>
where
    S: LoreStore + ?Sized,
{
    let entries = store.load_all(slug).await?;
    Ok(rank_matches(entries, text))
}

/// Filter `entries` down to those triggered by `text`, best first.
pub fn rank_matches(entries: Vec<(String, Entry)>, text: &str) -> Vec<MatchedEntry> {
    let haystack = text.to_lowercase();
    let mut matched: Vec<MatchedEntry> = entries
        .into_iter()
        .filter(|(path, entry)| entry.enabled && is_triggered(path, entry, text, &haystack))
        .map(|(path, entry)| MatchedEntry { path, entry })
        .collect();

    matched.sort_by(|a, b| {
        b.entry
            .priority
            .cmp(&a.entry.priority)
            .then_with(|| a.path.cmp(&b.path))
    });
    matched
}

fn is_triggered(path: &str, entry: &Entry, text: &str, lowered: &str) -> bool {
    let keyword_hit = entry.keywords.iter().any(|keyword| {
        let keyword = keyword.trim();
        !keyword.is_empty() && lowered.contains(&keyword.to_lowercase())
    });
    keyword_hit || pattern_hit(path, &entry.regex, text)
}

fn pattern_hit(path: &str, pattern: &str, text: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => re.is_match(text),
        Err(e) => {
            tracing::debug!(path, pattern, error = %e, "ignoring invalid entry pattern");
            false
        }
    }
}

/// Entries stored under `locations/`, ordered by display name ignoring case,
/// then by path.
pub async fn list_location_entries<S>(store: &S, slug: &str) -> LoreResult<Vec<MatchedEntry>>
where
    S: LoreStore + ?Sized,
{
    let mut locations: Vec<MatchedEntry> = store
        .load_all(slug)
        .await?
        .into_iter()
        .filter(|(path, _)| path.starts_with(LOCATIONS_PREFIX))
        .map(|(path, entry)| MatchedEntry { path, entry })
        .collect();

    locations.sort_by_cached_key(|m| {
        (
            m.entry.display_name(&m.path).to_lowercase(),
            m.path.clone(),
        )
    });
    Ok(locations)
}
