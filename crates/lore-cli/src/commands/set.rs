use colored::Colorize;
use lore_core::{Entry, FsStore, LoreStore};

/// Field changes requested on the command line. `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct EntryUpdate {
    pub name: Option<String>,
    pub content: Option<String>,
    pub keywords: Vec<String>,
    pub regex: Option<String>,
    pub priority: Option<i64>,
    pub enabled: Option<bool>,
}

impl EntryUpdate {
    fn apply(self, mut entry: Entry) -> Entry {
        if let Some(name) = self.name {
            entry.name = name;
        }
        if let Some(content) = self.content {
            entry.content = content;
        }
        if !self.keywords.is_empty() {
            entry.keywords = self.keywords;
        }
        if let Some(regex) = self.regex {
            entry.regex = regex;
        }
        if let Some(priority) = self.priority {
            entry.priority = priority;
        }
        if let Some(enabled) = self.enabled {
            entry.enabled = enabled;
        }
        entry
    }
}

pub async fn run(store: &FsStore, slug: &str, path: &str, update: EntryUpdate) -> Result<(), String> {
    let existing = store.load(slug, path).await.map_err(|e| e.to_string())?;
    let verb = if existing.is_some() { "Updated" } else { "Created" };
    let entry = update.apply(existing.unwrap_or_default());

    store
        .save(slug, path, &entry)
        .await
        .map_err(|e| e.to_string())?;

    println!(
        "  {} {} [{}]",
        verb.green().bold(),
        entry.display_name(path),
        path.trim_matches('/').dimmed()
    );
    Ok(())
}
