use colored::Colorize;
use lore_core::{FsStore, LoreStore};

/// Change the display name; `template` of `None` keeps the stored flag.
pub async fn run(
    store: &FsStore,
    slug: &str,
    name: &str,
    template: Option<bool>,
) -> Result<(), String> {
    let mut meta = store
        .load_meta(slug)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("lorebook not found: \"{slug}\""))?;

    meta.name = name.to_string();
    if let Some(template) = template {
        meta.template = template;
    }
    store
        .save_meta(slug, &meta)
        .await
        .map_err(|e| e.to_string())?;

    println!("  {} {} to \"{}\"", "Renamed".green().bold(), slug.bold(), name);
    Ok(())
}
