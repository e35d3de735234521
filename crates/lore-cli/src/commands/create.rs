use colored::Colorize;
use lore_core::slug::slugify;
use lore_core::{FsStore, LoreStore};

pub async fn run(
    store: &FsStore,
    name: &str,
    slug: Option<&str>,
    template: bool,
) -> Result<(), String> {
    let slug = slug.map_or_else(|| slugify(name), str::to_string);
    let summary = store
        .create(&slug, name, template)
        .await
        .map_err(|e| e.to_string())?;

    let kind = if template { "template" } else { "lorebook" };
    println!(
        "  {} {kind} \"{}\" as {}",
        "Created".green().bold(),
        summary.meta.name,
        summary.slug.bold()
    );
    Ok(())
}
