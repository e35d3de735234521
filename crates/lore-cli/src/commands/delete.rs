use colored::Colorize;
use lore_core::{FsStore, LoreStore};

pub async fn run(store: &FsStore, slug: &str) -> Result<(), String> {
    let removed = store
        .delete_lorebook(slug)
        .await
        .map_err(|e| e.to_string())?;
    if !removed {
        return Err(format!("lorebook not found: \"{slug}\""));
    }

    println!("  {} lorebook {}", "Deleted".red().bold(), slug.bold());
    if store.overlay().is_preset(slug).await.map_err(|e| e.to_string())? {
        println!("  {}", "The shipped preset of the same name is visible again.".dimmed());
    }
    Ok(())
}
