use colored::Colorize;
use lore_core::{FsStore, LoreStore};

pub async fn run(store: &FsStore, slug: &str, path: &str) -> Result<(), String> {
    let removed = store.delete(slug, path).await.map_err(|e| e.to_string())?;
    if !removed {
        return Err(format!("entry not found: \"{path}\""));
    }
    println!("  {} {}", "Deleted".red().bold(), path.trim_matches('/'));
    Ok(())
}
