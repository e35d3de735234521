use colored::Colorize;
use lore_core::{FsStore, LoreStore};

pub async fn create(store: &FsStore, slug: &str, path: &str) -> Result<(), String> {
    store
        .create_folder(slug, path)
        .await
        .map_err(|e| e.to_string())?;
    println!("  {} {}/", "Created".green().bold(), path.trim_matches('/'));
    Ok(())
}

pub async fn delete(store: &FsStore, slug: &str, path: &str) -> Result<(), String> {
    let removed = store
        .delete_folder(slug, path)
        .await
        .map_err(|e| e.to_string())?;
    if !removed {
        return Err(format!("folder not found: \"{path}\""));
    }
    println!("  {} {}/", "Deleted".red().bold(), path.trim_matches('/'));
    Ok(())
}
