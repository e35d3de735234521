use colored::Colorize;
use lore_core::{FsStore, LoreStore};

pub async fn run(store: &FsStore, slug: &str, path: &str, json: bool) -> Result<(), String> {
    let entry = store
        .load(slug, path)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("entry not found: \"{path}\""))?;

    if json {
        let text = serde_json::to_string_pretty(&entry).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    // Header
    println!(
        "  {} [{}]",
        entry.display_name(path).bold(),
        path.trim_matches('/').dimmed()
    );
    println!();

    if !entry.content.is_empty() {
        for line in entry.content.lines() {
            println!("  {}", line.trim_end());
        }
        println!();
    }

    if !entry.keywords.is_empty() {
        println!("  keywords:   {}", entry.keywords.join(", "));
    }
    if !entry.regex.is_empty() {
        println!("  regex:      {}", entry.regex);
    }
    println!("  priority:   {}", entry.priority);
    if !entry.enabled {
        println!("  {}", "disabled".yellow());
    }

    Ok(())
}
