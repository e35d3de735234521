use colored::Colorize;
use lore_core::{FsStore, LoreStore};

pub async fn run(
    store: &FsStore,
    src: &str,
    dst: Option<&str>,
    name: Option<&str>,
) -> Result<(), String> {
    let source_meta = store
        .load_meta(src)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("lorebook not found: \"{src}\""))?;

    let dst = match dst {
        Some(dst) => dst.to_string(),
        None => store.unique_slug(src).await.map_err(|e| e.to_string())?,
    };
    let name = name.unwrap_or(&source_meta.name);

    let summary = store
        .copy(src, &dst, name)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("lorebook not found: \"{src}\""))?;

    println!(
        "  {} {} to {} (\"{}\")",
        "Copied".green().bold(),
        src,
        summary.slug.bold(),
        summary.meta.name
    );
    Ok(())
}
