use comfy_table::{ContentArrangement, Table};
use lore_core::{FsStore, find_matching_entries};

pub async fn run(store: &FsStore, slug: &str, text: &str) -> Result<(), String> {
    let hits = find_matching_entries(store, slug, text)
        .await
        .map_err(|e| e.to_string())?;

    if hits.is_empty() {
        println!("  No entries triggered.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Priority", "Name", "Path", "Content"]);

    for hit in &hits {
        table.add_row(vec![
            hit.entry.priority.to_string(),
            hit.entry.display_name(&hit.path).to_string(),
            hit.path.clone(),
            super::excerpt(&hit.entry.content, 60),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} entries triggered", hits.len());

    Ok(())
}
