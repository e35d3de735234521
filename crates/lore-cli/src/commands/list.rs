use comfy_table::{ContentArrangement, Table};
use lore_core::{FsStore, LoreStore};

pub async fn run(store: &FsStore) -> Result<(), String> {
    let books = store.list().await.map_err(|e| e.to_string())?;

    if books.is_empty() {
        println!("  No lorebooks found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Slug", "Name", "Template", "Source"]);

    for book in &books {
        let template = if book.meta.template { "yes" } else { "" };
        let source = if book.read_only { "preset" } else { "user" };
        table.add_row(vec![book.slug.as_str(), book.meta.name.as_str(), template, source]);
    }

    println!("{table}");
    println!();
    println!("  {} lorebooks", books.len());

    Ok(())
}
