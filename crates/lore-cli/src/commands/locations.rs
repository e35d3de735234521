use comfy_table::{ContentArrangement, Table};
use lore_core::{FsStore, list_location_entries};

pub async fn run(store: &FsStore, slug: &str) -> Result<(), String> {
    let locations = list_location_entries(store, slug)
        .await
        .map_err(|e| e.to_string())?;

    if locations.is_empty() {
        println!("  No locations found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Path", "Description"]);

    for location in &locations {
        table.add_row(vec![
            location.entry.display_name(&location.path).to_string(),
            location.path.clone(),
            super::excerpt(&location.entry.content, 60),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} locations", locations.len());

    Ok(())
}
