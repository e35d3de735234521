use lore_core::{FsStore, LoreStore, TreeNode};

pub async fn run(store: &FsStore, slug: &str, json: bool) -> Result<(), String> {
    if store
        .load_meta(slug)
        .await
        .map_err(|e| e.to_string())?
        .is_none()
    {
        return Err(format!("lorebook not found: \"{slug}\""));
    }
    let nodes = store.scan_tree(slug).await.map_err(|e| e.to_string())?;

    if json {
        let text = serde_json::to_string_pretty(&nodes).map_err(|e| e.to_string())?;
        println!("{text}");
    } else if nodes.is_empty() {
        println!("  (empty)");
    } else {
        println!("{}", render(&nodes));
    }
    Ok(())
}

/// Render the tree as an indented outline, two spaces per level.
///
/// Folders end in `/`; entries show their path in brackets.
pub fn render(nodes: &[TreeNode]) -> String {
    let mut lines = Vec::new();
    render_level(nodes, 0, &mut lines);
    lines.join("\n")
}

fn render_level(nodes: &[TreeNode], depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        if node.is_entry {
            lines.push(format!("{indent}{} [{}]", node.name, node.path));
        } else {
            lines.push(format!("{indent}{}/", node.name));
        }
        render_level(&node.children, depth + 1, lines);
    }
}
