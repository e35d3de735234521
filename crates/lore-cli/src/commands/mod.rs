pub mod copy;
pub mod create;
pub mod delete;
pub mod folder;
pub mod list;
pub mod locations;
pub mod matches;
pub mod rename;
pub mod rm;
pub mod set;
pub mod show;
pub mod tree;

/// Shorten `text` to one line of at most `max` characters.
fn excerpt(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        return "—".to_string();
    }
    if line.chars().count() > max || text.trim().lines().nth(1).is_some() {
        let cut: String = line.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut.trim_end())
    } else {
        line.to_string()
    }
}
