// Output formatting: view-model construction and terminal display.

pub mod terminal;
pub mod view;

/// Truncate a string to at most `max_chars` characters, ellipsis included
/// in the limit so table columns stay bounded. Respects UTF-8 character
/// boundaries and never panics on multi-byte characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
