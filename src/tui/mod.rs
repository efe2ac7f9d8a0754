//! TUI module for ladder
//!
//! Interactive terminal viewer for a spectrum:
//! - Braille drawing of the active chart, resized with the terminal
//! - Hover (mouse) or step (j/k) through nodes, tracks and overlays
//! - Floating detail card for the selection

mod app;
mod views;
mod widgets;

pub use app::{run_tui, TuiConfig};

/// Ellipsize text to fit within max_chars
pub fn ellipsize(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else if max_chars == 0 {
        String::new()
    } else {
        let mut result = value.chars().take(max_chars - 1).collect::<String>();
        result.push('…');
        result
    }
}

/// Collapse line breaks for single-line display
pub fn sanitize_text(value: &str) -> String {
    value.replace(['\n', '\r'], " ")
}

/// Greedy word wrap. Width is counted in characters.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in sanitize_text(text).split_whitespace() {
        let len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = len;
        } else if current_len + 1 + len <= max_width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("Staff Engineer", 20), "Staff Engineer");
        assert_eq!(ellipsize("Staff Engineer", 6), "Staff…");
        assert_eq!(ellipsize("Staff", 0), "");
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("Senior\n(Growing)"), "Senior (Growing)");
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("Owns delivery of a feature area end to end", 16);
        assert_eq!(lines, vec!["Owns delivery of", "a feature area", "end to end"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 16));
    }

    #[test]
    fn test_wrap_counts_characters() {
        // Multi-byte characters count once
        let lines = wrap_text("→ Staff → EM", 7);
        assert_eq!(lines, vec!["→ Staff", "→ EM"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
