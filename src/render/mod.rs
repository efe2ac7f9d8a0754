//! Renderers that turn a [`crate::layout::Scene`] into output.

pub mod svg;

pub use svg::render_svg;

// Fixed palette shared by every renderer
pub const BG: &str = "#0c0e14";
pub const SURFACE: &str = "#141720";
pub const BORDER: &str = "#232838";
pub const TEXT_PRIMARY: &str = "#e4e8f0";
pub const TEXT_SECONDARY: &str = "#8892a8";
pub const TEXT_MUTED: &str = "#4e5670";

/// Node titles longer than this are cut on the diagram
pub const TITLE_LIMIT: usize = 26;

/// Shorten a node title for display under its marker
pub fn short_title(title: &str) -> String {
    if title.chars().count() > TITLE_LIMIT {
        let mut short: String = title.chars().take(TITLE_LIMIT - 2).collect();
        short.push('…');
        short
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_title() {
        assert_eq!(short_title("Delivery Awareness"), "Delivery Awareness");
        assert_eq!(short_title("Broadening Technical Depth"), "Broadening Technical Depth");
        assert_eq!(
            short_title("Broadening Technical Depths"),
            "Broadening Technical Dep…"
        );
    }
}
