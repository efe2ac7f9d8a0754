//! Reusable TUI widgets

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::render::{BG, BORDER, SURFACE, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY};

/// Status message tone for styling
#[derive(Clone, Copy, Default)]
pub enum StatusTone {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl StatusTone {
    pub fn color(self) -> Color {
        match self {
            StatusTone::Info => Color::Cyan,
            StatusTone::Success => Color::Green,
            StatusTone::Error => Color::Red,
            StatusTone::Warning => Color::Yellow,
        }
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Terminal color for a `#rrggbb` chart color
pub fn hex_color(hex: &str) -> Color {
    match parse_hex(hex) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::Gray,
    }
}

/// A chart color mixed into the background, standing in for SVG opacity
pub fn faded_color(hex: &str, opacity: f64) -> Color {
    let (Some(fg), Some(bg)) = (parse_hex(hex), parse_hex(BG)) else {
        return Color::DarkGray;
    };
    let opacity = opacity.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (b as f64 + (f as f64 - b as f64) * opacity).round() as u8;
    Color::Rgb(mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}

pub fn color_bg() -> Color {
    hex_color(BG)
}

pub fn color_panel() -> Color {
    hex_color(SURFACE)
}

pub fn color_border() -> Color {
    hex_color(BORDER)
}

pub fn color_text() -> Color {
    hex_color(TEXT_PRIMARY)
}

pub fn color_accent() -> Color {
    hex_color(TEXT_SECONDARY)
}

pub fn color_muted() -> Color {
    hex_color(TEXT_MUTED)
}

/// Create a themed block with consistent styling
pub fn themed_block(title: impl Into<String>, border_color: Color) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            title.into(),
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(color_panel()).fg(color_text()))
}

/// A `width` x `height` box next to `anchor` (in cells), kept inside `area`.
/// Prefers the right side of the anchor and flips left when it would not fit.
pub fn popup_beside(anchor: (u16, u16), width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let right_edge = area.x + area.width;
    let bottom_edge = area.y + area.height;

    let x = if anchor.0 + 2 + width <= right_edge {
        anchor.0 + 2
    } else {
        anchor.0.saturating_sub(width + 2).max(area.x)
    };
    let y = anchor
        .1
        .saturating_sub(height / 2)
        .clamp(area.y, bottom_edge - height);

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Draw a command palette at the bottom of the screen
pub fn draw_command_palette(frame: &mut Frame<'_>, area: Rect, buffer: &str) {
    let height = 3;
    if area.height < height + 2 {
        return;
    }
    let popup = Rect {
        x: area.x + 2,
        y: area.y + area.height - height - 1,
        width: area.width.saturating_sub(4),
        height,
    };
    frame.render_widget(Clear, popup);
    let block = themed_block("Command", color_accent());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    let paragraph = Paragraph::new(format!(":{}", buffer))
        .style(Style::default().bg(color_panel()).fg(color_text()))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

/// Draw a status bar with message and help text
pub fn draw_status_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    message: &str,
    tone: StatusTone,
    state_line: &str,
    help_line: &str,
) {
    let info = Line::styled(
        message,
        Style::default()
            .fg(tone.color())
            .add_modifier(Modifier::BOLD),
    );
    let state = Line::from(state_line.to_string());
    let help = Line::styled(help_line.to_string(), Style::default().fg(color_muted()));

    let paragraph = Paragraph::new(vec![info, state, help])
        .style(Style::default().bg(color_panel()).fg(color_text()))
        .block(themed_block("Status", color_border()))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#c9865a"), Color::Rgb(0xc9, 0x86, 0x5a));
        assert_eq!(hex_color("c9865a"), Color::Gray);
        assert_eq!(hex_color("#c9865"), Color::Gray);
    }

    #[test]
    fn test_faded_color_blends_toward_background() {
        assert_eq!(faded_color("#ffffff", 1.0), Color::Rgb(255, 255, 255));
        assert_eq!(faded_color("#ffffff", 0.0), hex_color(BG));
        assert_eq!(faded_color("#0c0e14", 0.5), hex_color(BG));
    }

    #[test]
    fn test_popup_beside_flips_at_right_edge() {
        let area = Rect::new(0, 0, 100, 40);
        let right = popup_beside((10, 20), 30, 10, area);
        assert_eq!((right.x, right.y), (12, 15));

        let left = popup_beside((90, 2), 30, 10, area);
        assert_eq!((left.x, left.y), (58, 0));
        assert!(left.x + left.width <= area.width);
    }
}
