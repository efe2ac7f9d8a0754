//! Tab bar, legend and the floating detail card

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::detail::Detail;
use crate::model::{Chart, Spectrum};
use crate::tui::widgets::{
    color_accent, color_border, color_muted, color_panel, color_text, hex_color, popup_beside,
    themed_block,
};
use crate::tui::{ellipsize, wrap_text};

const DETAIL_WIDTH: u16 = 46;

pub fn draw_tabs(frame: &mut Frame<'_>, area: Rect, spectrum: &Spectrum, active: usize) {
    let titles: Vec<Line> = spectrum
        .charts
        .iter()
        .map(|c| Line::from(c.tab.clone()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(active)
        .block(themed_block(spectrum.title.clone(), color_border()))
        .style(Style::default().fg(color_muted()))
        .highlight_style(
            Style::default()
                .fg(color_text())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(" │ ");
    frame.render_widget(tabs, area);
}

/// Branch, track and overlay key, plus the chart description
pub fn draw_legend(frame: &mut Frame<'_>, area: Rect, chart: &Chart) {
    let width = area.width.saturating_sub(4) as usize;
    let mut lines = Vec::new();

    for branch in &chart.branches {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", branch.icon),
                Style::default().fg(hex_color(&branch.color)),
            ),
            Span::raw(ellipsize(&branch.label, width.saturating_sub(2))),
        ]));
    }
    for track in &chart.tracks {
        lines.push(Line::from(vec![
            Span::styled("○ ", Style::default().fg(hex_color(&track.color))),
            Span::raw(ellipsize(&track.legend, width.saturating_sub(2))),
        ]));
    }
    for overlay in &chart.overlays {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", overlay.icon),
                Style::default().fg(hex_color(&overlay.color)),
            ),
            Span::raw(ellipsize(&overlay.legend, width.saturating_sub(2))),
        ]));
    }

    if !chart.description.is_empty() {
        lines.push(Line::from(""));
        for line in wrap_text(&chart.description, width) {
            lines.push(Line::styled(line, Style::default().fg(color_muted())));
        }
    }

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(color_panel()).fg(color_text()))
        .block(themed_block("Legend", color_border()));
    frame.render_widget(paragraph, area);
}

/// Detail card floating next to `anchor` (a cell position inside `area`)
pub fn draw_detail_popup(frame: &mut Frame<'_>, area: Rect, anchor: (u16, u16), detail: &Detail) {
    let color = hex_color(&detail.color);
    let text_width = DETAIL_WIDTH.saturating_sub(4) as usize;

    let kicker = match &detail.icon {
        Some(icon) => format!("{} {}", icon, detail.kicker.to_uppercase()),
        None => detail.kicker.to_uppercase(),
    };
    let mut lines = vec![Line::styled(
        ellipsize(&kicker, text_width),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if let Some(note) = &detail.note {
        for line in wrap_text(note, text_width) {
            lines.push(Line::styled(line, Style::default().fg(color_accent())));
        }
    }
    lines.push(Line::from(""));
    for item in &detail.items {
        for (i, line) in wrap_text(item, text_width - 2).into_iter().enumerate() {
            let bullet = if i == 0 { "• " } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(bullet, Style::default().fg(color)),
                Span::raw(line),
            ]));
        }
    }

    let height = lines.len() as u16 + 2;
    let popup = popup_beside(anchor, DETAIL_WIDTH, height, area);
    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(color_panel()).fg(color_text()))
        .block(themed_block(ellipsize(&detail.title, text_width), color))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup);
}
