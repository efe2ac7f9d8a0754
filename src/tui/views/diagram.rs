//! Braille drawing of a computed scene

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as Segment};
use ratatui::Frame;

use crate::interaction::Interaction;
use crate::layout::{Path, Point, Scene, ACTIVE_NODE_RADIUS, EARLY_NODE_RADIUS, NODE_RADIUS};
use crate::model::{Chart, Target};
use crate::render::{short_title, BORDER, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::tui::sanitize_text;
use crate::tui::widgets::{color_bg, color_border, faded_color, themed_block};

/// Samples per cubic segment
const CURVE_STEPS: usize = 24;

pub struct DiagramStyle {
    pub title: String,
    /// Label every node, not just the selected one
    pub node_labels: bool,
}

pub fn draw_diagram(
    frame: &mut Frame<'_>,
    area: Rect,
    chart: &Chart,
    scene: &Scene,
    state: &Interaction,
    style: &DiagramStyle,
) {
    let w = scene.canvas.width;
    let h = scene.canvas.height;

    let canvas = Canvas::default()
        .block(themed_block(style.title.clone(), color_border()))
        .background_color(color_bg())
        .marker(Marker::Braille)
        .x_bounds([0.0, w])
        .y_bounds([0.0, h])
        .paint(|ctx| {
            draw_guides(ctx, chart, scene);
            ctx.layer();
            draw_connections(ctx, chart, scene, state);
            ctx.layer();
            draw_markers(ctx, chart, scene, state, style.node_labels);
        });
    frame.render_widget(canvas, area);
}

/// Canvas y grows upward; scene y grows downward
fn flip(p: Point, h: f64) -> (f64, f64) {
    (p.x, h - p.y)
}

fn seg(x1: f64, y1: f64, x2: f64, y2: f64, color: Color) -> Segment {
    Segment {
        x1,
        y1,
        x2,
        y2,
        color,
    }
}

fn draw_path(ctx: &mut Context<'_>, path: &Path, h: f64, color: Color) {
    for line in path.flatten(CURVE_STEPS) {
        for pair in line.windows(2) {
            let (x1, y1) = flip(pair[0], h);
            let (x2, y2) = flip(pair[1], h);
            ctx.draw(&seg(x1, y1, x2, y2, color));
        }
    }
}

fn draw_guides(ctx: &mut Context<'_>, chart: &Chart, scene: &Scene) {
    let h = scene.canvas.height;
    for (guide, phase) in scene.phases.iter().zip(&chart.phases) {
        let opacity = if guide.before_divergence { 0.5 } else { 0.8 };
        let color = faded_color(BORDER, opacity);

        // 4 on, 6 off, scaled to canvas units
        let mut y = 28.0;
        while y < h - 12.0 {
            let end = (y + 12.0).min(h - 12.0);
            ctx.draw(&seg(guide.x, h - y, guide.x, h - end, color));
            y += 30.0;
        }

        ctx.print(
            guide.x,
            h - 12.0,
            Line::styled(
                sanitize_text(&phase.label),
                Style::default().fg(faded_color(TEXT_SECONDARY, opacity)),
            ),
        );
    }

    if let Some(dx) = scene.divergence_x {
        let color = faded_color(&chart.primary_branch().color, 0.25);
        ctx.draw(&seg(dx + 10.0, h - 36.0, scene.canvas.width - 8.0, h - 36.0, color));
    }

    if !chart.axis_caption.is_empty() {
        ctx.print(
            scene.canvas.width * 0.4,
            4.0,
            Line::styled(
                chart.axis_caption.clone(),
                Style::default().fg(faded_color(TEXT_MUTED, 0.8)),
            ),
        );
    }
}

fn draw_connections(ctx: &mut Context<'_>, chart: &Chart, scene: &Scene, state: &Interaction) {
    let h = scene.canvas.height;

    for layout in &scene.branches {
        let branch = &chart.branches[layout.index];
        let opacity = if state.branch_faded(chart, layout.index) {
            0.2
        } else {
            0.9
        };
        draw_path(ctx, &layout.path, h, faded_color(&branch.color, opacity));
    }

    for layout in &scene.tracks {
        let track = &chart.tracks[layout.index];
        let opacity = if state.track_faded(chart, track) {
            0.15
        } else {
            0.6
        };
        for (_, path) in &layout.paths {
            draw_path(ctx, path, h, faded_color(&track.color, opacity));
        }
    }

    for layout in &scene.overlays {
        let overlay = &chart.overlays[layout.index];
        let opacity = if state.overlay_faded(&overlay.id) {
            0.2
        } else {
            0.8
        };
        draw_path(ctx, &layout.geometry.path, h, faded_color(&overlay.color, opacity));
    }
}

fn draw_markers(
    ctx: &mut Context<'_>,
    chart: &Chart,
    scene: &Scene,
    state: &Interaction,
    node_labels: bool,
) {
    let w = scene.canvas.width;
    let h = scene.canvas.height;

    for layout in &scene.tracks {
        let track = &chart.tracks[layout.index];
        let active = state.is_selected(&Target::Track(track.id.clone()));
        let opacity = if state.terminal_faded(track) { 0.3 } else { 1.0 };
        let color = faded_color(&track.color, opacity);
        let (x, y) = flip(layout.terminal, h);
        ctx.draw(&Circle {
            x,
            y,
            radius: if active { 22.0 } else { 14.0 },
            color,
        });
        ctx.draw(&Circle {
            x,
            y,
            radius: 4.0,
            color,
        });

        let mut label_style = Style::default().fg(color);
        if active {
            label_style = label_style.add_modifier(Modifier::BOLD);
        }
        ctx.print(
            x - w * 0.12,
            h - layout.label_y,
            Line::styled(track.label.clone(), label_style),
        );
    }

    for layout in &scene.overlays {
        let overlay = &chart.overlays[layout.index];
        let active = state.is_selected(&Target::Overlay(overlay.id.clone()));
        let opacity = if state.overlay_faded(&overlay.id) { 0.3 } else { 1.0 };
        let color = faded_color(&overlay.color, opacity);
        for marker in &layout.geometry.markers {
            let (x, y) = flip(*marker, h);
            ctx.draw(&Circle {
                x,
                y,
                radius: if active { 10.0 } else { 6.0 },
                color,
            });
        }
        let mid = layout.geometry.markers[1];
        ctx.print(
            mid.x - 30.0,
            h - mid.y + 14.0,
            Line::styled(overlay.band_label.clone(), Style::default().fg(color)),
        );
    }

    for layout in &scene.nodes {
        let node = &chart.nodes[layout.index];
        let branch = &chart.branches[node.branch];
        let active = state.is_selected(&Target::Node(node.id.clone()));
        let opacity = if state.node_faded(chart, node) { 0.25 } else { 1.0 };
        let color = faded_color(&branch.color, opacity);
        let (x, y) = flip(layout.position, h);

        let radius = if active {
            ACTIVE_NODE_RADIUS
        } else if layout.early {
            EARLY_NODE_RADIUS
        } else {
            NODE_RADIUS
        };
        ctx.draw(&Circle {
            x,
            y,
            radius,
            color,
        });

        if active || node_labels {
            let text_color = if active {
                faded_color(TEXT_PRIMARY, 1.0)
            } else {
                faded_color(TEXT_MUTED, opacity)
            };
            ctx.print(
                x - 30.0,
                h - layout.label_y,
                Line::styled(short_title(&node.title), Style::default().fg(text_color)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::layout::Canvas;
    use crate::model::Spectrum;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_draws_phase_and_track_labels() {
        let spectrum = Spectrum::from_config(&Config::builtin().unwrap()).unwrap();
        let chart = &spectrum.charts[1];
        let scene = Scene::compute(chart, Canvas::new(960.0, 580.0));
        let state = Interaction::new(1);
        let style = DiagramStyle {
            title: chart.tab.clone(),
            node_labels: false,
        };

        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal
            .draw(|frame| draw_diagram(frame, frame.size(), chart, &scene, &state, &style))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Junior"));
        assert!(text.contains("Staff Engineer"));
        assert!(text.contains(&chart.tab));
    }
}
