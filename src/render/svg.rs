//! SVG string builder.

use crate::interaction::Interaction;
use crate::layout::{Scene, ACTIVE_NODE_RADIUS, EARLY_NODE_RADIUS, NODE_RADIUS, TERMINAL_RADIUS};
use crate::model::{Chart, Target};

use super::{short_title, BORDER, SURFACE, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY};

const GRID_PITCH: f64 = 24.0;
const MONO: &str = "'JetBrains Mono', monospace";
const SANS: &str = "'DM Sans', sans-serif";

/// Render `scene` (computed from `chart`) with the emphasis implied by `state`.
pub fn render_svg(chart: &Chart, scene: &Scene, state: &Interaction) -> String {
    let w = scene.canvas.width;
    let h = scene.canvas.height;
    let mut content = String::new();

    content.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"{SANS}\">\n"
    ));
    content.push_str(&format!("<title>{}</title>\n", escape(&chart.tab)));
    content.push_str(concat!(
        "<defs><filter id=\"nodeGlow\"><feGaussianBlur stdDeviation=\"6\" result=\"blur\"/>",
        "<feMerge><feMergeNode in=\"blur\"/><feMergeNode in=\"SourceGraphic\"/></feMerge>",
        "</filter></defs>\n"
    ));
    content.push_str(&format!(
        "<rect width=\"{w}\" height=\"{h}\" rx=\"12\" fill=\"{SURFACE}\" stroke=\"{BORDER}\"/>\n"
    ));

    push_grid(&mut content, w, h);
    push_phase_guides(&mut content, chart, scene);

    if let Some(dx) = scene.divergence_x {
        content.push_str(&format!(
            "<rect x=\"{}\" y=\"36\" width=\"{}\" height=\"{}\" rx=\"8\" fill=\"{}\" opacity=\"0.018\"/>\n",
            dx + 10.0,
            w - dx - 18.0,
            h - 52.0,
            chart.primary_branch().color
        ));
    }

    push_branches(&mut content, chart, scene, state);
    push_track_connectors(&mut content, chart, scene, state);
    push_track_terminals(&mut content, chart, scene, state);
    push_overlays(&mut content, chart, scene, state);
    push_nodes(&mut content, chart, scene, state);
    push_axis(&mut content, chart, w, h);

    content.push_str("</svg>\n");
    content
}

fn push_grid(content: &mut String, w: f64, h: f64) {
    let cols = (w / GRID_PITCH).floor() as usize;
    let rows = (h / GRID_PITCH).floor() as usize;
    content.push_str(&format!("<g fill=\"{TEXT_MUTED}\" opacity=\"0.12\">\n"));
    for i in 0..cols {
        for j in 0..rows {
            content.push_str(&format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"0.4\"/>",
                i as f64 * GRID_PITCH + 12.0,
                j as f64 * GRID_PITCH + 12.0
            ));
        }
    }
    content.push_str("\n</g>\n");
}

fn push_phase_guides(content: &mut String, chart: &Chart, scene: &Scene) {
    let h = scene.canvas.height;
    for (guide, phase) in scene.phases.iter().zip(&chart.phases) {
        let x = guide.x;
        let (line_opacity, label_opacity) = if guide.before_divergence {
            (0.3, 0.4)
        } else {
            (0.5, 0.6)
        };
        content.push_str(&format!("<g data-phase=\"{}\">\n", escape(&phase.id)));
        content.push_str(&format!(
            "<line x1=\"{x}\" y1=\"28\" x2=\"{x}\" y2=\"{}\" stroke=\"{BORDER}\" stroke-width=\"0.5\" stroke-dasharray=\"4 6\" opacity=\"{line_opacity}\"/>\n",
            h - 12.0
        ));
        for (li, line) in phase.label.split('\n').enumerate() {
            content.push_str(&format!(
                "<text x=\"{x}\" y=\"{}\" text-anchor=\"middle\" fill=\"{TEXT_MUTED}\" font-size=\"10\" font-family=\"{MONO}\" font-weight=\"500\" opacity=\"{label_opacity}\">{}</text>\n",
                18.0 + li as f64 * 13.0,
                escape(line)
            ));
        }
        if !phase.sublabel.is_empty() {
            content.push_str(&format!(
                "<text x=\"{x}\" y=\"{}\" text-anchor=\"middle\" fill=\"{TEXT_MUTED}\" font-size=\"9\" font-family=\"{MONO}\" opacity=\"0.3\">{}</text>\n",
                h - 16.0,
                escape(&phase.sublabel)
            ));
        }
        content.push_str("</g>\n");
    }
}

fn push_branches(content: &mut String, chart: &Chart, scene: &Scene, state: &Interaction) {
    for layout in &scene.branches {
        if layout.path.is_empty() {
            continue;
        }
        let branch = &chart.branches[layout.index];
        let faded = state.branch_faded(chart, layout.index);
        let dash = if layout.primary { "none" } else { "6 4" };
        content.push_str(&format!(
            "<g data-branch=\"{}\">\n<path d=\"{}\" stroke=\"{}\" stroke-width=\"4\" fill=\"none\" opacity=\"{}\"/>\n<path d=\"{}\" stroke=\"{}\" stroke-width=\"1.5\" fill=\"none\" opacity=\"{}\" stroke-dasharray=\"{dash}\"/>\n</g>\n",
            escape(&branch.id),
            layout.path,
            branch.color,
            if faded { 0.04 } else { 0.15 },
            layout.path,
            branch.color,
            if faded { 0.12 } else { 0.6 },
        ));
    }
}

fn push_track_connectors(content: &mut String, chart: &Chart, scene: &Scene, state: &Interaction) {
    for layout in &scene.tracks {
        let track = &chart.tracks[layout.index];
        let faded = state.track_faded(chart, track);
        for (branch, path) in &layout.paths {
            content.push_str(&format!(
                "<g data-connector=\"{}-from-{}\">\n<path d=\"{path}\" stroke=\"{}\" stroke-width=\"3\" fill=\"none\" opacity=\"{}\"/>\n<path d=\"{path}\" stroke=\"{}\" stroke-width=\"1\" fill=\"none\" opacity=\"{}\" stroke-dasharray=\"4 4\"/>\n</g>\n",
                escape(&track.id),
                escape(branch),
                track.color,
                if faded { 0.03 } else { 0.12 },
                track.color,
                if faded { 0.08 } else { 0.45 },
            ));
        }
    }
}

fn push_track_terminals(content: &mut String, chart: &Chart, scene: &Scene, state: &Interaction) {
    for layout in &scene.tracks {
        let track = &chart.tracks[layout.index];
        let active = state.is_selected(&Target::Track(track.id.clone()));
        let faded = state.terminal_faded(track);
        let p = layout.terminal;

        content.push_str(&format!(
            "<g data-track=\"{}\">\n<title>{}</title>\n",
            escape(&track.id),
            escape(&track.label)
        ));
        if active {
            content.push_str(&format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"22\" fill=\"{}\" opacity=\"0.12\" filter=\"url(#nodeGlow)\"/>\n",
                p.x, p.y, track.color
            ));
        }
        content.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{TERMINAL_RADIUS}\" fill=\"{SURFACE}\" stroke=\"{}\" stroke-width=\"{}\" opacity=\"{}\"/>\n",
            p.x,
            p.y,
            track.color,
            if active { 2.5 } else { 2.0 },
            if faded { 0.3 } else { 1.0 },
        ));
        content.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"4\" fill=\"{}\" opacity=\"{}\"/>\n",
            p.x,
            p.y,
            track.color,
            if faded { 0.2 } else { 0.8 },
        ));
        content.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"12\" font-weight=\"600\" opacity=\"{}\">{}</text>\n</g>\n",
            p.x,
            layout.label_y,
            if active { TEXT_PRIMARY } else { TEXT_SECONDARY },
            if faded { 0.3 } else { 1.0 },
            escape(&track.label)
        ));
    }
}

fn push_overlays(content: &mut String, chart: &Chart, scene: &Scene, state: &Interaction) {
    for layout in &scene.overlays {
        let overlay = &chart.overlays[layout.index];
        let g = &layout.geometry;
        let active = state.is_selected(&Target::Overlay(overlay.id.clone()));
        let faded = state.overlay_faded(&overlay.id);
        let mid = g.markers[1];

        content.push_str(&format!(
            "<g data-overlay=\"{}\">\n<title>{}</title>\n",
            escape(&overlay.id),
            escape(&overlay.title)
        ));
        content.push_str(&format!(
            "<path d=\"{}\" stroke=\"{}\" stroke-width=\"3\" fill=\"none\" opacity=\"{}\"/>\n",
            g.path,
            overlay.color,
            if faded { 0.04 } else { 0.15 },
        ));
        content.push_str(&format!(
            "<path d=\"{}\" stroke=\"{}\" stroke-width=\"1.5\" fill=\"none\" opacity=\"{}\" stroke-dasharray=\"6 4\"/>\n",
            g.path,
            overlay.color,
            if faded { 0.15 } else { 0.6 },
        ));
        content.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"11\" font-weight=\"600\" opacity=\"{}\">{}</text>\n",
            mid.x,
            mid.y - 12.0,
            overlay.color,
            if faded { 0.3 } else { 0.9 },
            escape(&overlay.band_label)
        ));
        if !overlay.caption.is_empty() {
            content.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"9\" font-family=\"{MONO}\" opacity=\"{}\">{}</text>\n",
                mid.x,
                mid.y + 16.0,
                overlay.color,
                if faded { 0.2 } else { 0.5 },
                escape(&overlay.caption)
            ));
        }
        for (i, marker) in g.markers.iter().enumerate() {
            let radius = match (active, i) {
                (true, _) => 10.0,
                (false, 1) => 8.0,
                _ => 6.0,
            };
            if active {
                content.push_str(&format!(
                    "<circle cx=\"{}\" cy=\"{}\" r=\"18\" fill=\"{}\" opacity=\"0.15\" filter=\"url(#nodeGlow)\"/>\n",
                    marker.x, marker.y, overlay.color
                ));
            }
            content.push_str(&format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{radius}\" fill=\"{SURFACE}\" stroke=\"{}\" stroke-width=\"{}\" opacity=\"{}\"/>\n",
                marker.x,
                marker.y,
                overlay.color,
                if active { 2.5 } else if i == 1 { 2.0 } else { 1.5 },
                if faded { 0.3 } else { 1.0 },
            ));
            content.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"{}\" opacity=\"{}\">{}</text>\n",
                marker.x,
                marker.y + 4.0,
                overlay.color,
                if i == 1 { 10 } else { 8 },
                if faded { 0.3 } else { 1.0 },
                escape(&overlay.icon)
            ));
        }
        content.push_str("</g>\n");
    }
}

fn push_nodes(content: &mut String, chart: &Chart, scene: &Scene, state: &Interaction) {
    for layout in &scene.nodes {
        let node = &chart.nodes[layout.index];
        let color = &chart.branches[node.branch].color;
        let active = state.is_selected(&Target::Node(node.id.clone()));
        let faded = state.node_faded(chart, node);
        let p = layout.position;

        let radius = if active {
            ACTIVE_NODE_RADIUS
        } else if layout.early {
            EARLY_NODE_RADIUS
        } else {
            NODE_RADIUS
        };

        content.push_str(&format!(
            "<g data-node=\"{}\">\n<title>{}</title>\n",
            escape(&node.id),
            escape(&node.title)
        ));
        if active {
            content.push_str(&format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"18\" fill=\"{color}\" opacity=\"0.15\" filter=\"url(#nodeGlow)\"/>\n",
                p.x, p.y
            ));
        }
        content.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{radius}\" fill=\"{SURFACE}\" stroke=\"{color}\" stroke-width=\"{}\" opacity=\"{}\"/>\n",
            p.x,
            p.y,
            if active { 2.5 } else { 1.5 },
            if faded { 0.25 } else { 1.0 },
        ));
        content.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{color}\" opacity=\"{}\"/>\n",
            p.x,
            p.y,
            if layout.early { 2.0 } else { 2.5 },
            if faded {
                0.15
            } else if active {
                1.0
            } else {
                0.6
            },
        ));
        content.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"{}\" font-family=\"{MONO}\" opacity=\"{}\">{}</text>\n</g>\n",
            p.x,
            layout.label_y,
            if active { color.as_str() } else { TEXT_MUTED },
            if layout.early { 8 } else { 9 },
            if faded {
                0.2
            } else if active {
                1.0
            } else {
                0.5
            },
            escape(&short_title(&node.title))
        ));
    }
}

fn push_axis(content: &mut String, chart: &Chart, w: f64, h: f64) {
    let y = h - 4.0;
    let tip = w * 0.96;
    content.push_str(&format!(
        "<line x1=\"{}\" y1=\"{y}\" x2=\"{tip}\" y2=\"{y}\" stroke=\"{TEXT_MUTED}\" stroke-width=\"0.5\" opacity=\"0.2\"/>\n",
        w * 0.02
    ));
    content.push_str(&format!(
        "<polygon points=\"{tip},{} {},{y} {tip},{}\" fill=\"{TEXT_MUTED}\" opacity=\"0.2\"/>\n",
        h - 7.0,
        w * 0.98,
        h - 1.0
    ));
    if !chart.axis_caption.is_empty() {
        content.push_str(&format!(
            "<text x=\"{}\" y=\"{y}\" text-anchor=\"middle\" fill=\"{TEXT_MUTED}\" font-size=\"8\" font-family=\"{MONO}\" opacity=\"0.3\">{}</text>\n",
            w * 0.5,
            escape(&chart.axis_caption)
        ));
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::layout::Canvas;
    use crate::model::Spectrum;

    fn render(chart_index: usize, state: &Interaction) -> String {
        let spectrum = Spectrum::from_config(&Config::builtin().unwrap()).unwrap();
        let chart = &spectrum.charts[chart_index];
        let scene = Scene::compute(chart, Canvas::new(960.0, chart.height));
        render_svg(chart, &scene, state)
    }

    fn group<'a>(svg: &'a str, marker: &str) -> &'a str {
        let start = svg.find(marker).unwrap();
        let end = start + svg[start..].find("</g>").unwrap();
        &svg[start..end]
    }

    #[test]
    fn test_future_chart_elements() {
        let svg = render(1, &Interaction::new(1));
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"960\" height=\"580\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<g data-node=").count(), 16);
        assert_eq!(svg.matches("<g data-connector=").count(), 5);
        assert_eq!(svg.matches("<g data-track=").count(), 2);
        assert_eq!(svg.matches("<g data-branch=").count(), 5);
        assert!(svg.contains("data-connector=\"em-from-people\""));
        assert!(svg.contains("increasing scope &amp; responsibility →"));
        // Two-line phase label
        assert!(svg.contains(">Senior</text>"));
        assert!(svg.contains(">(Growing)</text>"));
        // Divergence backdrop
        assert!(svg.contains("opacity=\"0.018\""));
    }

    #[test]
    fn test_primary_branch_is_solid() {
        let svg = render(1, &Interaction::new(1));
        assert!(group(&svg, "<g data-branch=\"ic\"").contains("stroke-dasharray=\"none\""));
        assert!(group(&svg, "<g data-branch=\"people\"").contains("stroke-dasharray=\"6 4\""));
    }

    #[test]
    fn test_selection_fades_other_nodes() {
        let mut state = Interaction::new(1);
        state.hover(Target::Node("del-2".into()));
        let svg = render(1, &state);

        let active = group(&svg, "<g data-node=\"del-2\"");
        assert!(active.contains("filter=\"url(#nodeGlow)\""));
        assert!(active.contains(&format!("r=\"{ACTIVE_NODE_RADIUS}\"")));

        let other = group(&svg, "<g data-node=\"trd-2\"");
        assert!(other.contains("opacity=\"0.25\""));
        assert!(!other.contains("nodeGlow"));

        let staff = group(&svg, "<g data-connector=\"staff-from-ic\"");
        assert!(staff.contains("opacity=\"0.03\""));
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let svg = render(1, &Interaction::new(1));
        let node = group(&svg, "<g data-node=\"ic-grow\"");
        // 26 characters fit exactly
        assert!(node.contains(">Broadening Technical Depth</text>"));
    }

    #[test]
    fn test_current_chart_overlay() {
        let svg = render(0, &Interaction::new(0));
        assert!(svg.contains("height=\"420\""));
        assert_eq!(svg.matches("<g data-overlay=").count(), 1);
        let overlay = group(&svg, "<g data-overlay=\"tech-lead\"");
        assert_eq!(overlay.matches(">★</text>").count(), 3);
        assert!(overlay.contains(">additional responsibilities (not a level)</text>"));
        assert!(!svg.contains("opacity=\"0.018\""));
        assert_eq!(svg.matches("<g data-track=").count(), 0);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }
}
