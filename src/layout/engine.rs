//! Coordinate and connector computation.
//!
//! Everything here is a pure function of the chart and the canvas size, so
//! identical inputs always produce bit-identical output.

use serde::Serialize;

use crate::model::{Chart, Node, Overlay, Track};

use super::geometry::{Path, Point};

/// Terminal points sit at this fraction of the canvas width.
pub const TRACK_END_RATIO: f64 = 0.95;

/// Control point placement for node-to-node segments.
pub const BRANCH_CURVE_BIAS: f64 = 0.5;

/// Control point placement for node-to-terminal segments.
pub const TRACK_CURVE_BIAS: f64 = 0.4;

/// Drawing surface size in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// How far past the divergence phase `phase` lies, from 0 at divergence to 1
/// at the last phase. Phases at or before divergence report 0.
pub fn divergence_progress(phase: usize, divergence: usize, last: usize) -> f64 {
    if phase <= divergence || last <= divergence {
        return 0.0;
    }
    (phase - divergence) as f64 / (last - divergence) as f64
}

pub fn spine_y(chart: &Chart, canvas: Canvas) -> f64 {
    canvas.height * chart.spine_ratio
}

pub fn phase_x(chart: &Chart, phase: usize, canvas: Canvas) -> f64 {
    chart.phases[phase].x * canvas.width
}

/// Vertical coordinate of `branch` at `phase`. Up to and including the
/// divergence phase every branch sits on the spine; afterwards branches fan
/// out in proportion to their offset weight.
pub fn branch_y(chart: &Chart, branch: usize, phase: usize, canvas: Canvas) -> f64 {
    let spine = spine_y(chart, canvas);
    if phase <= chart.divergence {
        return spine;
    }
    let spread = divergence_progress(phase, chart.divergence, chart.last_phase());
    spine + chart.branches[branch].offset * chart.branch_spacing * spread
}

pub fn resolve_node_position(chart: &Chart, node: &Node, canvas: Canvas) -> Point {
    Point::new(
        phase_x(chart, node.phase, canvas),
        branch_y(chart, node.branch, node.phase, canvas),
    )
}

/// Curve threading through `nodes` (ascending phase order). A branch that
/// starts after the first phase grows out of the primary branch one phase
/// earlier.
pub fn build_branch_path(chart: &Chart, nodes: &[&Node], canvas: Canvas) -> Path {
    let Some(first) = nodes.first() else {
        return Path::new();
    };

    let mut points = nodes.iter().map(|n| resolve_node_position(chart, n, canvas));
    let mut path = if first.phase > 0 {
        let origin_phase = first.phase - 1;
        let origin = Point::new(
            phase_x(chart, origin_phase, canvas),
            branch_y(chart, chart.primary, origin_phase, canvas),
        );
        Path::starting_at(origin)
    } else {
        Path::new()
    };

    if path.is_empty() {
        if let Some(p) = points.next() {
            path.move_to(p);
        }
    }
    for p in points {
        path.s_curve_to(p, BRANCH_CURVE_BIAS);
    }
    path
}

pub fn track_terminal(chart: &Chart, track: &Track, canvas: Canvas) -> Point {
    Point::new(
        canvas.width * TRACK_END_RATIO,
        spine_y(chart, canvas) + track.offset * chart.branch_spacing,
    )
}

/// A connector from a branch's final node to its track terminal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackPath {
    pub track: String,
    pub branch: String,
    pub path: Path,
}

/// One connector per (track, source branch) pair. Connectors of a track
/// share its terminal point and one control x, placed `TRACK_CURVE_BIAS` of
/// the way from the first source's last node to the terminal.
pub fn build_track_paths(chart: &Chart, canvas: Canvas) -> Vec<TrackPath> {
    let mut paths = Vec::new();
    for track in &chart.tracks {
        let terminal = track_terminal(chart, track, canvas);
        // Validation guarantees every source branch has nodes
        let starts: Vec<(usize, Point)> = track
            .sources
            .iter()
            .filter_map(|&b| {
                let last = chart.last_node(b)?;
                Some((b, resolve_node_position(chart, last, canvas)))
            })
            .collect();
        let Some(&(_, lead)) = starts.first() else {
            continue;
        };
        let cx = lead.x + (terminal.x - lead.x) * TRACK_CURVE_BIAS;

        for (branch, start) in starts {
            let mut path = Path::starting_at(start);
            path.cubic_to(Point::new(cx, start.y), Point::new(cx, terminal.y), terminal);
            paths.push(TrackPath {
                track: track.id.clone(),
                branch: chart.branches[branch].id.clone(),
                path,
            });
        }
    }
    paths
}

/// Band endpoints and marker positions of an overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayGeometry {
    pub start: Point,
    pub end: Point,
    /// Start, midpoint, and end minus the extension
    pub markers: [Point; 3],
    pub path: Path,
}

pub fn overlay_geometry(chart: &Chart, overlay: &Overlay, canvas: Canvas) -> OverlayGeometry {
    let y = canvas.height * overlay.y_ratio;

    let from = phase_x(chart, overlay.start_phase, canvas);
    let next = if overlay.start_phase < chart.last_phase() {
        phase_x(chart, overlay.start_phase + 1, canvas)
    } else {
        from
    };
    let start_x = from + (next - from) * overlay.toward_next;
    let end_x = phase_x(chart, overlay.end_phase, canvas) + overlay.extend;

    let start = Point::new(start_x, y);
    let end = Point::new(end_x, y);
    let mut path = Path::starting_at(start);
    path.line_to(end);

    OverlayGeometry {
        start,
        end,
        markers: [
            start,
            Point::new((start_x + end_x) / 2.0, y),
            Point::new(end_x - overlay.extend, y),
        ],
        path,
    }
}
