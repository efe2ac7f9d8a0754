//! A computed chart: everything a renderer needs, at one canvas size.

use serde::Serialize;

use crate::model::{Chart, Target};

use super::engine::{
    build_branch_path, build_track_paths, overlay_geometry, phase_x, resolve_node_position,
    spine_y, track_terminal, Canvas, OverlayGeometry,
};
use super::geometry::{Path, Point};

pub const NODE_RADIUS: f64 = 7.0;
pub const EARLY_NODE_RADIUS: f64 = 6.0;
pub const ACTIVE_NODE_RADIUS: f64 = 9.0;
pub const TERMINAL_RADIUS: f64 = 14.0;

/// Pointer reach of an overlay marker
pub const MARKER_HIT_RADIUS: f64 = 25.0;

/// Half height of the hoverable band under an overlay
pub const BAND_HIT_HALF_HEIGHT: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseGuide {
    pub id: String,
    pub x: f64,
    /// Phases before the divergence column are drawn dimmer
    pub before_divergence: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchLayout {
    pub id: String,
    #[serde(skip)]
    pub index: usize,
    pub primary: bool,
    pub path: Path,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    pub id: String,
    #[serde(skip)]
    pub index: usize,
    pub branch: String,
    pub position: Point,
    pub label_y: f64,
    pub early: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackLayout {
    pub id: String,
    #[serde(skip)]
    pub index: usize,
    pub terminal: Point,
    pub label_y: f64,
    /// Connector per source branch: (branch id, path)
    pub paths: Vec<(String, Path)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLayout {
    pub id: String,
    #[serde(skip)]
    pub index: usize,
    #[serde(flatten)]
    pub geometry: OverlayGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub chart: String,
    pub canvas: Canvas,
    pub spine_y: f64,
    /// Left edge of the divergence zone; absent when the chart never diverges
    pub divergence_x: Option<f64>,
    pub phases: Vec<PhaseGuide>,
    pub branches: Vec<BranchLayout>,
    pub nodes: Vec<NodeLayout>,
    pub tracks: Vec<TrackLayout>,
    pub overlays: Vec<OverlayLayout>,
}

impl Scene {
    pub fn compute(chart: &Chart, canvas: Canvas) -> Self {
        let phases = chart
            .phases
            .iter()
            .enumerate()
            .map(|(i, p)| PhaseGuide {
                id: p.id.clone(),
                x: phase_x(chart, i, canvas),
                before_divergence: i < chart.divergence,
            })
            .collect();

        let branches = chart
            .branches
            .iter()
            .enumerate()
            .map(|(i, b)| BranchLayout {
                id: b.id.clone(),
                index: i,
                primary: i == chart.primary,
                path: build_branch_path(chart, &chart.branch_nodes(i), canvas),
            })
            .collect();

        let nodes = chart
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let position = resolve_node_position(chart, n, canvas);
                let offset = chart.branches[n.branch].offset;
                let label_y = if offset < 0.0 {
                    position.y - 16.0
                } else {
                    position.y + 20.0
                };
                NodeLayout {
                    id: n.id.clone(),
                    index: i,
                    branch: chart.branches[n.branch].id.clone(),
                    position,
                    label_y,
                    early: chart.is_early(n),
                }
            })
            .collect();

        let mut connectors = build_track_paths(chart, canvas);
        let tracks = chart
            .tracks
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let terminal = track_terminal(chart, t, canvas);
                let label_y = if t.offset < 0.0 {
                    terminal.y - 22.0
                } else {
                    terminal.y + 28.0
                };
                let (own, rest): (Vec<_>, Vec<_>) =
                    connectors.drain(..).partition(|c| c.track == t.id);
                connectors = rest;
                TrackLayout {
                    id: t.id.clone(),
                    index: i,
                    terminal,
                    label_y,
                    paths: own.into_iter().map(|c| (c.branch, c.path)).collect(),
                }
            })
            .collect();

        let overlays = chart
            .overlays
            .iter()
            .enumerate()
            .map(|(i, o)| OverlayLayout {
                id: o.id.clone(),
                index: i,
                geometry: overlay_geometry(chart, o, canvas),
            })
            .collect();

        let divergence_x = (chart.divergence < chart.last_phase())
            .then(|| phase_x(chart, chart.divergence, canvas));

        tracing::debug!(
            "Computed scene for chart '{}' at {}x{}",
            chart.id,
            canvas.width,
            canvas.height
        );

        Self {
            chart: chart.id.clone(),
            canvas,
            spine_y: spine_y(chart, canvas),
            divergence_x,
            phases,
            branches,
            nodes,
            tracks,
            overlays,
        }
    }

    pub fn node(&self, id: &str) -> Option<&NodeLayout> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn track(&self, id: &str) -> Option<&TrackLayout> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn overlay(&self, id: &str) -> Option<&OverlayLayout> {
        self.overlays.iter().find(|o| o.id == id)
    }

    /// Where the detail panel for `target` is anchored
    pub fn anchor(&self, target: &Target) -> Option<Point> {
        match target {
            Target::Node(id) => self.node(id).map(|n| n.position),
            Target::Track(id) => self.track(id).map(|t| t.terminal),
            Target::Overlay(id) => self.overlay(id).map(|o| o.geometry.markers[1]),
        }
    }

    /// Selectable targets in reading order: nodes left to right (top to
    /// bottom within a column), then track terminals, then overlays.
    pub fn targets(&self) -> Vec<Target> {
        let mut nodes: Vec<&NodeLayout> = self.nodes.iter().collect();
        nodes.sort_by(|a, b| {
            a.position
                .x
                .total_cmp(&b.position.x)
                .then(a.position.y.total_cmp(&b.position.y))
        });
        nodes
            .into_iter()
            .map(|n| Target::Node(n.id.clone()))
            .chain(self.tracks.iter().map(|t| Target::Track(t.id.clone())))
            .chain(self.overlays.iter().map(|o| Target::Overlay(o.id.clone())))
            .collect()
    }

    /// The target under `point`. `slack` widens every hit area, for pointers
    /// coarser than a canvas unit.
    pub fn hit_test(&self, point: Point, slack: f64) -> Option<Target> {
        let nearest_node = self
            .nodes
            .iter()
            .map(|n| (n, n.position.distance(point)))
            .filter(|(_, d)| *d <= ACTIVE_NODE_RADIUS + slack)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((node, _)) = nearest_node {
            return Some(Target::Node(node.id.clone()));
        }

        if let Some(track) = self
            .tracks
            .iter()
            .find(|t| t.terminal.distance(point) <= TERMINAL_RADIUS + slack)
        {
            return Some(Target::Track(track.id.clone()));
        }

        self.overlays
            .iter()
            .find(|o| {
                let g = &o.geometry;
                let on_marker = g
                    .markers
                    .iter()
                    .any(|m| m.distance(point) <= MARKER_HIT_RADIUS + slack);
                let on_band = point.x >= g.start.x
                    && point.x <= g.markers[2].x
                    && (point.y - g.start.y).abs() <= BAND_HIT_HALF_HEIGHT + slack;
                on_marker || on_band
            })
            .map(|o| Target::Overlay(o.id.clone()))
    }
}

/// Remembers the last computed scene so redraws at an unchanged size skip
/// the layout pass.
#[derive(Debug, Default)]
pub struct SceneCache {
    entry: Option<(String, Canvas, Scene)>,
}

impl SceneCache {
    pub fn get(&mut self, chart: &Chart, canvas: Canvas) -> &Scene {
        let stale = !matches!(
            &self.entry,
            Some((id, c, _)) if *id == chart.id && *c == canvas
        );
        if stale {
            self.entry = None;
        }
        let (_, _, scene) = self
            .entry
            .get_or_insert_with(|| (chart.id.clone(), canvas, Scene::compute(chart, canvas)));
        scene
    }
}
