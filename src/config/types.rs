use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Top-level document: canvas sizing plus one or more charts.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_title")]
    pub title: String,

    /// Chart shown first; the first chart when unset
    #[serde(default)]
    pub default_chart: Option<String>,

    #[serde(default)]
    pub canvas: CanvasConfig,

    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct CanvasConfig {
    /// Width used when no container width is known
    #[serde(default = "default_canvas_width")]
    pub width: f64,

    #[serde(default = "default_min_width")]
    pub min_width: f64,

    #[serde(default = "default_max_width")]
    pub max_width: f64,

    /// Horizontal space left around the canvas in fullscreen
    #[serde(default = "default_fullscreen_margin_x")]
    pub fullscreen_margin_x: f64,

    /// Vertical space left around the canvas in fullscreen
    #[serde(default = "default_fullscreen_margin_y")]
    pub fullscreen_margin_y: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ChartConfig {
    pub id: String,

    /// Tab label
    pub tab: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_chart_height")]
    pub height: f64,

    #[serde(default = "default_fullscreen_min_height")]
    pub fullscreen_min_height: f64,

    /// Spine y as a fraction of the canvas height
    #[serde(default = "default_spine_ratio")]
    pub spine_ratio: f64,

    /// Vertical distance, in canvas units, of one unit of branch offset
    #[serde(default = "default_branch_spacing")]
    pub branch_spacing: f64,

    /// Phase id after which branches start to separate; the last phase when unset
    #[serde(default)]
    pub divergence_phase: Option<String>,

    #[serde(default)]
    pub axis_caption: String,

    pub phases: Vec<PhaseConfig>,

    pub branches: Vec<BranchConfig>,

    #[serde(default)]
    pub nodes: Vec<NodeConfig>,

    #[serde(default)]
    pub tracks: Vec<TrackConfig>,

    #[serde(default)]
    pub overlays: Vec<OverlayConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct PhaseConfig {
    pub id: String,

    /// Horizontal position in [0, 1]
    pub x: f64,

    /// Column heading; `\n` splits it over two lines
    pub label: String,

    #[serde(default)]
    pub sublabel: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct BranchConfig {
    pub id: String,

    pub label: String,

    /// `#rrggbb`
    pub color: String,

    #[serde(default = "default_icon")]
    pub icon: String,

    /// Offset weight applied after divergence; exactly one branch uses 0
    #[serde(default)]
    pub offset: f64,

    #[serde(default)]
    pub earliest_phase: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct NodeConfig {
    pub id: String,

    pub branch: String,

    pub phase: String,

    pub title: String,

    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct TrackConfig {
    pub id: String,

    pub label: String,

    /// Legend text; the label when unset
    #[serde(default)]
    pub legend: Option<String>,

    pub color: String,

    /// Terminal y offset, in branch spacing units from the spine
    pub offset: f64,

    pub from_branches: Vec<String>,

    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct OverlayConfig {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    /// Text drawn above the band; the title when unset
    #[serde(default)]
    pub band_label: Option<String>,

    /// Text drawn below the band
    #[serde(default)]
    pub caption: String,

    /// Detail panel heading; the title when unset
    #[serde(default)]
    pub kicker: Option<String>,

    #[serde(default)]
    pub legend: Option<String>,

    pub color: String,

    #[serde(default = "default_overlay_icon")]
    pub icon: String,

    /// Band y as a fraction of the canvas height
    pub y_ratio: f64,

    pub start: OverlayStart,

    pub end: OverlayEnd,

    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct OverlayStart {
    pub phase: String,

    /// Fraction of the way toward the next phase
    #[serde(default)]
    pub toward_next: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct OverlayEnd {
    pub phase: String,

    /// Canvas units past the phase column
    #[serde(default)]
    pub extend: f64,
}
