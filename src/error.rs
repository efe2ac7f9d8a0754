use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("No charts defined")]
    NoCharts,

    #[error("Chart '{0}' is defined more than once")]
    DuplicateChart(String),

    #[error("Unknown chart '{0}'")]
    UnknownChart(String),

    #[error("Invalid canvas setting {field} = {value}")]
    InvalidCanvas { field: &'static str, value: f64 },

    #[error("Chart '{chart}': invalid color '{color}' on {owner} (expected #rrggbb)")]
    InvalidColor {
        chart: String,
        owner: String,
        color: String,
    },

    #[error("Chart '{chart}': {owner} has invalid {field} = {value}")]
    InvalidNumber {
        chart: String,
        owner: String,
        field: &'static str,
        value: f64,
    },

    #[error("Chart '{chart}': no phases defined")]
    NoPhases { chart: String },

    #[error("Chart '{chart}': phase '{phase}' position {x} is outside [0, 1]")]
    PhaseOutOfRange { chart: String, phase: String, x: f64 },

    #[error("Chart '{chart}': phase '{phase}' is not to the right of the phase before it")]
    PhaseOrder { chart: String, phase: String },

    #[error("Chart '{chart}': duplicate {kind} id '{id}'")]
    DuplicateId {
        chart: String,
        kind: &'static str,
        id: String,
    },

    #[error("Chart '{chart}': {owner} references unknown phase '{phase}'")]
    UnknownPhase {
        chart: String,
        owner: String,
        phase: String,
    },

    #[error("Chart '{chart}': {owner} references unknown branch '{branch}'")]
    UnknownBranch {
        chart: String,
        owner: String,
        branch: String,
    },

    #[error("Chart '{chart}': expected exactly one branch with offset 0, found {count}")]
    PrimaryBranch { chart: String, count: usize },

    #[error("Chart '{chart}': branch '{branch}' has two nodes at phase '{phase}'")]
    DuplicateNode {
        chart: String,
        branch: String,
        phase: String,
    },

    #[error("Chart '{chart}': node '{node}' sits at phase '{phase}', before its branch starts at '{earliest}'")]
    NodeBeforeEarliest {
        chart: String,
        node: String,
        phase: String,
        earliest: String,
    },

    #[error("Chart '{chart}': branch '{branch}' does not feed any track")]
    OrphanBranch { chart: String, branch: String },

    #[error("Chart '{chart}': branch '{branch}' feeds both '{first}' and '{second}'")]
    BranchInMultipleTracks {
        chart: String,
        branch: String,
        first: String,
        second: String,
    },

    #[error("Chart '{chart}': track '{track}' draws from branch '{branch}', which has no nodes")]
    EmptySourceBranch {
        chart: String,
        track: String,
        branch: String,
    },

    #[error("Chart '{chart}': overlay '{overlay}' ends before it starts")]
    OverlayBounds { chart: String, overlay: String },
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Refusing to overwrite existing file '{0}' (use --force)")]
    Exists(PathBuf),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
