pub mod init;
pub mod layout;
pub mod render;
pub mod schema;
pub mod show;
pub mod tui;
pub mod validate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::model::Spectrum;

#[derive(Parser)]
#[command(name = "ladder")]
#[command(
    author,
    version,
    about = "Lay out and draw career ladder charts from a YAML description"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Draw a chart as SVG
    Render(RenderArgs),

    /// Print the computed layout of a chart as JSON
    Layout(LayoutArgs),

    /// Print the detail card of a node, track or overlay
    Show(ShowArgs),

    /// Load and validate a configuration
    Validate(ValidateArgs),

    /// Write the built-in configuration to a file
    Init(InitArgs),

    /// Print JSON Schema for config validation
    Schema,

    /// Launch the interactive terminal viewer
    Tui(TuiArgs),
}

/// Options shared by every command that draws a chart
#[derive(Parser, Clone, Debug)]
pub struct ChartArgs {
    /// Path to config file (the built-in spectrum when omitted)
    #[arg(short, long, env = "LADDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Chart id (the document's default chart when omitted)
    #[arg(long)]
    pub chart: Option<String>,
}

#[derive(Parser, Clone, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub chart: ChartArgs,

    /// Available width; clamped to the configured range
    #[arg(long)]
    pub width: Option<f64>,

    /// Available height; only used with --fullscreen
    #[arg(long)]
    pub height: Option<f64>,

    /// Size the canvas for the whole window
    #[arg(long)]
    pub fullscreen: bool,

    /// Draw with this node, track or overlay selected
    #[arg(long, value_name = "ID")]
    pub select: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub render: RenderArgs,
}

#[derive(Parser, Clone, Debug)]
pub struct ShowArgs {
    /// Node, track or overlay id
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub chart: ChartArgs,
}

#[derive(Parser, Clone, Debug)]
pub struct ValidateArgs {
    /// Path to config file (the built-in spectrum when omitted)
    #[arg(short, long, env = "LADDER_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
pub struct InitArgs {
    /// Where to write the configuration
    #[arg(short, long, default_value = "ladder.yaml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Clone, Debug)]
pub struct TuiArgs {
    #[command(flatten)]
    pub chart: ChartArgs,

    /// Start in fullscreen mode
    #[arg(long)]
    pub fullscreen: bool,
}

/// Load and validate the configuration named on the command line
pub fn load_spectrum(config: Option<&Path>) -> Result<Spectrum> {
    let source = config
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in spectrum".to_string());
    let config = Config::load_or_builtin(config)
        .with_context(|| format!("Failed to load {}", source))?;
    Spectrum::from_config(&config).with_context(|| format!("Invalid configuration in {}", source))
}
