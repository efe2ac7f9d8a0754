//! TUI command - launches the interactive terminal viewer

use anyhow::Result;

use super::{load_spectrum, TuiArgs};
use crate::tui::{run_tui, TuiConfig};

pub fn execute(args: TuiArgs) -> Result<()> {
    let spectrum = load_spectrum(args.chart.config.as_deref())?;
    let chart = spectrum.chart_index(args.chart.chart.as_deref())?;

    run_tui(TuiConfig {
        spectrum,
        chart,
        fullscreen: args.fullscreen,
    })
}
