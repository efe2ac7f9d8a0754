//! Validate command - loads a configuration and summarizes it

use anyhow::Result;

use super::{load_spectrum, ValidateArgs};

pub fn execute(args: ValidateArgs) -> Result<()> {
    let spectrum = load_spectrum(args.config.as_deref())?;

    println!("{}", spectrum.title);
    for (i, chart) in spectrum.charts.iter().enumerate() {
        let marker = if i == spectrum.default_chart { "*" } else { " " };
        println!(
            "{} {:<12} {} phases, {} branches, {} nodes, {} tracks, {} overlays",
            marker,
            chart.id,
            chart.phases.len(),
            chart.branches.len(),
            chart.nodes.len(),
            chart.tracks.len(),
            chart.overlays.len()
        );
    }
    println!("Configuration OK");
    Ok(())
}
