//! Show command - prints the detail card of one target

use anyhow::{anyhow, Result};

use super::{load_spectrum, ShowArgs};
use crate::detail::Detail;

pub fn execute(args: ShowArgs) -> Result<()> {
    let spectrum = load_spectrum(args.chart.config.as_deref())?;
    let chart = &spectrum.charts[spectrum.chart_index(args.chart.chart.as_deref())?];

    let detail = chart
        .target(&args.id)
        .and_then(|target| Detail::for_target(chart, &target))
        .ok_or_else(|| {
            anyhow!(
                "Chart '{}' has no node, track or overlay '{}'",
                chart.id,
                args.id
            )
        })?;

    print!("{}", detail.to_text());
    Ok(())
}
