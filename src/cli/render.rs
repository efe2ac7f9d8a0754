//! Render command - draws one chart as SVG

use anyhow::{anyhow, Context, Result};

use super::{load_spectrum, RenderArgs};
use crate::interaction::Interaction;
use crate::layout::{resolve_canvas, Canvas, Scene, Viewport};
use crate::model::Spectrum;
use crate::output;
use crate::render::render_svg;

/// A chart ready to draw: validated data, sized canvas and UI state
pub struct Prepared {
    pub spectrum: Spectrum,
    pub state: Interaction,
    pub canvas: Canvas,
}

impl Prepared {
    pub fn scene(&self) -> Scene {
        Scene::compute(&self.spectrum.charts[self.state.chart], self.canvas)
    }
}

pub fn prepare(args: &RenderArgs) -> Result<Prepared> {
    let spectrum = load_spectrum(args.chart.config.as_deref())?;
    let index = spectrum.chart_index(args.chart.chart.as_deref())?;
    let chart = &spectrum.charts[index];

    let mut state = Interaction::new(index);
    state.fullscreen = args.fullscreen;
    if let Some(id) = &args.select {
        let target = chart
            .target(id)
            .ok_or_else(|| anyhow!("Chart '{}' has no node, track or overlay '{}'", chart.id, id))?;
        state.hover(target);
    }

    let viewport = Viewport {
        width: args.width.unwrap_or(spectrum.canvas.width),
        height: args.height.unwrap_or(chart.height),
    };
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !(valid(viewport.width) && valid(viewport.height)) {
        return Err(anyhow!(
            "Viewport must be finite and positive, got {}x{}",
            viewport.width,
            viewport.height
        ));
    }
    let canvas = resolve_canvas(&spectrum.canvas, chart, viewport, state.fullscreen);

    Ok(Prepared {
        spectrum,
        state,
        canvas,
    })
}

pub fn execute(args: RenderArgs) -> Result<()> {
    let prepared = prepare(&args)?;
    let chart = &prepared.spectrum.charts[prepared.state.chart];
    let svg = render_svg(chart, &prepared.scene(), &prepared.state);

    output::emit(args.output.as_deref(), &svg).context("Failed to write SVG")?;
    Ok(())
}
