//! Canvas sizing from the space available to the renderer.

use crate::config::CanvasConfig;
use crate::model::Chart;

use super::engine::Canvas;

/// Space available to the renderer, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Normal mode keeps the chart's own height and clamps the width to the
/// configured range. Fullscreen fills the viewport minus the margins, but
/// never shrinks below the minimum width or the chart's fullscreen height.
pub fn resolve_canvas(
    config: &CanvasConfig,
    chart: &Chart,
    viewport: Viewport,
    fullscreen: bool,
) -> Canvas {
    if fullscreen {
        Canvas::new(
            (viewport.width - config.fullscreen_margin_x).max(config.min_width),
            (viewport.height - config.fullscreen_margin_y).max(chart.fullscreen_min_height),
        )
    } else {
        Canvas::new(
            viewport.width.clamp(config.min_width, config.max_width),
            chart.height,
        )
    }
}
