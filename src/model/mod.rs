//! Validated, read-only chart data.

mod build;
mod types;

pub use types::*;

use crate::config::{CanvasConfig, Config};
use crate::error::ConfigError;

/// Every chart of a configuration document, validated once at startup.
#[derive(Debug, Clone)]
pub struct Spectrum {
    pub title: String,
    pub canvas: CanvasConfig,
    pub charts: Vec<Chart>,
    /// Index into `charts`
    pub default_chart: usize,
}

impl Spectrum {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let charts = config
            .charts
            .iter()
            .map(Chart::from_config)
            .collect::<Result<Vec<_>, _>>()?;

        let default_chart = match &config.default_chart {
            Some(id) => charts
                .iter()
                .position(|c| &c.id == id)
                .ok_or_else(|| ConfigError::UnknownChart(id.clone()))?,
            None => 0,
        };

        Ok(Self {
            title: config.title.clone(),
            canvas: config.canvas,
            charts,
            default_chart,
        })
    }

    /// Index of the chart named `id`, or the default chart
    pub fn chart_index(&self, id: Option<&str>) -> Result<usize, ConfigError> {
        match id {
            Some(id) => self
                .charts
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| ConfigError::UnknownChart(id.to_string())),
            None => Ok(self.default_chart),
        }
    }
}
