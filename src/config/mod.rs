mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

/// The two charts shipped with the binary.
pub const BUILTIN_YAML: &str = include_str!("../../assets/spectrum.yaml");

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            min_width: default_min_width(),
            max_width: default_max_width(),
            fullscreen_margin_x: default_fullscreen_margin_x(),
            fullscreen_margin_y: default_fullscreen_margin_y(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = Self::parse(&content)?;
        tracing::debug!(
            "Loaded {} chart(s) from {}",
            config.charts.len(),
            path.display()
        );
        Ok(config)
    }

    /// Load the config from `path`, or the built-in charts when no path is given
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    pub fn builtin() -> Result<Self, ConfigError> {
        Self::parse(BUILTIN_YAML)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Validate document-level settings. Cross references inside a chart are
    /// checked when the chart is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.charts.is_empty() {
            return Err(ConfigError::NoCharts);
        }

        let mut seen = HashSet::new();
        for chart in &self.charts {
            if !seen.insert(chart.id.as_str()) {
                return Err(ConfigError::DuplicateChart(chart.id.clone()));
            }
        }

        if let Some(default) = &self.default_chart {
            if !seen.contains(default.as_str()) {
                return Err(ConfigError::UnknownChart(default.clone()));
            }
        }

        let canvas = &self.canvas;
        for (field, value) in [
            ("width", canvas.width),
            ("min_width", canvas.min_width),
            ("max_width", canvas.max_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidCanvas { field, value });
            }
        }
        for (field, value) in [
            ("fullscreen_margin_x", canvas.fullscreen_margin_x),
            ("fullscreen_margin_y", canvas.fullscreen_margin_y),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidCanvas { field, value });
            }
        }
        if canvas.max_width < canvas.min_width {
            return Err(ConfigError::InvalidCanvas {
                field: "max_width",
                value: canvas.max_width,
            });
        }

        for chart in &self.charts {
            if !(chart.height.is_finite() && chart.height > 0.0) {
                return Err(ConfigError::InvalidCanvas {
                    field: "height",
                    value: chart.height,
                });
            }
            chart.validate_colors()?;
        }

        Ok(())
    }
}

impl ChartConfig {
    fn validate_colors(&self) -> Result<(), ConfigError> {
        let owners = self
            .branches
            .iter()
            .map(|b| (format!("branch '{}'", b.id), &b.color))
            .chain(
                self.tracks
                    .iter()
                    .map(|t| (format!("track '{}'", t.id), &t.color)),
            )
            .chain(
                self.overlays
                    .iter()
                    .map(|o| (format!("overlay '{}'", o.id), &o.color)),
            );

        for (owner, color) in owners {
            if !is_hex_color(color) {
                return Err(ConfigError::InvalidColor {
                    chart: self.id.clone(),
                    owner,
                    color: color.clone(),
                });
            }
        }
        Ok(())
    }
}

pub fn is_hex_color(value: &str) -> bool {
    static HEX: OnceLock<Option<Regex>> = OnceLock::new();
    HEX.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config_parses() {
        let config = Config::builtin().unwrap();
        assert_eq!(config.charts.len(), 2);
        assert_eq!(config.default_chart.as_deref(), Some("future"));
        config.validate().unwrap();
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let yaml = r##"
charts:
  - id: only
    tab: Only
    phases:
      - { id: a, x: 0.1, label: A }
    branches:
      - { id: main, label: Main, color: "#112233" }
"##;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.canvas, CanvasConfig::default());
        let chart = &config.charts[0];
        assert_eq!(chart.height, 580.0);
        assert_eq!(chart.spine_ratio, 0.28);
        assert_eq!(chart.branch_spacing, 55.0);
        assert_eq!(chart.branches[0].offset, 0.0);
        assert_eq!(chart.branches[0].icon, "◆");
        config.validate().unwrap();
    }

    #[test]
    fn test_rejects_bad_color() {
        let mut config = Config::builtin().unwrap();
        config.charts[1].tracks[0].color = "purple".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { ref owner, .. } if owner == "track 'staff'"));
    }

    #[test]
    fn test_rejects_unknown_default_chart() {
        let mut config = Config::builtin().unwrap();
        config.default_chart = Some("past".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownChart(ref id)) if id == "past"
        ));
    }

    #[test]
    fn test_rejects_duplicate_chart() {
        let mut config = Config::builtin().unwrap();
        let copy = config.charts[0].clone();
        config.charts.push(copy);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateChart(ref id)) if id == "current"
        ));
    }

    #[test]
    fn test_rejects_non_finite_canvas() {
        let mut config = Config::builtin().unwrap();
        config.canvas.fullscreen_margin_y = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCanvas { field: "fullscreen_margin_y", .. })
        ));

        let mut config = Config::builtin().unwrap();
        config.canvas.width = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCanvas { field: "width", .. })
        ));
    }

    #[test]
    fn test_rejects_empty_document() {
        let config = Config::parse("title: Nothing\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::NoCharts)));
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#7b9ec7"));
        assert!(is_hex_color("#C9865A"));
        assert!(!is_hex_color("7b9ec7"));
        assert!(!is_hex_color("#7b9ec"));
        assert!(!is_hex_color("#7b9ec7ff"));
    }
}
