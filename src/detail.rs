//! Content of the floating detail panel.

use crate::model::{Chart, Target};

/// Everything the detail panel shows for one target.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub color: String,
    pub icon: Option<String>,
    /// Small heading above the title
    pub kicker: String,
    pub title: String,
    /// Line between title and statements, if any
    pub note: Option<String>,
    pub items: Vec<String>,
}

impl Detail {
    /// `None` when `target` does not exist in `chart`
    pub fn for_target(chart: &Chart, target: &Target) -> Option<Self> {
        match target {
            Target::Node(id) => {
                let node = chart.node(id)?;
                let branch = &chart.branches[node.branch];
                let phase = &chart.phases[node.phase];
                Some(Self {
                    color: branch.color.clone(),
                    icon: Some(branch.icon.clone()),
                    kicker: format!("{} · {}", branch.label, phase.sublabel),
                    title: node.title.clone(),
                    note: None,
                    items: node.items.clone(),
                })
            }
            Target::Track(id) => {
                let track = chart.track(id)?;
                let sources = track
                    .sources
                    .iter()
                    .map(|&b| chart.branches[b].label.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(Self {
                    color: track.color.clone(),
                    icon: None,
                    kicker: "Distinct Track".to_string(),
                    title: track.label.clone(),
                    note: Some(format!("Primarily draws from: {}", sources)),
                    items: track.items.clone(),
                })
            }
            Target::Overlay(id) => {
                let overlay = chart.overlay(id)?;
                Some(Self {
                    color: overlay.color.clone(),
                    icon: Some(overlay.icon.clone()),
                    kicker: overlay.kicker.clone(),
                    title: overlay.title.clone(),
                    note: (!overlay.subtitle.is_empty()).then(|| overlay.subtitle.clone()),
                    items: overlay.items.clone(),
                })
            }
        }
    }

    /// Plain-text rendering for terminals and pipes
    pub fn to_text(&self) -> String {
        let mut content = String::new();
        match &self.icon {
            Some(icon) => content.push_str(&format!("{} {}\n", icon, self.kicker.to_uppercase())),
            None => content.push_str(&format!("{}\n", self.kicker.to_uppercase())),
        }
        content.push_str(&format!("{}\n", self.title));
        if let Some(note) = &self.note {
            content.push_str(&format!("{}\n", note));
        }
        content.push('\n');
        for item in &self.items {
            content.push_str(&format!("  • {}\n", item));
        }
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::Spectrum;

    fn spectrum() -> Spectrum {
        Spectrum::from_config(&Config::builtin().unwrap()).unwrap()
    }

    #[test]
    fn test_node_detail() {
        let spectrum = spectrum();
        let chart = &spectrum.charts[1];
        let detail = Detail::for_target(chart, &Target::Node("del-2".into())).unwrap();
        assert_eq!(detail.kicker, "Delivery Ownership · Feature Area Lead");
        assert_eq!(detail.title, "Feature Area Delivery");
        assert_eq!(detail.color, "#c9865a");
        assert_eq!(detail.icon.as_deref(), Some("▶"));
        assert_eq!(detail.items.len(), 4);
        assert!(detail.note.is_none());
    }

    #[test]
    fn test_current_level_kicker() {
        let spectrum = spectrum();
        let chart = &spectrum.charts[0];
        let detail = Detail::for_target(chart, &Target::Node("cur-staff".into())).unwrap();
        assert_eq!(detail.kicker, "Engineering Level · Technical Leadership");
    }

    #[test]
    fn test_track_detail_lists_sources() {
        let spectrum = spectrum();
        let chart = &spectrum.charts[1];
        let detail = Detail::for_target(chart, &Target::Track("em".into())).unwrap();
        assert_eq!(detail.kicker, "Distinct Track");
        assert_eq!(detail.title, "Engineering Manager");
        assert_eq!(
            detail.note.as_deref(),
            Some("Primarily draws from: Delivery Ownership, People Development, Process & Practices")
        );
        assert!(detail.icon.is_none());
    }

    #[test]
    fn test_overlay_detail() {
        let spectrum = spectrum();
        let chart = &spectrum.charts[0];
        let detail = Detail::for_target(chart, &Target::Overlay("tech-lead".into())).unwrap();
        assert_eq!(detail.kicker, "Role · Senior+ Designation");
        assert_eq!(detail.note.as_deref(), Some("Role assigned to Senior+ engineers"));
        assert_eq!(detail.items.len(), 10);
    }

    #[test]
    fn test_unknown_target() {
        let spectrum = spectrum();
        assert!(Detail::for_target(&spectrum.charts[1], &Target::Node("cur-jr".into())).is_none());
    }

    #[test]
    fn test_text_rendering() {
        let spectrum = spectrum();
        let chart = &spectrum.charts[1];
        let text = Detail::for_target(chart, &Target::Track("staff".into()))
            .unwrap()
            .to_text();
        assert!(text.starts_with("DISTINCT TRACK\nStaff Engineer\nPrimarily draws from: "));
        assert!(text.contains("  • Defines the target-state architecture and migration paths\n"));
    }
}
