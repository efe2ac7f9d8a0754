//! Hover/selection/fullscreen state and the emphasis rules derived from it.

use crate::model::{Chart, Node, Target, Track};

/// UI state handed to renderers. Only one target is selected at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interaction {
    pub chart: usize,
    pub selection: Option<Target>,
    pub fullscreen: bool,
}

impl Interaction {
    pub fn new(chart: usize) -> Self {
        Self {
            chart,
            ..Default::default()
        }
    }

    /// Pointer entered a target; it replaces whatever was selected
    pub fn hover(&mut self, target: Target) {
        self.selection = Some(target);
    }

    /// Pointer left the current target
    pub fn leave(&mut self) {
        self.selection = None;
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    /// Close the most recently opened layer: fullscreen first, then the
    /// detail panel. Returns false when nothing was open.
    pub fn escape(&mut self) -> bool {
        if self.fullscreen {
            self.fullscreen = false;
            true
        } else if self.selection.is_some() {
            self.selection = None;
            true
        } else {
            false
        }
    }

    /// Switch tabs. Selections never carry across charts.
    pub fn switch_chart(&mut self, chart: usize) {
        if chart != self.chart {
            self.chart = chart;
            self.selection = None;
        }
    }

    pub fn is_selected(&self, target: &Target) -> bool {
        self.selection.as_ref() == Some(target)
    }

    fn selected_node<'a>(&self, chart: &'a Chart) -> Option<&'a Node> {
        match &self.selection {
            Some(Target::Node(id)) => chart.node(id),
            _ => None,
        }
    }

    fn selected_track<'a>(&self, chart: &'a Chart) -> Option<&'a Track> {
        match &self.selection {
            Some(Target::Track(id)) => chart.track(id),
            _ => None,
        }
    }

    pub fn branch_faded(&self, chart: &Chart, branch: usize) -> bool {
        if let Some(track) = self.selected_track(chart) {
            return !chart.feeds(track, branch);
        }
        self.selected_node(chart)
            .is_some_and(|node| node.branch != branch)
    }

    pub fn node_faded(&self, chart: &Chart, node: &Node) -> bool {
        if let Some(track) = self.selected_track(chart) {
            return !chart.feeds(track, node.branch);
        }
        matches!(&self.selection, Some(Target::Node(id)) if *id != node.id)
    }

    /// Applies to a track's connectors
    pub fn track_faded(&self, chart: &Chart, track: &Track) -> bool {
        if let Some(node) = self.selected_node(chart) {
            return !chart.feeds(track, node.branch);
        }
        matches!(&self.selection, Some(Target::Track(id)) if *id != track.id)
    }

    /// Applies to a track's terminal marker
    pub fn terminal_faded(&self, track: &Track) -> bool {
        matches!(&self.selection, Some(Target::Track(id)) if *id != track.id)
    }

    pub fn overlay_faded(&self, overlay_id: &str) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|t| !matches!(t, Target::Overlay(id) if id == overlay_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::Spectrum;

    fn future() -> Chart {
        Spectrum::from_config(&Config::builtin().unwrap())
            .unwrap()
            .charts
            .remove(1)
    }

    fn node(id: &str) -> Target {
        Target::Node(id.to_string())
    }

    #[test]
    fn test_hover_replaces_selection() {
        let mut state = Interaction::new(1);
        state.hover(node("ic-jr"));
        state.hover(Target::Track("em".into()));
        assert_eq!(state.selection, Some(Target::Track("em".into())));
        state.hover(node("del-1"));
        assert_eq!(state.selection, Some(node("del-1")));
        state.leave();
        assert_eq!(state.selection, None);
    }

    #[test]
    fn test_escape_pops_fullscreen_first() {
        let mut state = Interaction::new(0);
        state.toggle_fullscreen();
        state.hover(node("cur-sr"));

        assert!(state.escape());
        assert!(!state.fullscreen);
        assert!(state.selection.is_some());

        assert!(state.escape());
        assert!(state.selection.is_none());

        assert!(!state.escape());
    }

    #[test]
    fn test_switch_chart_clears_selection() {
        let mut state = Interaction::new(1);
        state.hover(node("ic-jr"));
        state.switch_chart(1);
        assert!(state.selection.is_some());
        state.switch_chart(0);
        assert_eq!(state.chart, 0);
        assert!(state.selection.is_none());
    }

    #[test]
    fn test_nothing_faded_without_selection() {
        let chart = future();
        let state = Interaction::new(1);
        assert!((0..chart.branches.len()).all(|b| !state.branch_faded(&chart, b)));
        assert!(chart.nodes.iter().all(|n| !state.node_faded(&chart, n)));
        assert!(chart.tracks.iter().all(|t| !state.track_faded(&chart, t)));
    }

    #[test]
    fn test_node_selection_emphasis() {
        let chart = future();
        let mut state = Interaction::new(1);
        state.hover(node("ppl-1"));

        let people = chart.branch_index("people").unwrap();
        let ic = chart.branch_index("ic").unwrap();
        assert!(!state.branch_faded(&chart, people));
        assert!(state.branch_faded(&chart, ic));

        assert!(!state.node_faded(&chart, chart.node("ppl-1").unwrap()));
        assert!(state.node_faded(&chart, chart.node("ppl-2").unwrap()));

        assert!(!state.track_faded(&chart, chart.track("em").unwrap()));
        assert!(state.track_faded(&chart, chart.track("staff").unwrap()));
        assert!(!state.terminal_faded(chart.track("staff").unwrap()));
    }

    #[test]
    fn test_track_selection_emphasis() {
        let chart = future();
        let mut state = Interaction::new(1);
        state.hover(Target::Track("staff".into()));

        let tradeoff = chart.branch_index("tradeoff").unwrap();
        let delivery = chart.branch_index("delivery").unwrap();
        assert!(!state.branch_faded(&chart, tradeoff));
        assert!(state.branch_faded(&chart, delivery));

        assert!(!state.node_faded(&chart, chart.node("ic-jr").unwrap()));
        assert!(state.node_faded(&chart, chart.node("del-2").unwrap()));

        assert!(!state.track_faded(&chart, chart.track("staff").unwrap()));
        assert!(state.track_faded(&chart, chart.track("em").unwrap()));
        assert!(state.terminal_faded(chart.track("em").unwrap()));
    }

    #[test]
    fn test_overlay_emphasis() {
        let mut state = Interaction::new(0);
        assert!(!state.overlay_faded("tech-lead"));
        state.hover(Target::Overlay("tech-lead".into()));
        assert!(!state.overlay_faded("tech-lead"));
        state.hover(node("cur-jr"));
        assert!(state.overlay_faded("tech-lead"));
    }
}
