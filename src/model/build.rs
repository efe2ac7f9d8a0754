//! Turns a parsed [`ChartConfig`] into a [`Chart`], resolving every id
//! reference to an index and rejecting broken configurations.

use std::collections::{HashMap, HashSet};

use crate::config::{ChartConfig, OverlayConfig};
use crate::error::ConfigError;

use super::types::*;

struct Resolver<'a> {
    chart: &'a str,
    phases: HashMap<&'a str, usize>,
    branches: HashMap<&'a str, usize>,
}

impl<'a> Resolver<'a> {
    fn phase(&self, owner: impl FnOnce() -> String, id: &str) -> Result<usize, ConfigError> {
        self.phases
            .get(id)
            .copied()
            .ok_or_else(|| ConfigError::UnknownPhase {
                chart: self.chart.to_string(),
                owner: owner(),
                phase: id.to_string(),
            })
    }

    fn branch(&self, owner: impl FnOnce() -> String, id: &str) -> Result<usize, ConfigError> {
        self.branches
            .get(id)
            .copied()
            .ok_or_else(|| ConfigError::UnknownBranch {
                chart: self.chart.to_string(),
                owner: owner(),
                branch: id.to_string(),
            })
    }
}

fn ensure_unique<'a>(
    chart: &str,
    kind: &'static str,
    ids: impl IntoIterator<Item = &'a str>,
    seen: &mut HashSet<&'a str>,
) -> Result<(), ConfigError> {
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::DuplicateId {
                chart: chart.to_string(),
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

impl Chart {
    pub fn from_config(config: &ChartConfig) -> Result<Self, ConfigError> {
        let chart_id = config.id.as_str();

        check_numbers(config)?;
        let phases = build_phases(config)?;
        let last_phase = phases.len() - 1;

        let mut seen = HashSet::new();
        ensure_unique(chart_id, "phase", config.phases.iter().map(|p| p.id.as_str()), &mut seen)?;
        let mut seen = HashSet::new();
        ensure_unique(chart_id, "branch", config.branches.iter().map(|b| b.id.as_str()), &mut seen)?;

        // Nodes, tracks and overlays share one namespace: they are the
        // selectable targets of a chart.
        let mut targets = HashSet::new();
        ensure_unique(chart_id, "node", config.nodes.iter().map(|n| n.id.as_str()), &mut targets)?;
        ensure_unique(chart_id, "track", config.tracks.iter().map(|t| t.id.as_str()), &mut targets)?;
        ensure_unique(chart_id, "overlay", config.overlays.iter().map(|o| o.id.as_str()), &mut targets)?;

        let resolver = Resolver {
            chart: chart_id,
            phases: config
                .phases
                .iter()
                .enumerate()
                .map(|(i, p)| (p.id.as_str(), i))
                .collect(),
            branches: config
                .branches
                .iter()
                .enumerate()
                .map(|(i, b)| (b.id.as_str(), i))
                .collect(),
        };

        let divergence = match &config.divergence_phase {
            Some(id) => resolver.phase(|| "divergence_phase".to_string(), id)?,
            None => last_phase,
        };

        let primaries: Vec<usize> = config
            .branches
            .iter()
            .enumerate()
            .filter(|(_, b)| b.offset == 0.0)
            .map(|(i, _)| i)
            .collect();
        if primaries.len() != 1 {
            return Err(ConfigError::PrimaryBranch {
                chart: chart_id.to_string(),
                count: primaries.len(),
            });
        }
        let primary = primaries[0];

        let mut branches = Vec::with_capacity(config.branches.len());
        for b in &config.branches {
            let earliest_phase = match &b.earliest_phase {
                Some(id) => resolver.phase(|| format!("branch '{}'", b.id), id)?,
                None => 0,
            };
            branches.push(Branch {
                id: b.id.clone(),
                label: b.label.clone(),
                color: b.color.clone(),
                icon: b.icon.clone(),
                offset: b.offset,
                earliest_phase,
            });
        }

        let mut nodes = Vec::with_capacity(config.nodes.len());
        let mut occupied = HashSet::new();
        for n in &config.nodes {
            let owner = || format!("node '{}'", n.id);
            let branch = resolver.branch(owner, &n.branch)?;
            let phase = resolver.phase(owner, &n.phase)?;

            if !occupied.insert((branch, phase)) {
                return Err(ConfigError::DuplicateNode {
                    chart: chart_id.to_string(),
                    branch: n.branch.clone(),
                    phase: n.phase.clone(),
                });
            }

            let earliest = branches[branch].earliest_phase;
            if phase < earliest {
                return Err(ConfigError::NodeBeforeEarliest {
                    chart: chart_id.to_string(),
                    node: n.id.clone(),
                    phase: n.phase.clone(),
                    earliest: phases[earliest].id.clone(),
                });
            }

            nodes.push(Node {
                id: n.id.clone(),
                branch,
                phase,
                title: n.title.clone(),
                items: n.items.clone(),
            });
        }

        let mut feeding: HashMap<usize, &str> = HashMap::new();
        let mut tracks = Vec::with_capacity(config.tracks.len());
        for t in &config.tracks {
            let mut sources = Vec::with_capacity(t.from_branches.len());
            for branch_id in &t.from_branches {
                let branch = resolver.branch(|| format!("track '{}'", t.id), branch_id)?;
                if let Some(first) = feeding.insert(branch, t.id.as_str()) {
                    return Err(ConfigError::BranchInMultipleTracks {
                        chart: chart_id.to_string(),
                        branch: branch_id.clone(),
                        first: first.to_string(),
                        second: t.id.clone(),
                    });
                }
                if !nodes.iter().any(|n| n.branch == branch) {
                    return Err(ConfigError::EmptySourceBranch {
                        chart: chart_id.to_string(),
                        track: t.id.clone(),
                        branch: branch_id.clone(),
                    });
                }
                sources.push(branch);
            }
            tracks.push(Track {
                id: t.id.clone(),
                label: t.label.clone(),
                legend: t.legend.clone().unwrap_or_else(|| t.label.clone()),
                color: t.color.clone(),
                offset: t.offset,
                sources,
                items: t.items.clone(),
            });
        }

        for (i, b) in branches.iter().enumerate() {
            if i != primary && !feeding.contains_key(&i) {
                return Err(ConfigError::OrphanBranch {
                    chart: chart_id.to_string(),
                    branch: b.id.clone(),
                });
            }
            if !nodes.iter().any(|n| n.branch == i) {
                tracing::warn!("Chart '{}': branch '{}' has no nodes", chart_id, b.id);
            }
        }

        let overlays = config
            .overlays
            .iter()
            .map(|o| build_overlay(&resolver, o))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Chart {
            id: config.id.clone(),
            tab: config.tab.clone(),
            description: config.description.clone(),
            height: config.height,
            fullscreen_min_height: config.fullscreen_min_height,
            spine_ratio: config.spine_ratio,
            branch_spacing: config.branch_spacing,
            divergence,
            axis_caption: config.axis_caption.clone(),
            phases,
            branches,
            nodes,
            tracks,
            overlays,
            primary,
        })
    }
}

/// Every numeric setting must be finite; sizes must also be positive.
fn check_numbers(config: &ChartConfig) -> Result<(), ConfigError> {
    let chart = || "chart".to_string();
    let mut checks: Vec<(String, &'static str, f64, bool)> = vec![
        (chart(), "height", config.height, true),
        (chart(), "fullscreen_min_height", config.fullscreen_min_height, true),
        (chart(), "spine_ratio", config.spine_ratio, false),
        (chart(), "branch_spacing", config.branch_spacing, false),
    ];
    for b in &config.branches {
        checks.push((format!("branch '{}'", b.id), "offset", b.offset, false));
    }
    for t in &config.tracks {
        checks.push((format!("track '{}'", t.id), "offset", t.offset, false));
    }
    for o in &config.overlays {
        let owner = format!("overlay '{}'", o.id);
        checks.push((owner.clone(), "y_ratio", o.y_ratio, false));
        checks.push((owner.clone(), "toward_next", o.start.toward_next, false));
        checks.push((owner, "extend", o.end.extend, false));
    }

    for (owner, field, value, positive) in checks {
        if !value.is_finite() || (positive && value <= 0.0) {
            return Err(ConfigError::InvalidNumber {
                chart: config.id.clone(),
                owner,
                field,
                value,
            });
        }
    }
    Ok(())
}

fn build_phases(config: &ChartConfig) -> Result<Vec<Phase>, ConfigError> {
    if config.phases.is_empty() {
        return Err(ConfigError::NoPhases {
            chart: config.id.clone(),
        });
    }

    let mut previous: Option<f64> = None;
    let mut phases = Vec::with_capacity(config.phases.len());
    for p in &config.phases {
        if !(0.0..=1.0).contains(&p.x) {
            return Err(ConfigError::PhaseOutOfRange {
                chart: config.id.clone(),
                phase: p.id.clone(),
                x: p.x,
            });
        }
        if previous.is_some_and(|prev| p.x <= prev) {
            return Err(ConfigError::PhaseOrder {
                chart: config.id.clone(),
                phase: p.id.clone(),
            });
        }
        previous = Some(p.x);
        phases.push(Phase {
            id: p.id.clone(),
            x: p.x,
            label: p.label.clone(),
            sublabel: p.sublabel.clone(),
        });
    }
    Ok(phases)
}

fn build_overlay(resolver: &Resolver<'_>, o: &OverlayConfig) -> Result<Overlay, ConfigError> {
    let owner = || format!("overlay '{}'", o.id);
    let start_phase = resolver.phase(owner, &o.start.phase)?;
    let end_phase = resolver.phase(owner, &o.end.phase)?;
    if end_phase < start_phase {
        return Err(ConfigError::OverlayBounds {
            chart: resolver.chart.to_string(),
            overlay: o.id.clone(),
        });
    }

    Ok(Overlay {
        id: o.id.clone(),
        title: o.title.clone(),
        subtitle: o.subtitle.clone(),
        band_label: o.band_label.clone().unwrap_or_else(|| o.title.clone()),
        caption: o.caption.clone(),
        kicker: o.kicker.clone().unwrap_or_else(|| o.title.clone()),
        legend: o.legend.clone().unwrap_or_else(|| o.title.clone()),
        color: o.color.clone(),
        icon: o.icon.clone(),
        y_ratio: o.y_ratio,
        start_phase,
        toward_next: o.start.toward_next,
        end_phase,
        extend: o.end.extend,
        items: o.items.clone(),
    })
}
