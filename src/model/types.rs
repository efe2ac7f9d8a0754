use serde::Serialize;

/// A progression stage along the horizontal axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phase {
    pub id: String,
    /// Normalized horizontal position in [0, 1]
    pub x: f64,
    pub label: String,
    pub sublabel: String,
}

/// A responsibility dimension. The primary branch (offset 0) is the spine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    pub id: String,
    pub label: String,
    pub color: String,
    pub icon: String,
    pub offset: f64,
    /// Index of the first phase a node of this branch may occupy
    pub earliest_phase: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    /// Index into [`Chart::branches`]
    pub branch: usize,
    /// Index into [`Chart::phases`]
    pub phase: usize,
    pub title: String,
    pub items: Vec<String>,
}

/// A terminal outcome the final nodes of its source branches converge into.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub id: String,
    pub label: String,
    pub legend: String,
    pub color: String,
    /// Terminal y offset from the spine, in branch spacing units
    pub offset: f64,
    /// Indices into [`Chart::branches`], in configuration order
    pub sources: Vec<usize>,
    pub items: Vec<String>,
}

/// A role band drawn apart from the spine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub band_label: String,
    pub caption: String,
    pub kicker: String,
    pub legend: String,
    pub color: String,
    pub icon: String,
    pub y_ratio: f64,
    pub start_phase: usize,
    pub toward_next: f64,
    pub end_phase: usize,
    pub extend: f64,
    pub items: Vec<String>,
}

/// One validated diagram. Every index stored in its tables is in bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub id: String,
    pub tab: String,
    pub description: String,
    pub height: f64,
    pub fullscreen_min_height: f64,
    pub spine_ratio: f64,
    pub branch_spacing: f64,
    /// Index of the last phase on which every branch sits on the spine
    pub divergence: usize,
    pub axis_caption: String,
    pub phases: Vec<Phase>,
    pub branches: Vec<Branch>,
    pub nodes: Vec<Node>,
    pub tracks: Vec<Track>,
    pub overlays: Vec<Overlay>,
    /// Index of the zero-offset branch
    pub primary: usize,
}

impl Chart {
    pub fn last_phase(&self) -> usize {
        self.phases.len() - 1
    }

    pub fn primary_branch(&self) -> &Branch {
        &self.branches[self.primary]
    }

    #[cfg(test)]
    pub fn branch_index(&self, id: &str) -> Option<usize> {
        self.branches.iter().position(|b| b.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn overlay(&self, id: &str) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.id == id)
    }

    /// Nodes of a branch in ascending phase order
    pub fn branch_nodes(&self, branch: usize) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.iter().filter(|n| n.branch == branch).collect();
        nodes.sort_by_key(|n| n.phase);
        nodes
    }

    /// The node a branch's track connector starts from
    pub fn last_node(&self, branch: usize) -> Option<&Node> {
        self.nodes
            .iter()
            .filter(|n| n.branch == branch)
            .max_by_key(|n| n.phase)
    }

    /// Whether `branch` feeds `track`
    pub fn feeds(&self, track: &Track, branch: usize) -> bool {
        track.sources.contains(&branch)
    }

    /// Primary nodes before the branches split are drawn smaller. Charts that
    /// never diverge draw every node at full size.
    pub fn is_early(&self, node: &Node) -> bool {
        self.divergence < self.last_phase()
            && node.branch == self.primary
            && node.phase <= self.divergence
    }
}

/// Something a pointer can hover and the detail panel can describe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Target {
    Node(String),
    Track(String),
    Overlay(String),
}

impl Target {
    pub fn id(&self) -> &str {
        match self {
            Target::Node(id) | Target::Track(id) | Target::Overlay(id) => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Target::Node(_) => "node",
            Target::Track(_) => "track",
            Target::Overlay(_) => "overlay",
        }
    }
}

impl Chart {
    /// Look up a node, track or overlay by id
    pub fn target(&self, id: &str) -> Option<Target> {
        if self.node(id).is_some() {
            Some(Target::Node(id.to_string()))
        } else if self.track(id).is_some() {
            Some(Target::Track(id.to_string()))
        } else if self.overlay(id).is_some() {
            Some(Target::Overlay(id.to_string()))
        } else {
            None
        }
    }
}
