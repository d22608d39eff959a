//! Per-line cyclic topology.
//!
//! A line declared with stations `s0 .. s(n-1)` is unrolled into `2n`
//! nodes: the forward run `s0 .. s(n-1)` followed by the backward run
//! `s(n-1) .. s0`. The successor of the last node is node 0, so the
//! sequence is a ring. Where a node and its successor are the same
//! physical station the line *ends* there: a train turns around by moving
//! to the successor node without traversing a link.

use railsim_core::{LineId, LinkId, NodeIdx, StationSide};

/// A line as declared by the configuration: a name and its stations in
/// forward order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineDef {
    /// Display name (`"green"`, ...).
    pub name: String,
    /// Station names in forward travel order.
    pub stations: Vec<String>,
}

impl LineDef {
    /// Create a line definition.
    pub fn new<S: Into<String>>(name: impl Into<String>, stations: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            stations: stations.into_iter().map(Into::into).collect(),
        }
    }
}

/// One position on a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    /// Loading bay this node stops at.
    pub side: StationSide,
    /// Cyclic successor.
    pub next: NodeIdx,
    /// Outgoing link, `None` at a turnaround.
    pub link: Option<LinkId>,
    /// Ticks needed to traverse `link`, `None` at a turnaround.
    pub transit_cost: Option<u32>,
}

/// The immutable node ring of a single line.
#[derive(Clone, Debug)]
pub struct LineNetwork {
    id: LineId,
    name: String,
    nodes: Vec<Node>,
}

impl LineNetwork {
    /// Assemble from pre-resolved nodes. Only
    /// [`RailNetwork::build`](crate::RailNetwork::build) constructs lines,
    /// after validating every edge.
    pub(crate) fn from_nodes(id: LineId, name: String, nodes: Vec<Node>) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { id, name, nodes }
    }

    /// Line id.
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of nodes (twice the declared station count).
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Cyclic successor of `node`.
    pub fn next_node(&self, node: NodeIdx) -> NodeIdx {
        NodeIdx(((node.0 as usize + 1) % self.nodes.len()) as u32)
    }

    /// Station side `node` stops at.
    ///
    /// `node` is reduced modulo [`size`](Self::size), so every index maps
    /// to some side.
    pub fn station_of(&self, node: NodeIdx) -> StationSide {
        self.node(node).side
    }

    /// `true` if the line ends at `node`, i.e. the successor is the same
    /// physical station seen from the opposite direction.
    pub fn ends_at(&self, node: NodeIdx) -> bool {
        self.node(node).link.is_none()
    }

    /// Outgoing link of `node`, `None` at a turnaround.
    pub fn link_of(&self, node: NodeIdx) -> Option<LinkId> {
        self.node(node).link
    }

    /// Transit ticks of the outgoing link, `None` at a turnaround.
    pub fn transit_cost(&self, node: NodeIdx) -> Option<u32> {
        self.node(node).transit_cost
    }

    /// Full node record.
    pub fn node(&self, node: NodeIdx) -> &Node {
        &self.nodes[node.0 as usize % self.nodes.len()]
    }

    /// Iterate nodes in ring order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIdx, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeIdx(i as u32), n))
    }
}
