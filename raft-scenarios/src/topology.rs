//! Fully-connected cluster topology.

use crate::action::{Action, NodeId};

/// Emits the node declaration and full-mesh links for an `n`-node cluster.
///
/// Links are enumerated in lexicographic order over `[0, n)`, `(0,1), (0,2),
/// ..., (1,2), ...`. The simulator reads this ordering as-is, so it is part
/// of the output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologyBuilder {
    nodes: usize,
}

impl TopologyBuilder {
    /// Topology for `nodes` nodes with ids `0..nodes`.
    pub fn new(nodes: usize) -> Self {
        Self { nodes }
    }

    /// Number of nodes.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        0..self.nodes
    }

    /// Every unordered pair `{a, b}` with `a < b`, lexicographically.
    pub fn links(&self) -> impl Iterator<Item = (NodeId, NodeId)> {
        let nodes = self.nodes;
        (0..nodes).flat_map(move |a| (a + 1..nodes).map(move |b| (a, b)))
    }

    /// Number of links in the mesh, `n * (n - 1) / 2`.
    pub fn link_count(&self) -> usize {
        self.nodes * self.nodes.saturating_sub(1) / 2
    }

    /// `Nodes` followed by one `Connect` per link.
    pub fn build(&self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(1 + self.link_count());
        actions.push(Action::Nodes(self.node_ids().collect()));
        actions.extend(self.links().map(|(a, b)| Action::Connect(a, b)));
        actions
    }
}
