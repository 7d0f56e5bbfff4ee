use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// Undirected weighted connection between two nodes. Endpoints are stored
/// as ids; the graph owns the lookup, so a removed node can never leave a
/// dangling reference behind.
#[derive(Clone, Debug)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f32,
    pub highlighted: bool,
}

impl Edge {
    pub(super) fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            weight: 0.0,
            highlighted: false,
        }
    }

    /// Normalized endpoint pair, identical for both edge directions.
    pub fn key(&self) -> (NodeId, NodeId) {
        pair_key(self.source, self.target)
    }

    pub fn touches(&self, id: NodeId) -> bool {
        self.source == id || self.target == id
    }

    /// The opposite endpoint, if `id` is one of the two.
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if self.source == id {
            Some(self.target)
        } else if self.target == id {
            Some(self.source)
        } else {
            None
        }
    }

    /// Traversal cost: the reciprocal of the similarity weight, so paths
    /// prefer hops between similar nodes.
    pub fn cost(&self) -> f32 {
        super::weight::cost_of(self.weight)
    }
}

pub(super) fn pair_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Flat exchange form of an edge. The weight is included for consumers but
/// re-derived on import.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source_id: NodeId,
    pub target_id: NodeId,
    pub weight: f32,
}

impl From<&Edge> for EdgeRecord {
    fn from(edge: &Edge) -> Self {
        Self {
            source_id: edge.source,
            target_id: edge.target,
            weight: edge.weight,
        }
    }
}
