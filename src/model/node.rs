use emath::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::util::seed_position;

pub type NodeId = u32;

/// Neutral display color restored whenever the topology changes.
pub const DEFAULT_COLOR: [u8; 3] = [0, 217, 255];

/// A member of the network. Positions and velocities are written by the
/// layout solver; `activity` and `interaction` feed the edge weight rule.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub pos: Pos2,
    pub vel: Vec2,
    pub activity: f32,
    pub interaction: f32,
    /// Degree, maintained by the graph's own mutation hooks only.
    pub(super) connection_count: u32,
    pub color: [u8; 3],
    pub selected: bool,
    pub highlighted: bool,
}

impl Node {
    pub(super) fn new(id: NodeId, name: String, activity: f32, interaction: f32) -> Self {
        Self {
            id,
            name,
            pos: seed_position(id),
            vel: Vec2::ZERO,
            activity,
            interaction,
            connection_count: 0,
            color: DEFAULT_COLOR,
            selected: false,
            highlighted: false,
        }
    }

    pub fn connection_count(&self) -> u32 {
        self.connection_count
    }

    pub fn distance_to(&self, other: &Node) -> f32 {
        self.pos.distance(other.pos)
    }
}

/// Partial update applied through [`Graph::update_node`]. Unset fields are
/// left untouched; the degree is derived and has no field here.
///
/// [`Graph::update_node`]: super::Graph::update_node
#[derive(Clone, Debug, Default)]
pub struct NodeUpdate {
    pub name: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub activity: Option<f32>,
    pub interaction: Option<f32>,
    pub color: Option<[u8; 3]>,
    pub selected: Option<bool>,
    pub highlighted: Option<bool>,
}

impl NodeUpdate {
    /// True when the update touches an attribute the edge weights depend on.
    pub(super) fn affects_weights(&self) -> bool {
        self.activity.is_some() || self.interaction.is_some()
    }
}

/// Flat exchange form of a node, the unit collaborators import and export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub activity: f32,
    pub interaction: f32,
    pub connection_count: u32,
    pub color: [u8; 3],
    pub selected: bool,
    pub highlighted: bool,
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            x: node.pos.x,
            y: node.pos.y,
            activity: node.activity,
            interaction: node.interaction,
            connection_count: node.connection_count,
            color: node.color,
            selected: node.selected,
            highlighted: node.highlighted,
        }
    }
}
