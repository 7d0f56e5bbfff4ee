//! Data model: nodes, undirected weighted edges, and the graph that owns
//! them. All mutation goes through [`Graph`]; edge weights are refreshed
//! eagerly so algorithm code never sees a stale cost.

use std::collections::HashMap;

use emath::pos2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod edge;
mod node;
mod weight;

pub use edge::{Edge, EdgeRecord};
pub use node::{DEFAULT_COLOR, Node, NodeId, NodeRecord, NodeUpdate};
pub use weight::{cost_of, weight_between};

use edge::pair_key;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),
    #[error("self-loop on node {0} rejected")]
    SelfLoop(NodeId),
}

/// Aggregate metrics over the current topology.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub average_degree: f32,
    pub density: f32,
    pub max_degree: usize,
    pub min_degree: usize,
}

/// Flat exchange form of a whole graph; the round-trip unit for
/// import/export collaborators.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GraphRecord {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

/// Undirected weighted graph. Sole owner of every node and edge; ids are
/// assigned once and never reused within a session.
#[derive(Clone, Debug)]
pub struct Graph {
    nodes: HashMap<NodeId, Node>,
    edges: Vec<Edge>,
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    edge_index: HashMap<(NodeId, NodeId), usize>,
    next_id: NodeId,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            adjacency: HashMap::new(),
            edge_index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Adds a node with the next free id and a deterministic spawn
    /// position.
    pub fn add_node(&mut self, name: impl Into<String>, activity: f32, interaction: f32) -> &Node {
        let id = self.next_id;
        self.next_id += 1;

        self.adjacency.insert(id, Vec::new());
        self.nodes
            .insert(id, Node::new(id, name.into(), activity, interaction));
        self.reset_colors();
        &self.nodes[&id]
    }

    /// Admits a node under a caller-chosen id, as produced by
    /// [`Graph::to_record`]. Only identity, attributes, and position carry
    /// over; display state is restored by [`Graph::from_record`] after the
    /// topology is rebuilt. The id counter advances past the given id so
    /// later [`Graph::add_node`] calls cannot collide.
    pub fn insert_node(&mut self, record: &NodeRecord) -> Result<NodeId, GraphError> {
        if self.nodes.contains_key(&record.id) {
            return Err(GraphError::DuplicateNode(record.id));
        }

        let mut node = Node::new(record.id, record.name.clone(), record.activity, record.interaction);
        node.pos = pos2(record.x, record.y);

        self.adjacency.insert(record.id, Vec::new());
        self.nodes.insert(record.id, node);
        if record.id >= self.next_id {
            self.next_id = record.id + 1;
        }
        self.reset_colors();
        Ok(record.id)
    }

    /// Removes a node and every edge touching it. Neighbors' degrees and
    /// incident weights are updated in the same call.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }

        let neighbors = self.adjacency.remove(&id).unwrap_or_default();
        self.edges.retain(|edge| !edge.touches(id));
        self.rebuild_edge_index();
        self.nodes.remove(&id);

        for &neighbor in &neighbors {
            if let Some(list) = self.adjacency.get_mut(&neighbor) {
                list.retain(|&other| other != id);
            }
            self.sync_degree(neighbor);
        }
        for &neighbor in &neighbors {
            self.refresh_incident_weights(neighbor);
        }

        self.reset_colors();
        true
    }

    /// Applies a partial update. Weight-relevant attribute changes refresh
    /// every incident edge before returning.
    pub fn update_node(&mut self, id: NodeId, update: NodeUpdate) -> bool {
        let refresh = update.affects_weights();
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };

        if let Some(name) = update.name {
            node.name = name;
        }
        if let Some(x) = update.x {
            node.pos.x = x;
        }
        if let Some(y) = update.y {
            node.pos.y = y;
        }
        if let Some(activity) = update.activity {
            node.activity = activity;
        }
        if let Some(interaction) = update.interaction {
            node.interaction = interaction;
        }
        if let Some(color) = update.color {
            node.color = color;
        }
        if let Some(selected) = update.selected {
            node.selected = selected;
        }
        if let Some(highlighted) = update.highlighted {
            node.highlighted = highlighted;
        }

        if refresh {
            self.refresh_incident_weights(id);
        }
        true
    }

    /// Connects two existing, distinct nodes. Re-adding an existing edge
    /// returns it unchanged. Degrees change on success, so the weights of
    /// every edge incident to either endpoint are refreshed.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<&Edge, GraphError> {
        if !self.nodes.contains_key(&source) {
            return Err(GraphError::NodeNotFound(source));
        }
        if !self.nodes.contains_key(&target) {
            return Err(GraphError::NodeNotFound(target));
        }
        if source == target {
            return Err(GraphError::SelfLoop(source));
        }

        let key = pair_key(source, target);
        if let Some(&index) = self.edge_index.get(&key) {
            return Ok(&self.edges[index]);
        }

        let index = self.edges.len();
        self.edges.push(Edge::new(source, target));
        self.edge_index.insert(key, index);
        self.adjacency.entry(source).or_default().push(target);
        self.adjacency.entry(target).or_default().push(source);
        self.sync_degree(source);
        self.sync_degree(target);
        self.refresh_incident_weights(source);
        self.refresh_incident_weights(target);

        self.reset_colors();
        Ok(&self.edges[index])
    }

    pub fn remove_edge(&mut self, source: NodeId, target: NodeId) -> bool {
        let Some(index) = self.edge_index.remove(&pair_key(source, target)) else {
            return false;
        };

        self.edges.swap_remove(index);
        if let Some(moved) = self.edges.get(index) {
            self.edge_index.insert(moved.key(), index);
        }

        if let Some(list) = self.adjacency.get_mut(&source) {
            list.retain(|&other| other != target);
        }
        if let Some(list) = self.adjacency.get_mut(&target) {
            list.retain(|&other| other != source);
        }
        self.sync_degree(source);
        self.sync_degree(target);
        self.refresh_incident_weights(source);
        self.refresh_incident_weights(target);

        self.reset_colors();
        true
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node ids in ascending order; the deterministic iteration order used
    /// by algorithms and the adjacency matrix.
    pub fn sorted_ids(&self) -> Vec<NodeId> {
        let mut ids = self.nodes.keys().copied().collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }

    /// Neighbor ids in edge insertion order.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbors(id).len()
    }

    pub fn has_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.edge_index.contains_key(&pair_key(source, target))
    }

    pub fn get_edge(&self, source: NodeId, target: NodeId) -> Option<&Edge> {
        self.edge_index
            .get(&pair_key(source, target))
            .map(|&index| &self.edges[index])
    }

    /// Precomputed traversal cost of the edge between two nodes.
    pub fn edge_cost(&self, source: NodeId, target: NodeId) -> Option<f32> {
        self.get_edge(source, target).map(Edge::cost)
    }

    pub fn adjacency_list(&self) -> HashMap<NodeId, Vec<NodeId>> {
        self.adjacency.clone()
    }

    /// Symmetric weight matrix with rows/columns in ascending id order,
    /// 0 where no edge exists. Second element is the id order.
    pub fn adjacency_matrix(&self) -> (Vec<Vec<f32>>, Vec<NodeId>) {
        let ids = self.sorted_ids();
        let index_of = ids
            .iter()
            .enumerate()
            .map(|(index, &id)| (id, index))
            .collect::<HashMap<_, _>>();

        let mut matrix = vec![vec![0.0; ids.len()]; ids.len()];
        for edge in &self.edges {
            let i = index_of[&edge.source];
            let j = index_of[&edge.target];
            matrix[i][j] = edge.weight;
            matrix[j][i] = edge.weight;
        }
        (matrix, ids)
    }

    pub fn statistics(&self) -> GraphStats {
        let n = self.nodes.len();
        let e = self.edges.len();
        let density = if n > 1 {
            (2 * e) as f32 / (n * (n - 1)) as f32
        } else {
            0.0
        };
        let average_degree = if n > 0 { (2 * e) as f32 / n as f32 } else { 0.0 };

        GraphStats {
            node_count: n,
            edge_count: e,
            average_degree,
            density,
            max_degree: self.adjacency.values().map(Vec::len).max().unwrap_or(0),
            min_degree: self.adjacency.values().map(Vec::len).min().unwrap_or(0),
        }
    }

    pub fn set_edge_highlighted(&mut self, source: NodeId, target: NodeId, on: bool) -> bool {
        let Some(&index) = self.edge_index.get(&pair_key(source, target)) else {
            return false;
        };
        self.edges[index].highlighted = on;
        true
    }

    pub fn clear_highlights(&mut self) {
        for node in self.nodes.values_mut() {
            node.highlighted = false;
        }
        for edge in &mut self.edges {
            edge.highlighted = false;
        }
    }

    /// Restores every node to the neutral display color. Runs automatically
    /// after each topology mutation, since colors assigned from an earlier
    /// algorithm run no longer describe the changed graph.
    pub fn reset_colors(&mut self) {
        for node in self.nodes.values_mut() {
            node.color = DEFAULT_COLOR;
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.adjacency.clear();
        self.edge_index.clear();
        self.next_id = 1;
    }

    /// Flattens the graph into plain records.
    pub fn to_record(&self) -> GraphRecord {
        let mut nodes = self
            .nodes
            .values()
            .map(NodeRecord::from)
            .collect::<Vec<_>>();
        nodes.sort_by_key(|record| record.id);

        GraphRecord {
            nodes,
            edges: self.edges.iter().map(EdgeRecord::from).collect(),
        }
    }

    /// Rebuilds a graph from plain records. Topology and attributes round
    /// trip exactly; weights and degrees are re-derived (and therefore
    /// equal), velocities start at zero.
    pub fn from_record(record: &GraphRecord) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for node in &record.nodes {
            graph.insert_node(node)?;
        }
        for edge in &record.edges {
            graph.add_edge(edge.source_id, edge.target_id)?;
        }

        // The edge inserts above reset display state; restore it last.
        for node in &record.nodes {
            if let Some(rebuilt) = graph.nodes.get_mut(&node.id) {
                rebuilt.color = node.color;
                rebuilt.selected = node.selected;
                rebuilt.highlighted = node.highlighted;
            }
        }
        Ok(graph)
    }

    fn sync_degree(&mut self, id: NodeId) {
        let degree = self.adjacency.get(&id).map_or(0, Vec::len) as u32;
        if let Some(node) = self.nodes.get_mut(&id) {
            node.connection_count = degree;
        }
    }

    /// Recomputes the weight of every edge incident to `id`. Called after
    /// any change to the node's weight-relevant attributes, including
    /// degree changes caused by edge mutations elsewhere.
    fn refresh_incident_weights(&mut self, id: NodeId) {
        let indices = self
            .adjacency
            .get(&id)
            .map(|neighbors| {
                neighbors
                    .iter()
                    .filter_map(|&other| self.edge_index.get(&pair_key(id, other)).copied())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        for index in indices {
            let (source, target) = (self.edges[index].source, self.edges[index].target);
            self.edges[index].weight = weight_between(&self.nodes[&source], &self.nodes[&target]);
        }
    }

    fn rebuild_edge_index(&mut self) {
        self.edge_index.clear();
        for (index, edge) in self.edges.iter().enumerate() {
            self.edge_index.insert(edge.key(), index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_degree_invariant(graph: &Graph) {
        for node in graph.nodes() {
            let incident = graph
                .edges()
                .iter()
                .filter(|edge| edge.touches(node.id))
                .count();
            assert_eq!(
                node.connection_count() as usize,
                incident,
                "degree mismatch on node {}",
                node.id
            );
            assert_eq!(graph.degree(node.id), incident);
        }
    }

    fn triangle() -> (Graph, NodeId, NodeId, NodeId) {
        let mut graph = Graph::new();
        let a = graph.add_node("a", 0.2, 5.0).id;
        let b = graph.add_node("b", 0.4, 9.0).id;
        let c = graph.add_node("c", 0.8, 14.0).id;
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();
        graph.add_edge(a, c).unwrap();
        (graph, a, b, c)
    }

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let mut graph = Graph::new();
        let a = graph.add_node("a", 0.5, 1.0).id;
        let b = graph.add_node("b", 0.5, 1.0).id;
        assert_eq!((a, b), (1, 2));

        assert!(graph.remove_node(b));
        let c = graph.add_node("c", 0.5, 1.0).id;
        assert_eq!(c, 3);
    }

    #[test]
    fn degree_invariant_holds_across_mutations() {
        let (mut graph, a, b, c) = triangle();
        assert_degree_invariant(&graph);

        assert!(graph.remove_edge(a, b));
        assert_degree_invariant(&graph);

        assert!(graph.remove_node(c));
        assert_degree_invariant(&graph);

        let d = graph.add_node("d", 0.1, 2.0).id;
        graph.add_edge(a, d).unwrap();
        graph.add_edge(b, d).unwrap();
        assert_degree_invariant(&graph);
    }

    #[test]
    fn removing_a_node_cascades_its_edges() {
        let (mut graph, a, b, c) = triangle();
        assert!(graph.remove_node(b));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge(a, c));
        assert!(!graph.has_edge(a, b));
        assert!(!graph.remove_node(b));
    }

    #[test]
    fn self_loops_and_unknown_endpoints_are_rejected() {
        let mut graph = Graph::new();
        let a = graph.add_node("a", 0.5, 1.0).id;

        assert_eq!(graph.add_edge(a, a).unwrap_err(), GraphError::SelfLoop(a));
        assert_eq!(
            graph.add_edge(a, 99).unwrap_err(),
            GraphError::NodeNotFound(99)
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn duplicate_edge_returns_the_existing_one() {
        let mut graph = Graph::new();
        let a = graph.add_node("a", 0.5, 1.0).id;
        let b = graph.add_node("b", 0.5, 1.0).id;

        let first = graph.add_edge(a, b).unwrap().key();
        let again = graph.add_edge(b, a).unwrap().key();
        assert_eq!(first, again);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn neighbor_order_follows_edge_insertion() {
        let mut graph = Graph::new();
        let hub = graph.add_node("hub", 0.5, 1.0).id;
        let spokes = (0..4)
            .map(|i| graph.add_node(format!("s{i}"), 0.5, 1.0).id)
            .collect::<Vec<_>>();

        for &spoke in spokes.iter().rev() {
            graph.add_edge(hub, spoke).unwrap();
        }
        let reversed = spokes.iter().rev().copied().collect::<Vec<_>>();
        assert_eq!(graph.neighbors(hub), reversed.as_slice());
    }

    #[test]
    fn attribute_updates_refresh_incident_weights() {
        let mut graph = Graph::new();
        let a = graph.add_node("a", 0.5, 10.0).id;
        let b = graph.add_node("b", 0.5, 10.0).id;
        graph.add_edge(a, b).unwrap();
        assert_eq!(graph.get_edge(a, b).unwrap().weight, 1.0);

        graph.update_node(
            a,
            NodeUpdate {
                interaction: Some(25.0),
                ..NodeUpdate::default()
            },
        );
        let weight = graph.get_edge(a, b).unwrap().weight;
        assert!(weight < 1.0);
        assert_eq!(weight, 1.0 / (1.0 + 15.0));
    }

    #[test]
    fn degree_changes_refresh_sibling_edge_weights() {
        let mut graph = Graph::new();
        let a = graph.add_node("a", 0.5, 10.0).id;
        let b = graph.add_node("b", 0.5, 10.0).id;
        let c = graph.add_node("c", 0.5, 10.0).id;
        graph.add_edge(a, b).unwrap();

        // Equal degrees and attributes: maximal weight.
        assert_eq!(graph.get_edge(a, b).unwrap().weight, 1.0);

        // a gains a second edge; its degree now differs from b's, and the
        // a-b weight must already reflect that.
        graph.add_edge(a, c).unwrap();
        assert_eq!(graph.get_edge(a, b).unwrap().weight, 0.5);

        graph.remove_edge(a, c);
        assert_eq!(graph.get_edge(a, b).unwrap().weight, 1.0);
    }

    #[test]
    fn update_on_missing_node_reports_false() {
        let mut graph = Graph::new();
        assert!(!graph.update_node(5, NodeUpdate::default()));
        assert!(!graph.remove_edge(1, 2));
    }

    #[test]
    fn adjacency_matrix_is_symmetric_with_zero_diagonal() {
        let (graph, ..) = triangle();
        let (matrix, ids) = graph.adjacency_matrix();

        assert_eq!(ids, graph.sorted_ids());
        for i in 0..ids.len() {
            assert_eq!(matrix[i][i], 0.0);
            for j in 0..ids.len() {
                assert_eq!(matrix[i][j], matrix[j][i]);
            }
        }
        assert!(matrix[0][1] > 0.0);
    }

    #[test]
    fn statistics_on_a_triangle() {
        let (graph, ..) = triangle();
        let stats = graph.statistics();

        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 3);
        assert_eq!(stats.density, 1.0);
        assert_eq!(stats.average_degree, 2.0);
        assert_eq!(stats.max_degree, 2);
        assert_eq!(stats.min_degree, 2);
    }

    #[test]
    fn topology_mutations_reset_colors() {
        let (mut graph, a, b, _) = triangle();
        graph.update_node(
            a,
            NodeUpdate {
                color: Some([255, 0, 0]),
                ..NodeUpdate::default()
            },
        );
        assert_eq!(graph.node(a).unwrap().color, [255, 0, 0]);

        graph.remove_edge(a, b);
        assert_eq!(graph.node(a).unwrap().color, DEFAULT_COLOR);
    }

    #[test]
    fn adjacency_list_mirrors_neighbors() {
        let (graph, a, b, c) = triangle();
        let list = graph.adjacency_list();

        assert_eq!(list.len(), 3);
        for id in [a, b, c] {
            assert_eq!(list[&id].as_slice(), graph.neighbors(id));
        }
    }

    #[test]
    fn highlights_set_and_clear() {
        let (mut graph, a, b, _) = triangle();
        assert!(graph.set_edge_highlighted(a, b, true));
        assert!(!graph.set_edge_highlighted(a, 99, true));
        graph.update_node(
            a,
            NodeUpdate {
                highlighted: Some(true),
                ..NodeUpdate::default()
            },
        );
        assert!(graph.get_edge(a, b).unwrap().highlighted);
        assert!(graph.node(a).unwrap().highlighted);

        graph.clear_highlights();
        assert!(!graph.get_edge(a, b).unwrap().highlighted);
        assert!(!graph.node(a).unwrap().highlighted);
    }

    #[test]
    fn clear_empties_the_graph_and_restarts_ids() {
        let (mut graph, ..) = triangle();
        graph.clear();

        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.add_node("first", 0.5, 1.0).id, 1);
    }

    #[test]
    fn records_round_trip() {
        let (mut graph, a, ..) = triangle();
        graph.update_node(
            a,
            NodeUpdate {
                color: Some([10, 20, 30]),
                selected: Some(true),
                ..NodeUpdate::default()
            },
        );

        let record = graph.to_record();
        let rebuilt = Graph::from_record(&record).unwrap();

        assert_eq!(rebuilt.node_count(), graph.node_count());
        assert_eq!(rebuilt.edge_count(), graph.edge_count());
        for node in graph.nodes() {
            let twin = rebuilt.node(node.id).unwrap();
            assert_eq!(twin.name, node.name);
            assert_eq!(twin.pos, node.pos);
            assert_eq!(twin.activity, node.activity);
            assert_eq!(twin.interaction, node.interaction);
            assert_eq!(twin.connection_count(), node.connection_count());
            assert_eq!(twin.color, node.color);
            assert_eq!(twin.selected, node.selected);
            assert_eq!(twin.vel, emath::Vec2::ZERO);
        }
        for edge in graph.edges() {
            let twin = rebuilt.get_edge(edge.source, edge.target).unwrap();
            assert_eq!(twin.weight, edge.weight);
        }

        // A fresh id after import cannot collide with an imported one.
        let mut rebuilt = rebuilt;
        let fresh = rebuilt.add_node("fresh", 0.5, 1.0).id;
        assert!(!record.nodes.iter().any(|node| node.id == fresh));
    }

    #[test]
    fn duplicate_record_id_fails_cleanly() {
        let (graph, ..) = triangle();
        let mut record = graph.to_record();
        record.nodes.push(record.nodes[0].clone());

        assert_eq!(
            Graph::from_record(&record).unwrap_err(),
            GraphError::DuplicateNode(record.nodes[0].id)
        );
    }
}
