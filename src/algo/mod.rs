//! Analysis algorithms over the graph's query surface. Every variant is a
//! free function behind one dispatch point, and every invocation produces
//! an [`AlgorithmResult`], failures included, so callers can render the
//! outcome without branching on panics.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use crate::model::{Graph, NodeId};

mod centrality;
mod coloring;
mod components;
mod shortest_path;
mod traversal;

pub use shortest_path::DEFAULT_HEURISTIC_SCALE;

/// The fixed algorithm family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AlgorithmKind {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
    ConnectedComponents,
    DegreeCentrality,
    WelshPowell,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 7] = [
        AlgorithmKind::Bfs,
        AlgorithmKind::Dfs,
        AlgorithmKind::Dijkstra,
        AlgorithmKind::AStar,
        AlgorithmKind::ConnectedComponents,
        AlgorithmKind::DegreeCentrality,
        AlgorithmKind::WelshPowell,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "A*",
            Self::ConnectedComponents => "Connected Components",
            Self::DegreeCentrality => "Degree Centrality",
            Self::WelshPowell => "Welsh-Powell",
        }
    }

    /// Whether the variant needs a start node (and, for path search, a
    /// target) to run.
    pub fn needs_start(self) -> bool {
        matches!(
            self,
            Self::Bfs | Self::Dfs | Self::Dijkstra | Self::AStar
        )
    }

    pub fn needs_target(self) -> bool {
        matches!(self, Self::Dijkstra | Self::AStar)
    }
}

/// Per-invocation parameters; unused fields are ignored by variants that
/// do not read them.
#[derive(Clone, Copy, Debug)]
pub struct AlgorithmParams {
    pub start: Option<NodeId>,
    pub target: Option<NodeId>,
    /// Bounds the centrality trace and report, never the payload.
    pub top_k: Option<usize>,
    /// A* position-heuristic scale. An empirical calibration, kept
    /// configurable; lower values weaken the guidance but preserve
    /// admissibility on more graphs.
    pub heuristic_scale: f32,
}

impl Default for AlgorithmParams {
    fn default() -> Self {
        Self {
            start: None,
            target: None,
            top_k: None,
            heuristic_scale: DEFAULT_HEURISTIC_SCALE,
        }
    }
}

/// One entry of the degree-centrality ranking.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CentralityEntry {
    pub node: NodeId,
    pub degree: usize,
    pub centrality: f32,
}

/// Algorithm-specific result payload. Present only on success.
#[derive(Clone, Debug, Serialize)]
pub enum AlgorithmOutput {
    /// Visitation sequence plus per-node depth (BFS level or DFS depth).
    Traversal {
        order: Vec<NodeId>,
        depth: HashMap<NodeId, u32>,
    },
    /// Shortest path as ordered nodes, its edges, and the summed cost.
    Path {
        nodes: Vec<NodeId>,
        edges: Vec<(NodeId, NodeId)>,
        total_cost: f32,
    },
    /// Maximal mutually-reachable sets, largest first.
    Components { components: Vec<Vec<NodeId>> },
    /// Full ranking, most central first.
    Centrality { ranking: Vec<CentralityEntry> },
    /// 1-based color per node and the number of colors used.
    Coloring {
        colors: HashMap<NodeId, u32>,
        color_count: u32,
    },
}

/// Append-only replay log entry. Produced during execution for optional
/// stepwise animation; safe to ignore.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TraceStep {
    Visit { node: NodeId, depth: u32 },
    Discover { node: NodeId, from: NodeId, depth: u32 },
    Settle { node: NodeId, distance: f32 },
    Relax { node: NodeId, from: NodeId, distance: f32 },
    Swept { node: NodeId, component: usize },
    ComponentSealed { index: usize, size: usize },
    Ranked { node: NodeId, rank: usize, centrality: f32 },
    Colored { node: NodeId, color: u32 },
}

/// Uniform outcome of any algorithm invocation.
#[derive(Clone, Debug, Serialize)]
pub struct AlgorithmResult {
    pub algorithm: AlgorithmKind,
    pub success: bool,
    pub elapsed: Duration,
    pub payload: Option<AlgorithmOutput>,
    pub steps: Vec<TraceStep>,
    pub message: String,
}

impl AlgorithmResult {
    fn success(
        algorithm: AlgorithmKind,
        elapsed: Duration,
        payload: AlgorithmOutput,
        steps: Vec<TraceStep>,
        message: String,
    ) -> Self {
        Self {
            algorithm,
            success: true,
            elapsed,
            payload: Some(payload),
            steps,
            message,
        }
    }

    fn failure(algorithm: AlgorithmKind, elapsed: Duration, message: impl Into<String>) -> Self {
        Self {
            algorithm,
            success: false,
            elapsed,
            payload: None,
            steps: Vec::new(),
            message: message.into(),
        }
    }
}

/// Runs one algorithm against the graph.
pub fn run(graph: &Graph, algorithm: AlgorithmKind, params: &AlgorithmParams) -> AlgorithmResult {
    let result = match algorithm {
        AlgorithmKind::Bfs => traversal::bfs(graph, params),
        AlgorithmKind::Dfs => traversal::dfs(graph, params),
        AlgorithmKind::Dijkstra => shortest_path::dijkstra(graph, params),
        AlgorithmKind::AStar => shortest_path::astar(graph, params),
        AlgorithmKind::ConnectedComponents => components::connected_components(graph),
        AlgorithmKind::DegreeCentrality => centrality::degree_centrality(graph, params),
        AlgorithmKind::WelshPowell => coloring::welsh_powell(graph),
    };

    log::debug!(
        "{} finished in {:?}: {}",
        algorithm.label(),
        result.elapsed,
        result.message
    );
    result
}
