use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;

use crate::model::{Graph, NodeId};

use super::{AlgorithmKind, AlgorithmOutput, AlgorithmParams, AlgorithmResult, TraceStep};

/// Default scale applied to the A* position heuristic. An empirical
/// calibration against on-screen coordinate magnitudes, not a derived
/// constant; override it through [`AlgorithmParams::heuristic_scale`].
pub const DEFAULT_HEURISTIC_SCALE: f32 = 0.01;

/// Min-heap entry for Dijkstra: closest first, node id breaks ties so
/// extraction order is deterministic.
#[derive(PartialEq)]
struct DistEntry {
    distance: f32,
    node: NodeId,
}

impl Eq for DistEntry {}

impl Ord for DistEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed comparison turns the max-heap into a min-heap.
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for DistEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap entry for A*: lowest `f = g + h` first, then lower `g`, then
/// node id.
#[derive(PartialEq)]
struct GuidedEntry {
    f: f32,
    g: f32,
    node: NodeId,
}

impl Eq for GuidedEntry {}

impl Ord for GuidedEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .partial_cmp(&self.f)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.g.partial_cmp(&self.g).unwrap_or(Ordering::Equal))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for GuidedEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn validate_endpoints(
    graph: &Graph,
    algorithm: AlgorithmKind,
    params: &AlgorithmParams,
    timer: &Instant,
) -> Result<(NodeId, NodeId), AlgorithmResult> {
    let Some(start) = params.start.filter(|&id| graph.contains(id)) else {
        return Err(AlgorithmResult::failure(
            algorithm,
            timer.elapsed(),
            "start node not found",
        ));
    };
    let Some(target) = params.target.filter(|&id| graph.contains(id)) else {
        return Err(AlgorithmResult::failure(
            algorithm,
            timer.elapsed(),
            "target node not found",
        ));
    };
    Ok((start, target))
}

fn trivial_path(algorithm: AlgorithmKind, timer: &Instant, node: NodeId) -> AlgorithmResult {
    AlgorithmResult::success(
        algorithm,
        timer.elapsed(),
        AlgorithmOutput::Path {
            nodes: vec![node],
            edges: Vec::new(),
            total_cost: 0.0,
        },
        Vec::new(),
        "path found: 1 nodes, cost 0.000".to_owned(),
    )
}

fn rebuild_path(
    predecessor: &HashMap<NodeId, NodeId>,
    start: NodeId,
    target: NodeId,
) -> (Vec<NodeId>, Vec<(NodeId, NodeId)>) {
    let mut nodes = vec![target];
    let mut cursor = target;
    while cursor != start {
        let Some(&prev) = predecessor.get(&cursor) else {
            break;
        };
        nodes.push(prev);
        cursor = prev;
    }
    nodes.reverse();

    let edges = nodes.windows(2).map(|pair| (pair[0], pair[1])).collect();
    (nodes, edges)
}

fn found_message(nodes: usize, cost: f32) -> String {
    format!("path found: {nodes} nodes, cost {cost:.3}")
}

/// Dijkstra over `cost = 1/weight` edge lengths. Stops as soon as the
/// target is extracted; stale frontier entries are skipped at pop time.
pub(super) fn dijkstra(graph: &Graph, params: &AlgorithmParams) -> AlgorithmResult {
    let timer = Instant::now();
    let (start, target) = match validate_endpoints(graph, AlgorithmKind::Dijkstra, params, &timer) {
        Ok(endpoints) => endpoints,
        Err(failure) => return failure,
    };
    if start == target {
        return trivial_path(AlgorithmKind::Dijkstra, &timer, start);
    }

    let mut distance = graph
        .nodes()
        .map(|node| (node.id, f32::INFINITY))
        .collect::<HashMap<_, _>>();
    distance.insert(start, 0.0);

    let mut predecessor = HashMap::new();
    let mut settled = HashSet::new();
    let mut steps = Vec::new();
    let mut frontier = BinaryHeap::from([DistEntry {
        distance: 0.0,
        node: start,
    }]);

    while let Some(DistEntry { distance: dist, node }) = frontier.pop() {
        if !settled.insert(node) {
            continue;
        }
        steps.push(TraceStep::Settle {
            node,
            distance: dist,
        });
        if node == target {
            break;
        }

        for &next in graph.neighbors(node) {
            if settled.contains(&next) {
                continue;
            }
            let Some(cost) = graph.edge_cost(node, next) else {
                continue;
            };
            let candidate = dist + cost;
            if candidate < distance[&next] {
                distance.insert(next, candidate);
                predecessor.insert(next, node);
                frontier.push(DistEntry {
                    distance: candidate,
                    node: next,
                });
                steps.push(TraceStep::Relax {
                    node: next,
                    from: node,
                    distance: candidate,
                });
            }
        }
    }

    let total_cost = distance[&target];
    if total_cost.is_infinite() {
        return AlgorithmResult::failure(
            AlgorithmKind::Dijkstra,
            timer.elapsed(),
            format!("no path between {start} and {target}"),
        );
    }

    let (nodes, edges) = rebuild_path(&predecessor, start, target);
    let message = found_message(nodes.len(), total_cost);
    AlgorithmResult::success(
        AlgorithmKind::Dijkstra,
        timer.elapsed(),
        AlgorithmOutput::Path {
            nodes,
            edges,
            total_cost,
        },
        steps,
        message,
    )
}

/// A* with the same cost model, guided by scaled Euclidean distance
/// between node positions. With an admissible scale it returns the same
/// total cost as Dijkstra while settling fewer nodes.
pub(super) fn astar(graph: &Graph, params: &AlgorithmParams) -> AlgorithmResult {
    let timer = Instant::now();
    let (start, target) = match validate_endpoints(graph, AlgorithmKind::AStar, params, &timer) {
        Ok(endpoints) => endpoints,
        Err(failure) => return failure,
    };
    if start == target {
        return trivial_path(AlgorithmKind::AStar, &timer, start);
    }

    let heuristic = |node: NodeId| -> f32 {
        match (graph.node(node), graph.node(target)) {
            (Some(from), Some(to)) => from.distance_to(to) * params.heuristic_scale,
            _ => f32::INFINITY,
        }
    };

    let mut g_score = graph
        .nodes()
        .map(|node| (node.id, f32::INFINITY))
        .collect::<HashMap<_, _>>();
    g_score.insert(start, 0.0);

    let mut came_from = HashMap::new();
    let mut closed = HashSet::new();
    let mut steps = Vec::new();
    let mut frontier = BinaryHeap::from([GuidedEntry {
        f: heuristic(start),
        g: 0.0,
        node: start,
    }]);

    while let Some(GuidedEntry { g, node, .. }) = frontier.pop() {
        if !closed.insert(node) {
            continue;
        }
        steps.push(TraceStep::Settle { node, distance: g });

        if node == target {
            let (nodes, edges) = rebuild_path(&came_from, start, target);
            let message = found_message(nodes.len(), g);
            return AlgorithmResult::success(
                AlgorithmKind::AStar,
                timer.elapsed(),
                AlgorithmOutput::Path {
                    nodes,
                    edges,
                    total_cost: g,
                },
                steps,
                message,
            );
        }

        for &next in graph.neighbors(node) {
            if closed.contains(&next) {
                continue;
            }
            let Some(cost) = graph.edge_cost(node, next) else {
                continue;
            };
            let tentative = g + cost;
            if tentative < g_score[&next] {
                g_score.insert(next, tentative);
                came_from.insert(next, node);
                frontier.push(GuidedEntry {
                    f: tentative + heuristic(next),
                    g: tentative,
                    node: next,
                });
                steps.push(TraceStep::Relax {
                    node: next,
                    from: node,
                    distance: tentative,
                });
            }
        }
    }

    AlgorithmResult::failure(
        AlgorithmKind::AStar,
        timer.elapsed(),
        format!("no path between {start} and {target}"),
    )
}
