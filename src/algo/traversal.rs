use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Instant;

use crate::model::Graph;

use super::{AlgorithmKind, AlgorithmOutput, AlgorithmParams, AlgorithmResult, TraceStep};

/// Breadth-first sweep from a start node. Nodes are enqueued once, at the
/// moment they are discovered; the recorded depth is the edge count from
/// the start.
pub(super) fn bfs(graph: &Graph, params: &AlgorithmParams) -> AlgorithmResult {
    let timer = Instant::now();
    let Some(start) = params.start.filter(|&id| graph.contains(id)) else {
        return AlgorithmResult::failure(AlgorithmKind::Bfs, timer.elapsed(), "start node not found");
    };

    let mut visited = HashSet::from([start]);
    let mut order = Vec::new();
    let mut depth = HashMap::new();
    let mut steps = Vec::new();
    let mut queue = VecDeque::from([(start, 0u32)]);

    while let Some((node, level)) = queue.pop_front() {
        order.push(node);
        depth.insert(node, level);
        steps.push(TraceStep::Visit { node, depth: level });

        for &next in graph.neighbors(node) {
            if visited.insert(next) {
                queue.push_back((next, level + 1));
                steps.push(TraceStep::Discover {
                    node: next,
                    from: node,
                    depth: level + 1,
                });
            }
        }
    }

    let message = format!("visited {} nodes", order.len());
    AlgorithmResult::success(
        AlgorithmKind::Bfs,
        timer.elapsed(),
        AlgorithmOutput::Traversal { order, depth },
        steps,
        message,
    )
}

/// Depth-first sweep on an explicit stack, so depth is bounded by the heap
/// rather than the call stack. A node is marked visited when popped, not
/// when pushed; it may sit on the stack more than once but is processed
/// exactly once. Neighbors are pushed in reverse so the first neighbor in
/// insertion order is explored first.
pub(super) fn dfs(graph: &Graph, params: &AlgorithmParams) -> AlgorithmResult {
    let timer = Instant::now();
    let Some(start) = params.start.filter(|&id| graph.contains(id)) else {
        return AlgorithmResult::failure(AlgorithmKind::Dfs, timer.elapsed(), "start node not found");
    };

    let mut visited = HashSet::new();
    let mut order = Vec::new();
    let mut depth = HashMap::new();
    let mut steps = Vec::new();
    let mut stack = vec![(start, 0u32)];

    while let Some((node, level)) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        order.push(node);
        depth.insert(node, level);
        steps.push(TraceStep::Visit { node, depth: level });

        for &next in graph.neighbors(node).iter().rev() {
            if !visited.contains(&next) {
                stack.push((next, level + 1));
            }
        }
    }

    let message = format!("visited {} nodes", order.len());
    AlgorithmResult::success(
        AlgorithmKind::Dfs,
        timer.elapsed(),
        AlgorithmOutput::Traversal { order, depth },
        steps,
        message,
    )
}
