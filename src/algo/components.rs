use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use crate::model::{Graph, NodeId};

use super::{AlgorithmKind, AlgorithmOutput, AlgorithmResult, TraceStep};

/// Partitions the graph into maximal mutually-reachable node sets. Nodes
/// are swept in ascending id order; the result lists components largest
/// first, ties broken by their smallest member id, members ascending.
/// An empty graph is a success with zero components.
pub(super) fn connected_components(graph: &Graph) -> AlgorithmResult {
    let timer = Instant::now();

    let mut visited = HashSet::new();
    let mut components: Vec<Vec<NodeId>> = Vec::new();
    let mut steps = Vec::new();

    for id in graph.sorted_ids() {
        if visited.contains(&id) {
            continue;
        }

        let index = components.len();
        let mut component = Vec::new();
        let mut queue = VecDeque::from([id]);
        visited.insert(id);

        while let Some(node) = queue.pop_front() {
            component.push(node);
            steps.push(TraceStep::Swept {
                node,
                component: index,
            });
            for &next in graph.neighbors(node) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        component.sort_unstable();
        steps.push(TraceStep::ComponentSealed {
            index,
            size: component.len(),
        });
        components.push(component);
    }

    components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));

    let message = format!("found {} components", components.len());
    AlgorithmResult::success(
        AlgorithmKind::ConnectedComponents,
        timer.elapsed(),
        AlgorithmOutput::Components { components },
        steps,
        message,
    )
}
