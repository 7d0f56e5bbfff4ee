use std::time::Instant;

use crate::model::Graph;

use super::{
    AlgorithmKind, AlgorithmOutput, AlgorithmParams, AlgorithmResult, CentralityEntry, TraceStep,
};

const DEFAULT_TOP_K: usize = 5;

/// Degree centrality: `degree / (n - 1)`, defined as 0 when the graph has
/// at most one node. The payload always carries the full ranking, most
/// central first with ascending id on ties; `top_k` only bounds the trace.
pub(super) fn degree_centrality(graph: &Graph, params: &AlgorithmParams) -> AlgorithmResult {
    let timer = Instant::now();
    let n = graph.node_count();

    let mut ranking = graph
        .sorted_ids()
        .into_iter()
        .map(|id| {
            let degree = graph.degree(id);
            let centrality = if n > 1 {
                degree as f32 / (n - 1) as f32
            } else {
                0.0
            };
            CentralityEntry {
                node: id,
                degree,
                centrality,
            }
        })
        .collect::<Vec<_>>();

    ranking.sort_by(|a, b| {
        b.centrality
            .partial_cmp(&a.centrality)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.node.cmp(&b.node))
    });

    let top_k = params.top_k.unwrap_or(DEFAULT_TOP_K);
    let steps = ranking
        .iter()
        .take(top_k)
        .enumerate()
        .map(|(index, entry)| TraceStep::Ranked {
            node: entry.node,
            rank: index + 1,
            centrality: entry.centrality,
        })
        .collect();

    let message = match ranking.first() {
        Some(top) => {
            let name = graph
                .node(top.node)
                .map(|node| node.name.clone())
                .unwrap_or_default();
            format!("most connected: {name} (degree {})", top.degree)
        }
        None => "graph is empty".to_owned(),
    };

    AlgorithmResult::success(
        AlgorithmKind::DegreeCentrality,
        timer.elapsed(),
        AlgorithmOutput::Centrality { ranking },
        steps,
        message,
    )
}
