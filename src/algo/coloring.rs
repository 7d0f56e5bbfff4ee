use std::collections::HashMap;
use std::time::Instant;

use crate::model::Graph;

use super::{AlgorithmKind, AlgorithmOutput, AlgorithmResult, TraceStep};

/// Welsh-Powell greedy coloring. Nodes are taken in descending degree
/// order (ascending id on ties); each pass assigns the current color to
/// every uncolored node with no same-colored neighbor, then moves to the
/// next color. Colors are 1-based; the count is a heuristic upper bound
/// on the chromatic number, not a minimum.
pub(super) fn welsh_powell(graph: &Graph) -> AlgorithmResult {
    let timer = Instant::now();

    let mut ordered = graph.sorted_ids();
    ordered.sort_by(|&a, &b| graph.degree(b).cmp(&graph.degree(a)).then_with(|| a.cmp(&b)));

    let mut colors: HashMap<_, u32> = HashMap::with_capacity(ordered.len());
    let mut steps = Vec::new();
    let mut color = 0u32;

    while colors.len() < ordered.len() {
        color += 1;
        for &node in &ordered {
            if colors.contains_key(&node) {
                continue;
            }
            let blocked = graph
                .neighbors(node)
                .iter()
                .any(|neighbor| colors.get(neighbor) == Some(&color));
            if !blocked {
                colors.insert(node, color);
                steps.push(TraceStep::Colored { node, color });
            }
        }
    }

    let message = format!("colored with {color} colors");
    AlgorithmResult::success(
        AlgorithmKind::WelshPowell,
        timer.elapsed(),
        AlgorithmOutput::Coloring {
            colors,
            color_count: color,
        },
        steps,
        message,
    )
}
