use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use net_analisa::{
    AlgorithmKind, AlgorithmOutput, AlgorithmParams, ForceDirectedLayout, Graph, GraphRecord,
    LayoutConfig, util,
};

/// Headless driver: builds or imports a graph, runs every analysis
/// algorithm, settles the layout, and prints a report.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Number of nodes in the generated sample graph.
    #[arg(long, default_value_t = 12)]
    nodes: u32,

    /// Chance of an edge between any two sample nodes, 0.0..=1.0.
    #[arg(long, default_value_t = 0.3)]
    edge_chance: f32,

    /// Layout iteration budget.
    #[arg(long, default_value_t = 150)]
    layout_iterations: usize,

    /// Read the graph from a JSON record file instead of generating one.
    #[arg(long)]
    import: Option<PathBuf>,

    /// Write the final graph (post-layout positions included) as JSON.
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut graph = match &args.import {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let record: GraphRecord =
                serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
            Graph::from_record(&record).context("rebuilding graph from records")?
        }
        None => sample_graph(args.nodes, args.edge_chance.clamp(0.0, 1.0)),
    };

    let stats = graph.statistics();
    println!(
        "graph: {} nodes, {} edges, density {:.3}, average degree {:.2}, degree range {}..={}",
        stats.node_count,
        stats.edge_count,
        stats.density,
        stats.average_degree,
        stats.min_degree,
        stats.max_degree
    );

    let ids = graph.sorted_ids();
    let params = AlgorithmParams {
        start: ids.first().copied(),
        target: ids.last().copied(),
        ..AlgorithmParams::default()
    };

    println!("\n{:<22} {:<12} {:>10}  result", "algorithm", "input", "time");
    for kind in AlgorithmKind::ALL {
        let scope = match (kind.needs_start(), kind.needs_target()) {
            (_, true) => format!(
                "{} -> {}",
                params.start.unwrap_or_default(),
                params.target.unwrap_or_default()
            ),
            (true, false) => format!("from {}", params.start.unwrap_or_default()),
            _ => "whole graph".to_owned(),
        };
        let result = net_analisa::run(&graph, kind, &params);
        let summary = if result.success {
            summarize(&result.payload)
        } else {
            result.message.clone()
        };
        println!(
            "{:<22} {:<12} {:>8.3}ms  {}",
            kind.label(),
            scope,
            result.elapsed.as_secs_f64() * 1000.0,
            summary
        );
    }

    let mut layout = ForceDirectedLayout::new(LayoutConfig {
        iterations: args.layout_iterations,
        ..LayoutConfig::default()
    });
    let steps = layout.run(&mut graph);
    println!("\nlayout: {steps} steps");

    if let Some(path) = &args.export {
        let record = graph.to_record();
        let text = serde_json::to_string_pretty(&record)?;
        fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        println!("exported to {}", path.display());
    }

    Ok(())
}

fn summarize(payload: &Option<AlgorithmOutput>) -> String {
    match payload {
        Some(AlgorithmOutput::Traversal { order, .. }) => {
            format!("{} nodes visited", order.len())
        }
        Some(AlgorithmOutput::Path {
            nodes, total_cost, ..
        }) => format!("{} hops, cost {total_cost:.3}", nodes.len().saturating_sub(1)),
        Some(AlgorithmOutput::Components { components }) => {
            format!("{} components", components.len())
        }
        Some(AlgorithmOutput::Centrality { ranking }) => match ranking.first() {
            Some(top) => format!("top node {} ({:.3})", top.node, top.centrality),
            None => "empty ranking".to_owned(),
        },
        Some(AlgorithmOutput::Coloring { color_count, .. }) => {
            format!("{color_count} colors")
        }
        None => "no payload".to_owned(),
    }
}

/// Deterministic sample network: attributes and edges come from hashes of
/// the node indices, so the same arguments always produce the same graph.
fn sample_graph(node_count: u32, edge_chance: f32) -> Graph {
    let mut graph = Graph::new();

    for i in 0..node_count {
        let activity = 0.1 + util::stable_fraction(u64::from(i) * 3 + 1) * 0.9;
        let interaction = 1.0 + util::stable_fraction(u64::from(i) * 3 + 2) * 49.0;
        graph.add_node(format!("user-{}", i + 1), activity, interaction);
    }

    let ids = graph.sorted_ids();
    for (i, &source) in ids.iter().enumerate() {
        for &target in &ids[i + 1..] {
            let roll = util::stable_fraction(u64::from(source) << 32 | u64::from(target));
            if roll < edge_chance {
                // Both endpoints exist and differ; the insert cannot fail.
                let _ = graph.add_edge(source, target);
            }
        }
    }
    graph
}
