//! End-to-end tests over the public engine surface: the scenario graph is
//! mutated, analyzed by every algorithm through the dispatch entry point,
//! laid out, and round-tripped through its record form.

use net_analisa::{
    AlgorithmKind, AlgorithmOutput, AlgorithmParams, ForceDirectedLayout, Graph, NodeId,
    NodeUpdate, run,
};

/// Ten nodes: 1..=7 form a connected cluster, 8..=10 a separate chain.
fn scenario_graph() -> Graph {
    let mut graph = Graph::new();
    for i in 1..=10u32 {
        let id = graph
            .add_node(format!("node-{i}"), 0.1 * i as f32, 5.0 * i as f32)
            .id;
        // Compact positions keep the A* heuristic admissible.
        graph.update_node(
            id,
            NodeUpdate {
                x: Some(i as f32),
                y: Some((i % 4) as f32),
                ..NodeUpdate::default()
            },
        );
    }
    for (a, b) in [
        (1, 2),
        (1, 3),
        (2, 3),
        (2, 4),
        (3, 5),
        (4, 5),
        (4, 6),
        (5, 6),
        (6, 7),
        (8, 9),
        (9, 10),
    ] {
        graph.add_edge(a, b).unwrap();
    }
    graph
}

fn params(start: NodeId, target: NodeId) -> AlgorithmParams {
    AlgorithmParams {
        start: Some(start),
        target: Some(target),
        ..AlgorithmParams::default()
    }
}

/// Every algorithm runs through the dispatcher and reports success on the
/// scenario graph, each with a non-empty trace.
#[test]
fn every_algorithm_succeeds_through_the_dispatcher() {
    let graph = scenario_graph();
    for kind in AlgorithmKind::ALL {
        let result = run(&graph, kind, &params(1, 7));
        assert!(result.success, "{} failed: {}", kind.label(), result.message);
        assert!(result.payload.is_some());
        assert!(!result.steps.is_empty(), "{} trace empty", kind.label());
        assert_eq!(result.algorithm, kind);
    }
}

/// Path-search variants fail uniformly when the endpoints sit in
/// different components, and the graph stays usable afterwards.
#[test]
fn failures_are_reported_not_thrown() {
    let graph = scenario_graph();
    for kind in [AlgorithmKind::Dijkstra, AlgorithmKind::AStar] {
        let result = run(&graph, kind, &params(1, 10));
        assert!(!result.success);
        assert!(result.payload.is_none());
        assert_eq!(result.message, "no path between 1 and 10");
    }

    let afterwards = run(&graph, AlgorithmKind::Bfs, &params(1, 7));
    assert!(afterwards.success);
}

/// BFS and DFS both cover exactly the start component.
#[test]
fn traversals_cover_the_start_component() {
    let graph = scenario_graph();
    for kind in [AlgorithmKind::Bfs, AlgorithmKind::Dfs] {
        let result = run(&graph, kind, &params(1, 7));
        let Some(AlgorithmOutput::Traversal { order, .. }) = result.payload else {
            panic!("expected traversal payload");
        };
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=7).collect::<Vec<_>>(), "{}", kind.label());
    }
}

/// Dijkstra and A* agree on the optimal cost between the same endpoints.
#[test]
fn shortest_path_variants_agree() {
    let graph = scenario_graph();
    let cost_of = |kind| match run(&graph, kind, &params(1, 7)).payload {
        Some(AlgorithmOutput::Path { total_cost, .. }) => total_cost,
        other => panic!("expected path payload, got {other:?}"),
    };

    let dijkstra = cost_of(AlgorithmKind::Dijkstra);
    let astar = cost_of(AlgorithmKind::AStar);
    assert!((dijkstra - astar).abs() < 1e-4);
}

/// The two-cluster split is found and ordered largest first.
#[test]
fn components_split_matches_the_topology() {
    let graph = scenario_graph();
    let result = run(
        &graph,
        AlgorithmKind::ConnectedComponents,
        &AlgorithmParams::default(),
    );
    let Some(AlgorithmOutput::Components { components }) = result.payload else {
        panic!("expected components payload");
    };
    assert_eq!(
        components,
        vec![(1..=7).collect::<Vec<_>>(), (8..=10).collect::<Vec<_>>()]
    );
}

/// The coloring respects every edge even after mutations reshape the
/// graph between runs.
#[test]
fn coloring_stays_valid_across_mutations() {
    let mut graph = scenario_graph();
    graph.remove_node(4);
    graph.add_edge(7, 8).unwrap();

    let result = run(&graph, AlgorithmKind::WelshPowell, &AlgorithmParams::default());
    let Some(AlgorithmOutput::Coloring { colors, color_count }) = result.payload else {
        panic!("expected coloring payload");
    };

    assert_eq!(colors.len(), graph.node_count());
    for edge in graph.edges() {
        assert_ne!(colors[&edge.source], colors[&edge.target]);
    }
    assert!(color_count >= 1);
}

/// Degree invariant survives an arbitrary mutation storm.
#[test]
fn degree_invariant_survives_mutations() {
    let mut graph = scenario_graph();
    graph.remove_edge(2, 3);
    graph.remove_node(5);
    let extra = graph.add_node("extra", 0.5, 10.0).id;
    graph.add_edge(extra, 1).unwrap();
    graph.add_edge(extra, 7).unwrap();
    graph.remove_edge(8, 9);

    for node in graph.nodes() {
        let incident = graph
            .edges()
            .iter()
            .filter(|edge| edge.touches(node.id))
            .count();
        assert_eq!(node.connection_count() as usize, incident);
    }
}

/// JSON round trip through the record form preserves ids, attributes,
/// topology, and the re-derived weights.
#[test]
fn record_round_trip_through_json() {
    let graph = scenario_graph();
    let json = serde_json::to_string(&graph.to_record()).unwrap();
    let rebuilt = Graph::from_record(&serde_json::from_str(&json).unwrap()).unwrap();

    assert_eq!(rebuilt.node_count(), graph.node_count());
    assert_eq!(rebuilt.edge_count(), graph.edge_count());
    for node in graph.nodes() {
        let twin = rebuilt.node(node.id).unwrap();
        assert_eq!(twin.name, node.name);
        assert_eq!(twin.activity, node.activity);
        assert_eq!(twin.connection_count(), node.connection_count());
    }
    for edge in graph.edges() {
        let twin = rebuilt.get_edge(edge.source, edge.target).unwrap();
        assert!((twin.weight - edge.weight).abs() < 1e-6);
    }

    // The rebuilt graph analyzes identically.
    let a = run(&graph, AlgorithmKind::Dijkstra, &params(1, 7));
    let b = run(&rebuilt, AlgorithmKind::Dijkstra, &params(1, 7));
    assert_eq!(a.message, b.message);
}

/// A layout run only moves positions; topology and analysis results are
/// untouched.
#[test]
fn layout_moves_positions_without_touching_topology() {
    let mut graph = scenario_graph();
    let before = run(&graph, AlgorithmKind::ConnectedComponents, &AlgorithmParams::default());

    let mut layout = ForceDirectedLayout::default();
    assert_eq!(layout.run(&mut graph), layout.config.iterations);

    for node in graph.nodes() {
        assert!(node.pos.x.is_finite() && node.pos.y.is_finite());
    }
    let after = run(&graph, AlgorithmKind::ConnectedComponents, &AlgorithmParams::default());
    assert_eq!(before.message, after.message);
    assert_eq!(graph.edge_count(), 11);
}
