//! Sanity check: library and test common module are accessible.

mod common;

use return_boundary::app::engine::AnalysisEngine;
use return_boundary::domain::graph::SotGraph;
use return_boundary::domain::index::GraphIndex;

#[test]
fn test_library_accessible() {
    let index = GraphIndex::build(SotGraph::default());
    assert_eq!(index.node_count(), 0);
    assert_eq!(index.edge_count(), 0);
}

#[test]
fn test_engine_loads_fixture_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::fixtures::write_graph(dir.path(), "sot.json", &common::fixtures::scenario_graph());

    let engine = AnalysisEngine::load_from_json(&path).unwrap();
    let health = engine.health();
    assert_eq!(health.node_count, 16);
    assert_eq!(health.graph_path, path.to_string_lossy());
    assert!(engine.lookup_node("m1").is_some());
}
