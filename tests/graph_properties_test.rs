//! Whole-graph properties: totality, determinism, consumer symmetry, tolerance of
//! malformed input.

mod common;

use common::fixtures::{busy_graph, call, edge, local, method, return_slot, scenario_graph};
use return_boundary::domain::classifier::{PatternClassifier, ReturnPattern};
use return_boundary::domain::consumer::ConsumerResolver;
use return_boundary::domain::cross_method::CrossMethodAnalyzer;
use return_boundary::domain::edge::{Edge, EdgeKind};
use return_boundary::domain::graph::SotGraph;
use return_boundary::domain::index::GraphIndex;
use return_boundary::domain::node::{Node, NodeKind, ValueKind};
use return_boundary::domain::returns::ReturnAnalyzer;

#[test]
fn test_classification_is_total() {
    for sot in [scenario_graph(), busy_graph()] {
        let index = GraphIndex::build(sot);
        let classifier = PatternClassifier::new(&index);
        for m in index.nodes().filter(|n| n.kind == NodeKind::Method) {
            let pattern = classifier.classify(&m.id);
            assert!(matches!(
                pattern,
                ReturnPattern::Inline | ReturnPattern::Local | ReturnPattern::Mixed | ReturnPattern::Void
            ));
        }
        assert_eq!(classifier.classify("no-such-method"), ReturnPattern::Void);
    }
}

#[test]
fn test_cross_method_cases_are_deterministic() {
    let index = GraphIndex::build(busy_graph());
    let analyzer = CrossMethodAnalyzer::new(&index);

    let shape = || {
        analyzer
            .find_cross_method_cases()
            .groups
            .iter()
            .map(|(key, g)| {
                let sites: Vec<String> = g.call_sites.iter().map(|s| s.local.id.clone()).collect();
                (key.to_string(), g.pattern, sites)
            })
            .collect::<Vec<_>>()
    };

    let first = shape();
    assert_eq!(first, shape());

    // Groups appear in the order their first call site is met, sites in document order
    let keys: Vec<&str> = first.iter().map(|(k, _, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "App\\Repo::get0()",
            "App\\Repo::get1()",
            "App\\Repo::get2()",
            "App\\Repo::get3()"
        ]
    );
    assert_eq!(first[0].2, vec!["site0_local", "site4_local", "site8_local"]);
    assert_eq!(first[0].1, ReturnPattern::Inline);
    assert_eq!(first[1].1, ReturnPattern::Local);

    // A fresh index over the same document gives the same answer
    let again = GraphIndex::build(busy_graph());
    let report = CrossMethodAnalyzer::new(&again).find_cross_method_cases();
    assert_eq!(report.total_call_sites(), 12);
}

#[test]
fn test_consumer_symmetry() {
    for sot in [scenario_graph(), busy_graph()] {
        let index = GraphIndex::build(sot);
        let resolver = ConsumerResolver::new(&index);

        for e in index.edges() {
            let (value, reader) = match e.kind {
                EdgeKind::Receiver | EdgeKind::Argument => (&e.target, &e.source),
                EdgeKind::UsedBy => (&e.source, &e.target),
                _ => continue,
            };
            let consumers = resolver.consumers_of(value);
            assert!(
                consumers.iter().any(|c| &c.node.id == reader),
                "{reader} missing from consumers of {value}"
            );
        }
    }
}

#[test]
fn test_dangling_edges_are_tolerated() {
    let mut sot = scenario_graph();
    sot.edges.extend([
        edge("ghost_call", "r1", EdgeKind::Produces),
        edge("m2", "ghost_slot", EdgeKind::Contains),
        edge("local2", "ghost_reader", EdgeKind::UsedBy),
        edge("ghost_a", "ghost_b", EdgeKind::AssignedFrom),
        edge("c2", "ghost_method", EdgeKind::Calls),
    ]);
    let index = GraphIndex::build(sot);
    assert_eq!(index.dangling_edge_count(), 5);

    let returns = ReturnAnalyzer::new(&index);
    let producers: Vec<&str> = returns
        .return_producers_of("m1")
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(producers, vec!["c1"]);
    assert_eq!(returns.return_value_of("m2").unwrap().id, "r2");
    assert_eq!(ConsumerResolver::new(&index).consumers_of("local2").len(), 1);

    let report = CrossMethodAnalyzer::new(&index).find_cross_method_cases();
    assert_eq!(report.len(), 1);
    assert_eq!(report.total_call_sites(), 1);
}

#[test]
fn test_first_return_slot_wins() {
    let sot = SotGraph::new(
        vec![
            method("m", "App\\A::m()"),
            return_slot("ret_first"),
            return_slot("ret_second"),
            call("c"),
            local("x", "$x"),
        ],
        vec![
            edge("m", "ret_first", EdgeKind::Contains),
            edge("m", "ret_second", EdgeKind::Contains),
            edge("c", "ret_first", EdgeKind::Produces),
            edge("x", "ret_second", EdgeKind::Produces),
        ],
    );
    let index = GraphIndex::build(sot);
    let returns = ReturnAnalyzer::new(&index);
    assert_eq!(returns.return_value_of("m").unwrap().id, "ret_first");

    // The second slot is ignored, not merged: only the call feeds the pattern
    assert_eq!(PatternClassifier::new(&index).classify("m"), ReturnPattern::Inline);
}

#[test]
fn test_named_return_slot_beats_unmarked_call_result() {
    let sot = SotGraph::new(
        vec![
            method("caller", "App\\B::run()"),
            Node::new("cr", NodeKind::Value).with_value_kind(ValueKind::Result),
            return_slot("real_ret"),
            call("c"),
            local("x", "$x"),
        ],
        vec![
            edge("caller", "cr", EdgeKind::Contains),
            edge("caller", "real_ret", EdgeKind::Contains),
            edge("c", "cr", EdgeKind::Produces),
            edge("x", "real_ret", EdgeKind::Produces),
        ],
    );
    let index = GraphIndex::build(sot);
    let returns = ReturnAnalyzer::new(&index);
    assert_eq!(returns.return_value_of("caller").unwrap().id, "real_ret");
    assert_eq!(PatternClassifier::new(&index).classify("caller"), ReturnPattern::Local);
}

#[test]
fn test_slot_without_producers_is_void_but_still_reported() {
    let sot = SotGraph::new(
        vec![
            method("m", "App\\A::m()"),
            return_slot("ret"),
            method("caller", "App\\B::run()"),
            local("v", "$v"),
            common::fixtures::call_result("res", "App\\B::run().$v"),
            call("c"),
            call("reader"),
        ],
        vec![
            edge("m", "ret", EdgeKind::Contains),
            edge("v", "res", EdgeKind::AssignedFrom),
            edge("c", "res", EdgeKind::Produces),
            edge("c", "m", EdgeKind::Calls),
            Edge::new("reader", "v", EdgeKind::Receiver),
        ],
    );
    let index = GraphIndex::build(sot);
    assert_eq!(PatternClassifier::new(&index).classify("m"), ReturnPattern::Void);

    let report = CrossMethodAnalyzer::new(&index).find_cross_method_cases();
    assert_eq!(report.get("App\\A::m()").unwrap().pattern, ReturnPattern::Void);
}
