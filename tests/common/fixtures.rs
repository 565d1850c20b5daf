//! Graph fixtures for integration tests.
#![allow(dead_code)]

use return_boundary::domain::edge::{Edge, EdgeKind};
use return_boundary::domain::graph::SotGraph;
use return_boundary::domain::node::{Node, NodeKind, ValueKind};
use std::path::{Path, PathBuf};

pub fn method(id: &str, fqn: &str) -> Node {
    Node::new(id, NodeKind::Method)
        .with_fqn(fqn)
        .with_file("src/Service.php")
}

pub fn call(id: &str) -> Node {
    Node::new(id, NodeKind::Call).with_file("src/Service.php")
}

/// A method's return slot
pub fn return_slot(id: &str) -> Node {
    Node::new(id, NodeKind::Value)
        .with_name("return")
        .with_value_kind(ValueKind::Result)
}

/// Caller-side call-result Value
pub fn call_result(id: &str, fqn: &str) -> Node {
    Node::new(id, NodeKind::Value)
        .with_fqn(format!("{fqn}(result)"))
        .with_value_kind(ValueKind::Result)
}

pub fn local(id: &str, name: &str) -> Node {
    Node::new(id, NodeKind::Value)
        .with_name(name)
        .with_value_kind(ValueKind::Local)
}

pub fn parameter(id: &str, name: &str) -> Node {
    Node::new(id, NodeKind::Value)
        .with_name(name)
        .with_value_kind(ValueKind::Parameter)
}

pub fn edge(source: &str, target: &str, kind: EdgeKind) -> Edge {
    Edge::new(source, target, kind)
}

/// Methods m1..m4 covering the four return patterns, plus a caller of `m1`:
///
/// - `m1` returns `c1` inline
/// - `m2` returns `$local1`
/// - `m3` returns a call on one path and `$local3` on another
/// - `m4` has no return slot
/// - `caller` does `$local2 = m1(); c3($local2)`
pub fn scenario_graph() -> SotGraph {
    SotGraph::new(
        vec![
            method("m1", "App\\Service::m1()"),
            return_slot("r1"),
            call("c1"),
            method("m2", "App\\Service::m2()"),
            return_slot("r2"),
            local("local1", "$local1"),
            method("m3", "App\\Service::m3()"),
            return_slot("r3"),
            call("c3a"),
            local("local3", "$local3"),
            method("m4", "App\\Service::m4()"),
            method("caller", "App\\Controller::run()"),
            local("local2", "$local2"),
            call_result("result1", "App\\Controller::run().$local2"),
            call("c2"),
            call("c3"),
        ],
        vec![
            // A
            edge("m1", "r1", EdgeKind::Contains),
            edge("c1", "r1", EdgeKind::Produces),
            // B
            edge("m2", "r2", EdgeKind::Contains),
            edge("m2", "local1", EdgeKind::Contains),
            edge("local1", "r2", EdgeKind::Produces),
            // C
            edge("m3", "r3", EdgeKind::Contains),
            edge("c3a", "r3", EdgeKind::Produces),
            edge("local3", "r3", EdgeKind::Produces),
            // E
            edge("caller", "local2", EdgeKind::Contains),
            edge("caller", "result1", EdgeKind::Contains),
            edge("caller", "c2", EdgeKind::Contains),
            edge("caller", "c3", EdgeKind::Contains),
            edge("local2", "result1", EdgeKind::AssignedFrom),
            edge("c2", "result1", EdgeKind::Produces),
            edge("c2", "m1", EdgeKind::Calls),
            Edge::new("local2", "c3", EdgeKind::UsedBy).with_parameter("arg0"),
            edge("c3", "m4", EdgeKind::Calls),
        ],
    )
}

/// Several callers of several callees, consumed through every edge direction.
pub fn busy_graph() -> SotGraph {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for callee in 0..4 {
        let m = format!("callee{callee}");
        let slot = format!("callee{callee}_ret");
        nodes.push(method(&m, &format!("App\\Repo::get{callee}()")));
        nodes.push(return_slot(&slot));
        edges.push(edge(&m, &slot, EdgeKind::Contains));
        if callee % 2 == 0 {
            let c = format!("callee{callee}_new");
            nodes.push(call(&c));
            edges.push(edge(&c, &slot, EdgeKind::Produces));
        } else {
            let l = format!("callee{callee}_local");
            nodes.push(local(&l, "$out"));
            edges.push(edge(&l, &slot, EdgeKind::Produces));
        }
    }

    for site in 0..12 {
        let callee = format!("callee{}", site % 4);
        let l = format!("site{site}_local");
        let r = format!("site{site}_result");
        let c = format!("site{site}_call");
        let reader = format!("site{site}_reader");
        nodes.push(local(&l, &format!("$v{site}")));
        nodes.push(call_result(&r, &format!("App\\Ctl::a{site}().$v{site}")));
        nodes.push(call(&c));
        nodes.push(call(&reader));
        edges.push(edge(&l, &r, EdgeKind::AssignedFrom));
        edges.push(edge(&c, &r, EdgeKind::Produces));
        edges.push(edge(&c, &callee, EdgeKind::Calls));
        match site % 3 {
            0 => edges.push(edge(&reader, &l, EdgeKind::Receiver)),
            1 => edges.push(Edge::new(&reader, &l, EdgeKind::Argument).with_parameter("$x")),
            _ => edges.push(Edge::new(&l, &reader, EdgeKind::UsedBy).with_parameter("0")),
        }
    }

    SotGraph::new(nodes, edges)
}

/// Serialize a graph into `dir/name` and return the path.
pub fn write_graph(dir: &Path, name: &str, graph: &SotGraph) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string(graph).unwrap()).unwrap();
    path
}
