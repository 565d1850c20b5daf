use crate::domain::edge::{Edge, EdgeKind};
use crate::domain::graph::SotGraph;
use crate::domain::node::{Node, NodeId, NodeKind};
use indexmap::IndexMap;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use std::collections::HashMap;
use tracing::{debug, info};

/// Graph Index - the read-only query structure every analysis runs on.
///
/// Node and edge payloads are moved into the petgraph storage exactly once; the lookup
/// tables only hold `NodeIndex`/`EdgeIndex` handles. Per-node edge lists keep the
/// document's edge order (petgraph's own adjacency walk is newest-first, so it is
/// never used for ordered queries).
#[derive(Debug)]
pub struct GraphIndex {
    graph: DiGraph<Node, Edge>,
    id_to_node: HashMap<NodeId, NodeIndex>,
    outgoing: Vec<Vec<EdgeIndex>>,
    incoming: Vec<Vec<EdgeIndex>>,
    /// Edges with a missing endpoint, kept only for diagnostics
    dangling: Vec<Edge>,
    duplicate_nodes: usize,
}

impl GraphIndex {
    /// Single pass over nodes, single pass over edges.
    ///
    /// Duplicate node ids keep the first occurrence. Edges with a missing endpoint are
    /// set aside as dangling and left out of every traversal lookup.
    pub fn build(sot: SotGraph) -> Self {
        let SotGraph { nodes, edges } = sot;

        let mut graph: DiGraph<Node, Edge> = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut id_to_node: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(nodes.len());
        let mut duplicate_nodes = 0;

        for node in nodes {
            if id_to_node.contains_key(&node.id) {
                debug!(id = %node.id, "Duplicate node id, keeping first occurrence");
                duplicate_nodes += 1;
                continue;
            }
            let id = node.id.clone();
            let idx = graph.add_node(node);
            id_to_node.insert(id, idx);
        }

        let mut outgoing = vec![Vec::new(); graph.node_count()];
        let mut incoming = vec![Vec::new(); graph.node_count()];
        let mut dangling = Vec::new();

        for edge in edges {
            let (Some(&source), Some(&target)) =
                (id_to_node.get(&edge.source), id_to_node.get(&edge.target))
            else {
                debug!(
                    source = %edge.source,
                    target = %edge.target,
                    kind = edge.kind.as_str(),
                    "Skipping dangling edge"
                );
                dangling.push(edge);
                continue;
            };
            let e = graph.add_edge(source, target, edge);
            outgoing[source.index()].push(e);
            incoming[target.index()].push(e);
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dangling_edges = dangling.len(),
            duplicate_nodes,
            "Built graph index"
        );

        Self {
            graph,
            id_to_node,
            outgoing,
            incoming,
            dangling,
            duplicate_nodes,
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.id_to_node.get(id).map(|&idx| &self.graph[idx])
    }

    /// All nodes in document order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.raw_nodes().iter().map(|n| &n.weight)
    }

    /// All indexed (non-dangling) edges in document order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.raw_edges().iter().map(|e| &e.weight)
    }

    /// Edges whose source is `id`, in document order. Unknown ids yield nothing.
    pub fn outgoing<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Edge> + use<'a> {
        self.edge_list(&self.outgoing, id)
            .iter()
            .map(move |&e| &self.graph[e])
    }

    /// Edges whose target is `id`, in document order. Unknown ids yield nothing.
    pub fn incoming<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Edge> + use<'a> {
        self.edge_list(&self.incoming, id)
            .iter()
            .map(move |&e| &self.graph[e])
    }

    pub fn outgoing_of_kind<'a>(
        &'a self,
        id: &str,
        kind: EdgeKind,
    ) -> impl Iterator<Item = &'a Edge> + use<'a> {
        self.outgoing(id).filter(move |e| e.kind == kind)
    }

    pub fn incoming_of_kind<'a>(
        &'a self,
        id: &str,
        kind: EdgeKind,
    ) -> impl Iterator<Item = &'a Edge> + use<'a> {
        self.incoming(id).filter(move |e| e.kind == kind)
    }

    fn edge_list<'a>(&self, lists: &'a [Vec<EdgeIndex>], id: &str) -> &'a [EdgeIndex] {
        self.id_to_node
            .get(id)
            .map(|idx| lists[idx.index()].as_slice())
            .unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn dangling_edge_count(&self) -> usize {
        self.dangling.len()
    }

    /// Dangling edges touching `id` on either end, in document order
    pub fn dangling_edges_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.dangling
            .iter()
            .filter(move |e| e.source == id || e.target == id)
    }

    pub fn duplicate_node_count(&self) -> usize {
        self.duplicate_nodes
    }

    /// Indexed edges per type, in order of first appearance
    pub fn edge_kind_counts(&self) -> IndexMap<EdgeKind, usize> {
        let mut counts = IndexMap::new();
        for edge in self.edges() {
            *counts.entry(edge.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Nodes per kind, in order of first appearance
    pub fn node_kind_counts(&self) -> IndexMap<NodeKind, usize> {
        let mut counts = IndexMap::new();
        for node in self.nodes() {
            *counts.entry(node.kind).or_insert(0) += 1;
        }
        counts
    }
}
