use crate::domain::edge::Edge;
use crate::domain::node::Node;
use serde::{Deserialize, Serialize};

/// SoT graph snapshot: the document handed over by the ingestion pipeline.
///
/// Both collections are required; a document missing either one fails to parse.
/// Everything else (unknown kinds, dangling references) is tolerated downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SotGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl SotGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
