use crate::domain::graph::SotGraph;
use crate::domain::ports::GraphSource;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// File system graph source: a SoT JSON document on disk
pub struct JsonFileGraphSource {
    path: PathBuf,
}

impl JsonFileGraphSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl GraphSource for JsonFileGraphSource {
    fn load(&self) -> Result<SotGraph> {
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read graph JSON: {}", self.path.display()))?;
        let graph = SotGraph::from_json(&json)
            .with_context(|| format!("Failed to parse graph JSON: {}", self.path.display()))?;
        info!(
            path = %self.path.display(),
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "Loaded graph"
        );
        Ok(graph)
    }
}
