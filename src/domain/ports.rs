use crate::domain::graph::SotGraph;
use anyhow::Result;

/// Graph snapshot source port (implemented by Infrastructure)
pub trait GraphSource {
    fn load(&self) -> Result<SotGraph>;
}
