use crate::domain::edge::{Edge, EdgeKind};
use crate::domain::index::GraphIndex;

/// Provenance Tracer - single-hop lookups on where a value's content comes from.
///
/// Multi-hop chains are composed by callers (see `chain::trace_origin`) so that every
/// hop stays visible.
pub struct ProvenanceTracer<'g> {
    index: &'g GraphIndex,
}

impl<'g> ProvenanceTracer<'g> {
    pub fn new(index: &'g GraphIndex) -> Self {
        Self { index }
    }

    /// `assigned_from` edges sourced at `value_id` (several when conditionally assigned)
    pub fn trace_assignment(&self, value_id: &str) -> Vec<&'g Edge> {
        self.index
            .outgoing_of_kind(value_id, EdgeKind::AssignedFrom)
            .collect()
    }

    /// `produces` edges targeting `value_id`: the expressions that write into it
    pub fn trace_production(&self, value_id: &str) -> Vec<&'g Edge> {
        self.index
            .incoming_of_kind(value_id, EdgeKind::Produces)
            .collect()
    }

    /// No assignment and no production: a root (typically a parameter).
    pub fn is_unresolved(&self, value_id: &str) -> bool {
        self.index
            .outgoing_of_kind(value_id, EdgeKind::AssignedFrom)
            .next()
            .is_none()
            && self
                .index
                .incoming_of_kind(value_id, EdgeKind::Produces)
                .next()
                .is_none()
    }
}
