use crate::domain::edge::EdgeKind;
use crate::domain::index::GraphIndex;
use crate::domain::node::{Node, NodeKind};
use crate::domain::provenance::ProvenanceTracer;
use tracing::debug;

/// Return Analyzer - locates a method's return slot and what feeds it.
pub struct ReturnAnalyzer<'g> {
    index: &'g GraphIndex,
    tracer: ProvenanceTracer<'g>,
}

impl<'g> ReturnAnalyzer<'g> {
    pub fn new(index: &'g GraphIndex) -> Self {
        Self {
            index,
            tracer: ProvenanceTracer::new(index),
        }
    }

    /// The method's return slot, or `None` for void/untracked methods.
    ///
    /// The first contained Value named `return` wins. Only when there is none does the
    /// first marker-less `result` Value count. Extra candidates are ignored, never merged.
    pub fn return_value_of(&self, method_id: &str) -> Option<&'g Node> {
        let contained: Vec<&'g Node> = self
            .index
            .outgoing_of_kind(method_id, EdgeKind::Contains)
            .filter_map(|e| self.index.node(&e.target))
            .filter(|n| n.is_return_slot())
            .collect();

        let named: Vec<&'g Node> = contained
            .iter()
            .copied()
            .filter(|n| n.is_named_return_slot())
            .collect();
        let candidates = if named.is_empty() { contained } else { named };

        let (&first, rest) = candidates.split_first()?;
        if !rest.is_empty() {
            debug!(
                method = method_id,
                slot = %first.id,
                ignored = rest.len(),
                "Method has several return slot candidates, using the first"
            );
        }
        Some(first)
    }

    /// Every node with a `produces` edge into the method's return slot, in edge order.
    pub fn return_producers_of(&self, method_id: &str) -> Vec<&'g Node> {
        let Some(slot) = self.return_value_of(method_id) else {
            return Vec::new();
        };
        self.tracer
            .trace_production(&slot.id)
            .into_iter()
            .filter_map(|e| self.index.node(&e.source))
            .collect()
    }

    /// Call sites invoking the method
    pub fn callers_of(&self, method_id: &str) -> Vec<&'g Node> {
        self.index
            .incoming_of_kind(method_id, EdgeKind::Calls)
            .filter_map(|e| self.index.node(&e.source))
            .collect()
    }

    /// Target Method of a Call (first `calls` edge pointing at a Method)
    pub fn callee_of(&self, call_id: &str) -> Option<&'g Node> {
        self.index
            .outgoing_of_kind(call_id, EdgeKind::Calls)
            .filter_map(|e| self.index.node(&e.target))
            .find(|n| n.kind == NodeKind::Method)
    }
}
