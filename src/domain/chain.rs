//! Multi-hop provenance walks composed from the single-hop tracer primitives.
//!
//! Malformed graphs can contain `assigned_from`/`produces` cycles, so every walk keeps
//! a visited-id set and stops on the first revisit.

use crate::domain::edge::EdgeKind;
use crate::domain::index::GraphIndex;
use crate::domain::node::{Node, NodeKind};
use crate::domain::provenance::ProvenanceTracer;
use crate::domain::returns::ReturnAnalyzer;
use std::collections::HashSet;

/// One step of a provenance chain
#[derive(Debug, Clone, Copy)]
pub struct Hop<'g> {
    pub via: EdgeKind,
    pub from: &'g Node,
    pub to: &'g Node,
}

/// Where a walk stopped
#[derive(Debug, Clone, PartialEq)]
pub enum Terminus<'g> {
    /// Reached a non-Value node (a Call or another expression)
    Expression(&'g Node),
    /// A Value with neither assignment nor production: unresolved provenance
    Root(&'g Node),
    /// The walk came back to an already visited node
    Cycle(&'g Node),
    /// The start id is not in the graph
    Missing(String),
}

#[derive(Debug, Clone)]
pub struct ProvenanceChain<'g> {
    pub start: Option<&'g Node>,
    pub hops: Vec<Hop<'g>>,
    pub terminus: Terminus<'g>,
}

impl ProvenanceChain<'_> {
    pub fn is_unresolved(&self) -> bool {
        matches!(self.terminus, Terminus::Root(_))
    }
}

/// Walk backwards from `value_id` to the origin of its content.
///
/// From a Value the first `assigned_from` target is followed, otherwise the first
/// `produces` source. With `cross_calls`, a Call whose callee has a return slot is
/// followed into the callee (`calls`, then `contains` to the slot) and the walk
/// continues from that slot.
pub fn trace_origin<'g>(
    index: &'g GraphIndex,
    value_id: &str,
    cross_calls: bool,
) -> ProvenanceChain<'g> {
    let Some(start) = index.node(value_id) else {
        return ProvenanceChain {
            start: None,
            hops: Vec::new(),
            terminus: Terminus::Missing(value_id.to_string()),
        };
    };

    let tracer = ProvenanceTracer::new(index);
    let returns = ReturnAnalyzer::new(index);

    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(start.id.as_str());
    let mut hops = Vec::new();
    let mut current = start;

    let terminus = loop {
        let next: Vec<(EdgeKind, &'g Node)> = if current.is_value() {
            let assigned = tracer
                .trace_assignment(&current.id)
                .first()
                .and_then(|e| index.node(&e.target))
                .map(|n| (EdgeKind::AssignedFrom, n));
            let produced = || {
                tracer
                    .trace_production(&current.id)
                    .first()
                    .and_then(|e| index.node(&e.source))
                    .map(|n| (EdgeKind::Produces, n))
            };
            match assigned.or_else(produced) {
                Some(step) => vec![step],
                None => break Terminus::Root(current),
            }
        } else if cross_calls && current.kind == NodeKind::Call {
            match returns.callee_of(&current.id) {
                Some(callee) => match returns.return_value_of(&callee.id) {
                    Some(slot) => vec![(EdgeKind::Calls, callee), (EdgeKind::Contains, slot)],
                    None => break Terminus::Expression(current),
                },
                None => break Terminus::Expression(current),
            }
        } else {
            break Terminus::Expression(current);
        };

        let mut revisited = None;
        for (via, to) in next {
            hops.push(Hop {
                via,
                from: current,
                to,
            });
            current = to;
            if !visited.insert(to.id.as_str()) {
                revisited = Some(to);
                break;
            }
        }
        if let Some(node) = revisited {
            break Terminus::Cycle(node);
        }
    };

    ProvenanceChain {
        start: Some(start),
        hops,
        terminus,
    }
}
