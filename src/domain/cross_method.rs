use crate::domain::classifier::{ReturnPattern, classify_producers};
use crate::domain::consumer::{Consumer, ConsumerResolver};
use crate::domain::index::GraphIndex;
use crate::domain::node::{Node, NodeKind};
use crate::domain::provenance::ProvenanceTracer;
use crate::domain::returns::ReturnAnalyzer;
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

/// One caller-side occurrence: `$local = callee(...)` followed by reads of `$local`
#[derive(Debug, Clone)]
pub struct CallSite<'g> {
    pub local: &'g Node,
    /// The call-result Value the local is assigned from
    pub result: &'g Node,
    pub call: &'g Node,
    pub consumers: Vec<Consumer<'g>>,
}

/// All call sites of one callee plus the callee's return shape
#[derive(Debug, Clone)]
pub struct CaseGroup<'g> {
    pub callee: &'g Node,
    pub pattern: ReturnPattern,
    pub return_value: &'g Node,
    pub return_producers: Vec<&'g Node>,
    pub call_sites: Vec<CallSite<'g>>,
}

/// Findings keyed by callee fqn (callee id when the fqn is absent), in discovery order
#[derive(Debug, Clone, Default)]
pub struct CrossMethodReport<'g> {
    pub groups: IndexMap<&'g str, CaseGroup<'g>>,
}

impl<'g> CrossMethodReport<'g> {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, callee_key: &str) -> Option<&CaseGroup<'g>> {
        self.groups.get(callee_key)
    }

    pub fn total_call_sites(&self) -> usize {
        self.groups.values().map(|g| g.call_sites.len()).sum()
    }

    /// Callee keys per pattern; every pattern is present, in INLINE, LOCAL, MIXED, VOID order.
    pub fn pattern_summary(&self) -> IndexMap<ReturnPattern, Vec<&'g str>> {
        let mut summary: IndexMap<ReturnPattern, Vec<&'g str>> = [
            ReturnPattern::Inline,
            ReturnPattern::Local,
            ReturnPattern::Mixed,
            ReturnPattern::Void,
        ]
        .into_iter()
        .map(|p| (p, Vec::new()))
        .collect();

        for (&key, group) in &self.groups {
            summary.entry(group.pattern).or_default().push(key);
        }
        summary
    }
}

/// Cross-Method Analyzer - composes the single-hop components into grouped findings.
pub struct CrossMethodAnalyzer<'g> {
    index: &'g GraphIndex,
    tracer: ProvenanceTracer<'g>,
    consumers: ConsumerResolver<'g>,
    returns: ReturnAnalyzer<'g>,
}

impl<'g> CrossMethodAnalyzer<'g> {
    pub fn new(index: &'g GraphIndex) -> Self {
        Self {
            index,
            tracer: ProvenanceTracer::new(index),
            consumers: ConsumerResolver::new(index),
            returns: ReturnAnalyzer::new(index),
        }
    }

    /// Locals that are assigned from a call result, are read at least once, and whose
    /// call resolves to a Method with a return slot.
    ///
    /// Per pairing: the first `produces` source that is a Call, then the first `calls`
    /// target that is a Method. A (local, call) pair is reported once.
    pub fn find_cross_method_cases(&self) -> CrossMethodReport<'g> {
        let index = self.index;
        let mut groups: IndexMap<&'g str, CaseGroup<'g>> = IndexMap::new();
        let mut seen: HashSet<(&'g str, &'g str)> = HashSet::new();

        for local in index.nodes().filter(|n| n.is_local_value()) {
            let consumers = self.consumers.consumers_of(&local.id);
            if consumers.is_empty() {
                continue;
            }

            for assignment in self.tracer.trace_assignment(&local.id) {
                let Some(result) = index
                    .node(&assignment.target)
                    .filter(|n| n.is_result_value())
                else {
                    continue;
                };

                let Some(call) = self
                    .tracer
                    .trace_production(&result.id)
                    .into_iter()
                    .filter_map(|e| index.node(&e.source))
                    .find(|n| n.kind == NodeKind::Call)
                else {
                    debug!(result = %result.id, "Call result without a producing Call");
                    continue;
                };

                let Some(callee) = self.returns.callee_of(&call.id) else {
                    continue;
                };
                let Some(return_value) = self.returns.return_value_of(&callee.id) else {
                    continue;
                };

                if !seen.insert((local.id.as_str(), call.id.as_str())) {
                    continue;
                }

                let key = callee.fqn.as_deref().unwrap_or(callee.id.as_str());
                let group = groups.entry(key).or_insert_with(|| {
                    let return_producers = self.returns.return_producers_of(&callee.id);
                    CaseGroup {
                        callee,
                        pattern: classify_producers(&return_producers),
                        return_value,
                        return_producers,
                        call_sites: Vec::new(),
                    }
                });
                group.call_sites.push(CallSite {
                    local,
                    result,
                    call,
                    consumers: consumers.clone(),
                });
            }
        }

        debug!(
            callees = groups.len(),
            call_sites = groups.values().map(|g| g.call_sites.len()).sum::<usize>(),
            "Cross-method analysis finished"
        );
        CrossMethodReport { groups }
    }

    /// Methods without a return slot that are nonetheless called, with their caller count
    pub fn void_methods_with_callers(&self) -> Vec<(&'g Node, usize)> {
        self.index
            .nodes()
            .filter(|n| n.kind == NodeKind::Method)
            .filter(|m| self.returns.return_value_of(&m.id).is_none())
            .filter_map(|m| {
                let callers = self.returns.callers_of(&m.id).len();
                (callers > 0).then_some((m, callers))
            })
            .collect()
    }
}
