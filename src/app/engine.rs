use crate::adapters::fs::JsonFileGraphSource;
use crate::adapters::manifest::{CaseManifest, ManifestSampler};
use crate::app::dto::*;
use crate::domain::chain::{Terminus, trace_origin};
use crate::domain::classifier::{PatternClassifier, ReturnPattern, classify_producers};
use crate::domain::consumer::{Consumer, ConsumerResolver};
use crate::domain::cross_method::{CaseGroup, CrossMethodAnalyzer};
use crate::domain::edge::Edge;
use crate::domain::graph::SotGraph;
use crate::domain::index::GraphIndex;
use crate::domain::node::Node;
use crate::domain::ports::GraphSource;
use crate::domain::returns::ReturnAnalyzer;
use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Analysis session: owns the immutable index and answers every query against it.
///
/// Cheap to clone; clones share the same index.
#[derive(Clone)]
pub struct AnalysisEngine {
    graph_path: PathBuf,
    index: Arc<GraphIndex>,
}

impl AnalysisEngine {
    /// Construct an engine from an in-memory graph.
    ///
    /// Used for testing or when the graph does not come from a file.
    pub fn from_graph(graph: SotGraph) -> Self {
        Self {
            graph_path: PathBuf::from("<memory>"),
            index: Arc::new(GraphIndex::build(graph)),
        }
    }

    pub fn load_from_json(json_path: &Path) -> Result<Self> {
        let graph = JsonFileGraphSource::new(json_path).load()?;
        Ok(Self {
            graph_path: json_path.to_path_buf(),
            index: Arc::new(GraphIndex::build(graph)),
        })
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            graph_path: self.graph_path.to_string_lossy().to_string(),
            node_count: self.index.node_count(),
            edge_count: self.index.edge_count(),
        }
    }

    pub fn summary(&self) -> SummaryResponse {
        let index = self.index.as_ref();
        SummaryResponse {
            node_count: index.node_count(),
            edge_count: index.edge_count(),
            dangling_edges: index.dangling_edge_count(),
            duplicate_nodes: index.duplicate_node_count(),
            nodes_by_kind: index
                .node_kind_counts()
                .into_iter()
                .map(|(kind, count)| KindCount {
                    kind: kind.as_str().to_string(),
                    count,
                })
                .collect(),
            edges_by_type: index
                .edge_kind_counts()
                .into_iter()
                .map(|(kind, count)| KindCount {
                    kind: kind.as_str().to_string(),
                    count,
                })
                .collect(),
        }
    }

    pub fn lookup_node(&self, id: &str) -> Option<NodeDto> {
        self.index.node(id).map(node_dto)
    }

    /// Every reader of a value. Unknown ids are an error at this level, unlike the
    /// domain resolver which treats them as dead.
    pub fn consumers_of(&self, value_id: &str) -> Result<ConsumersResponse> {
        self.require(value_id)?;
        let consumers: Vec<ConsumerDto> = ConsumerResolver::new(&self.index)
            .consumers_of(value_id)
            .iter()
            .map(consumer_dto)
            .collect();
        Ok(ConsumersResponse {
            value_id: value_id.to_string(),
            is_dead: consumers.is_empty(),
            consumers,
        })
    }

    pub fn return_producers_of(&self, method_id: &str) -> Result<ReturnResponse> {
        self.require(method_id)?;
        let returns = ReturnAnalyzer::new(&self.index);
        let producers = returns.return_producers_of(method_id);
        Ok(ReturnResponse {
            method_id: method_id.to_string(),
            return_value: returns.return_value_of(method_id).map(node_dto),
            pattern: classify_producers(&producers),
            producers: producers.into_iter().map(node_dto).collect(),
        })
    }

    /// Total: unknown ids and non-methods are VOID.
    pub fn classify(&self, method_id: &str) -> ReturnPattern {
        PatternClassifier::new(&self.index).classify(method_id)
    }

    pub fn find_cross_method_cases(&self, limit: Option<usize>) -> CasesResponse {
        let report = CrossMethodAnalyzer::new(&self.index).find_cross_method_cases();

        let pattern_summary = report
            .pattern_summary()
            .into_iter()
            .map(|(pattern, callees)| PatternSummaryDto {
                pattern,
                callees: callees.into_iter().map(String::from).collect(),
            })
            .collect();

        CasesResponse {
            total_callees: report.len(),
            total_call_sites: report.total_call_sites(),
            pattern_summary,
            groups: report
                .groups
                .iter()
                .take(limit.unwrap_or(usize::MAX))
                .map(|(key, group)| case_group_dto(key, group))
                .collect(),
        }
    }

    pub fn trace(&self, value_id: &str, cross_calls: bool) -> Result<TraceResponse> {
        let chain = trace_origin(&self.index, value_id, cross_calls);
        let start = chain
            .start
            .ok_or_else(|| anyhow!("Node not found: {value_id}"))?;

        let (terminus, end) = match chain.terminus {
            Terminus::Expression(n) => (TerminusKind::Expression, n),
            Terminus::Root(n) => (TerminusKind::Root, n),
            Terminus::Cycle(n) => (TerminusKind::Cycle, n),
            Terminus::Missing(id) => return Err(anyhow!("Node not found: {id}")),
        };

        Ok(TraceResponse {
            start: node_dto(start),
            hops: chain
                .hops
                .iter()
                .map(|h| HopDto {
                    via: h.via.as_str().to_string(),
                    from: node_dto(h.from),
                    to: node_dto(h.to),
                })
                .collect(),
            terminus,
            end: node_dto(end),
            unresolved: terminus == TerminusKind::Root,
        })
    }

    /// Raw neighbourhood of a node. Dangling edges are listed with an unknown
    /// neighbour kind after the indexed ones.
    pub fn inspect(&self, node_id: &str) -> Option<InspectResponse> {
        let index = self.index.as_ref();
        let node = index.node(node_id)?;

        let edge_dto = |edge: &Edge, neighbour: &str| EdgeDto {
            kind: edge.kind.as_str().to_string(),
            neighbour_id: neighbour.to_string(),
            neighbour_kind: index.node(neighbour).map(|n| n.kind.as_str().to_string()),
            parameter: edge.parameter.clone(),
        };

        let mut incoming: Vec<EdgeDto> = index
            .incoming(node_id)
            .map(|e| edge_dto(e, e.source.as_str()))
            .collect();
        let mut outgoing: Vec<EdgeDto> = index
            .outgoing(node_id)
            .map(|e| edge_dto(e, e.target.as_str()))
            .collect();
        for edge in index.dangling_edges_of(node_id) {
            if edge.source == node_id {
                outgoing.push(edge_dto(edge, edge.target.as_str()));
            } else {
                incoming.push(edge_dto(edge, edge.source.as_str()));
            }
        }

        Some(InspectResponse {
            node: node_dto(node),
            incoming,
            outgoing,
        })
    }

    pub fn void_methods(&self) -> VoidMethodsResponse {
        VoidMethodsResponse {
            methods: CrossMethodAnalyzer::new(&self.index)
                .void_methods_with_callers()
                .into_iter()
                .map(|(method, callers)| VoidMethodDto {
                    method: node_dto(method),
                    callers,
                })
                .collect(),
        }
    }

    pub fn manifest(&self, seed: u64, count: usize, sot_id: &str) -> CaseManifest {
        ManifestSampler::new(seed, count).build(&self.index, sot_id)
    }

    fn require(&self, id: &str) -> Result<&Node> {
        self.index
            .node(id)
            .ok_or_else(|| anyhow!("Node not found: {id}"))
    }
}

pub(crate) fn node_dto(node: &Node) -> NodeDto {
    NodeDto {
        id: node.id.clone(),
        kind: node.kind.as_str().to_string(),
        fqn: node.fqn.clone(),
        name: node.name.clone(),
        file: node.file.clone(),
        line: node.range.as_ref().map(|r| r.start_line),
        value_kind: node.value_kind.map(|vk| vk.as_str().to_string()),
    }
}

fn consumer_dto(consumer: &Consumer<'_>) -> ConsumerDto {
    ConsumerDto {
        via: consumer.role.via.as_str().to_string(),
        role: consumer.role.label().to_string(),
        node: node_dto(consumer.node),
    }
}

fn case_group_dto(key: &str, group: &CaseGroup<'_>) -> CaseGroupDto {
    CaseGroupDto {
        callee_key: key.to_string(),
        callee: node_dto(group.callee),
        pattern: group.pattern,
        return_value: node_dto(group.return_value),
        return_producers: group.return_producers.iter().copied().map(node_dto).collect(),
        call_sites: group
            .call_sites
            .iter()
            .map(|site| CallSiteDto {
                local: node_dto(site.local),
                result: node_dto(site.result),
                call: node_dto(site.call),
                consumers: site.consumers.iter().map(consumer_dto).collect(),
            })
            .collect(),
    }
}
