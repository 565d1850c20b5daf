use crate::domain::classifier::ReturnPattern;
use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    pub graph_path: String,
    pub node_count: usize,
    pub edge_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SummaryResponse {
    pub node_count: usize,
    pub edge_count: usize,
    pub dangling_edges: usize,
    pub duplicate_nodes: usize,
    /// In order of first appearance
    pub nodes_by_kind: Vec<KindCount>,
    /// In order of first appearance
    pub edges_by_type: Vec<KindCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KindCount {
    pub kind: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeDto {
    pub id: String,
    pub kind: String,
    pub fqn: Option<String>,
    pub name: Option<String>,
    pub file: Option<String>,
    /// 1-based start line, when the node carries a range
    pub line: Option<u32>,
    pub value_kind: Option<String>,
}

/// Request carrying a single node id (`?id=` on HTTP, tool params on MCP)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NodeRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConsumerDto {
    /// Edge type the consumption was found through
    pub via: String,
    /// Parameter name/position, else the edge type
    pub role: String,
    pub node: NodeDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConsumersResponse {
    pub value_id: String,
    pub consumers: Vec<ConsumerDto>,
    pub is_dead: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReturnResponse {
    pub method_id: String,
    pub return_value: Option<NodeDto>,
    pub producers: Vec<NodeDto>,
    pub pattern: ReturnPattern,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CasesRequest {
    /// Maximum number of callee groups to return
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CasesResponse {
    pub total_callees: usize,
    pub total_call_sites: usize,
    /// Every pattern is listed, even with no callees
    pub pattern_summary: Vec<PatternSummaryDto>,
    pub groups: Vec<CaseGroupDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PatternSummaryDto {
    pub pattern: ReturnPattern,
    pub callees: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CaseGroupDto {
    /// Callee fqn, or its id when the fqn is absent
    pub callee_key: String,
    pub callee: NodeDto,
    pub pattern: ReturnPattern,
    pub return_value: NodeDto,
    pub return_producers: Vec<NodeDto>,
    pub call_sites: Vec<CallSiteDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CallSiteDto {
    pub local: NodeDto,
    pub result: NodeDto,
    pub call: NodeDto,
    pub consumers: Vec<ConsumerDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TraceRequest {
    pub id: String,
    /// Follow calls into the callee's return slot (default true)
    #[serde(default = "default_true")]
    pub cross_calls: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HopDto {
    pub via: String,
    pub from: NodeDto,
    pub to: NodeDto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TerminusKind {
    Expression,
    Root,
    Cycle,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TraceResponse {
    pub start: NodeDto,
    pub hops: Vec<HopDto>,
    pub terminus: TerminusKind,
    pub end: NodeDto,
    pub unresolved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EdgeDto {
    #[serde(rename = "type")]
    pub kind: String,
    /// The node on the other end of the edge
    pub neighbour_id: String,
    /// `None` when the neighbour is not in the graph
    pub neighbour_kind: Option<String>,
    pub parameter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InspectResponse {
    pub node: NodeDto,
    pub incoming: Vec<EdgeDto>,
    pub outgoing: Vec<EdgeDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VoidMethodDto {
    pub method: NodeDto,
    pub callers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VoidMethodsResponse {
    pub methods: Vec<VoidMethodDto>,
}
