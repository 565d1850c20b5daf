use crate::app::dto::*;
use crate::app::engine::AnalysisEngine;
use rmcp::{
    Json, ServerHandler, ServiceExt, handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters, model::*, tool, tool_handler, tool_router,
    transport::stdio,
};
use tokio::task::spawn_blocking;

#[derive(Clone)]
pub struct RbMcpServer {
    engine: AnalysisEngine,
    tool_router: ToolRouter<Self>,
}

impl RbMcpServer {
    pub fn new(engine: AnalysisEngine) -> Self {
        Self {
            engine,
            tool_router: Self::tool_router(),
        }
    }

    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        let service = self.serve(stdio()).await?;
        service.waiting().await?;
        Ok(())
    }
}

#[tool_router]
impl RbMcpServer {
    #[tool(description = "Look up a graph node by id.")]
    async fn lookup_node(&self, params: Parameters<NodeRequest>) -> Result<Json<NodeDto>, String> {
        let id = params.0.id;
        self.engine
            .lookup_node(&id)
            .map(Json)
            .ok_or_else(|| format!("Node not found: {id}"))
    }

    #[tool(description = "List every reader of a value (receiver, argument and used_by edges).")]
    async fn consumers_of(
        &self,
        params: Parameters<NodeRequest>,
    ) -> Result<Json<ConsumersResponse>, String> {
        let engine = self.engine.clone();
        let id = params.0.id;
        spawn_blocking(move || engine.consumers_of(&id))
            .await
            .map_err(|e| format!("task join error: {e}"))?
            .map(Json)
            .map_err(|e| e.to_string())
    }

    #[tool(
        description = "Show a method's return slot, the expressions producing it and its return pattern (INLINE, LOCAL, MIXED, VOID)."
    )]
    async fn return_producers_of(
        &self,
        params: Parameters<NodeRequest>,
    ) -> Result<Json<ReturnResponse>, String> {
        let engine = self.engine.clone();
        let id = params.0.id;
        spawn_blocking(move || engine.return_producers_of(&id))
            .await
            .map_err(|e| format!("task join error: {e}"))?
            .map(Json)
            .map_err(|e| e.to_string())
    }

    #[tool(
        description = "Find locals assigned from a call result and read afterwards, grouped by callee."
    )]
    async fn find_cross_method_cases(
        &self,
        params: Parameters<CasesRequest>,
    ) -> Result<Json<CasesResponse>, String> {
        let engine = self.engine.clone();
        let limit = params.0.limit;
        spawn_blocking(move || engine.find_cross_method_cases(limit))
            .await
            .map(Json)
            .map_err(|e| format!("task join error: {e}"))
    }

    #[tool(description = "Walk a value back to the origin of its content, optionally across calls.")]
    async fn trace_value(
        &self,
        params: Parameters<TraceRequest>,
    ) -> Result<Json<TraceResponse>, String> {
        let engine = self.engine.clone();
        let req = params.0;
        spawn_blocking(move || engine.trace(&req.id, req.cross_calls))
            .await
            .map_err(|e| format!("task join error: {e}"))?
            .map(Json)
            .map_err(|e| e.to_string())
    }
}

#[tool_handler]
impl ServerHandler for RbMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Trace value provenance, consumers and method return boundaries in a code-property graph."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
