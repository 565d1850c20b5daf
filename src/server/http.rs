use crate::app::engine::AnalysisEngine;
use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::spawn_blocking;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct HttpState {
    pub engine: AnalysisEngine,
}

#[derive(Debug, Clone, Deserialize)]
struct IdQuery {
    id: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TraceQuery {
    id: String,
    #[serde(default = "default_cross_calls")]
    cross_calls: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct CasesQuery {
    limit: Option<usize>,
}

fn default_cross_calls() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
struct ApiErrorBody {
    error: String,
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ApiErrorBody { error: msg.into() })).into_response()
}

/// Run a query on the blocking pool. `Err` from the query maps to 404: every fallible
/// engine query only fails on an unknown id.
async fn run_query<T, F>(engine: AnalysisEngine, query: F) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce(AnalysisEngine) -> Result<T> + Send + 'static,
{
    match spawn_blocking(move || query(engine)).await {
        Ok(Ok(res)) => Json(res).into_response(),
        Ok(Err(e)) => api_error(StatusCode::NOT_FOUND, e.to_string()),
        Err(e) => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("task join error: {e}"),
        ),
    }
}

pub fn build_router(engine: AnalysisEngine) -> Router {
    let state = Arc::new(HttpState { engine });

    Router::new()
        .route("/health", get(health))
        .route("/summary", get(summary))
        .route("/node", get(node))
        .route("/consumers", get(consumers))
        .route("/returns", get(returns))
        .route("/cases", get(cases))
        .route("/trace", get(trace))
        .route("/void-methods", get(void_methods))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(engine: AnalysisEngine, addr: SocketAddr) -> Result<()> {
    let app = build_router(engine);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(state.engine.health())
}

async fn summary(State(state): State<Arc<HttpState>>) -> Response {
    run_query(state.engine.clone(), |engine| Ok(engine.summary())).await
}

async fn node(State(state): State<Arc<HttpState>>, Query(q): Query<IdQuery>) -> Response {
    match state.engine.lookup_node(&q.id) {
        Some(node) => Json(node).into_response(),
        None => api_error(StatusCode::NOT_FOUND, format!("Node not found: {}", q.id)),
    }
}

async fn consumers(State(state): State<Arc<HttpState>>, Query(q): Query<IdQuery>) -> Response {
    run_query(state.engine.clone(), move |engine| engine.consumers_of(&q.id)).await
}

async fn returns(State(state): State<Arc<HttpState>>, Query(q): Query<IdQuery>) -> Response {
    run_query(state.engine.clone(), move |engine| {
        engine.return_producers_of(&q.id)
    })
    .await
}

async fn cases(State(state): State<Arc<HttpState>>, Query(q): Query<CasesQuery>) -> Response {
    run_query(state.engine.clone(), move |engine| {
        Ok(engine.find_cross_method_cases(q.limit))
    })
    .await
}

async fn trace(State(state): State<Arc<HttpState>>, Query(q): Query<TraceQuery>) -> Response {
    run_query(state.engine.clone(), move |engine| {
        engine.trace(&q.id, q.cross_calls)
    })
    .await
}

async fn void_methods(State(state): State<Arc<HttpState>>) -> Response {
    run_query(state.engine.clone(), |engine| Ok(engine.void_methods())).await
}
