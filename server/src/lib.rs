use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use search_core::input::{load_into, InputDoc};
use search_core::{DocId, DocumentStatus, RequestQueue, ScoredDocument, SearchConfig, SearchError, SearchIndex};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

type ApiResult<T> = Result<T, (StatusCode, String)>;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<ScoredDocument>,
}

#[derive(Deserialize)]
pub struct MatchParams {
    pub q: String,
    pub id: DocId,
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub document_id: DocId,
    pub terms: Vec<String>,
    pub status: DocumentStatus,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub no_result_requests: usize,
    pub window_len: usize,
    pub window_capacity: usize,
}

/// The index and the request window. Both sit behind one lock so that
/// ingestion never interleaves with a query.
pub struct Engine {
    pub index: SearchIndex,
    pub requests: RequestQueue,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Mutex<Engine>>,
    pub admin_token: Option<String>,
}

/// Builds an index from the stop-word line and, if given, an input file or
/// directory of documents.
pub fn load_index(input: Option<&str>, stop_words: &str, top_k: usize) -> Result<SearchIndex> {
    let config = SearchConfig::default().with_max_results(top_k);
    let mut index = SearchIndex::with_config(stop_words.split(' '), config).context("invalid stop words")?;
    if let Some(input) = input {
        load_into(&mut index, std::path::Path::new(input))?;
    }
    Ok(index)
}

pub fn build_app(index: SearchIndex) -> Router {
    build_app_with_token(index, std::env::var("ADMIN_TOKEN").ok())
}

pub fn build_app_with_token(index: SearchIndex, admin_token: Option<String>) -> Router {
    let engine = Engine { index, requests: RequestQueue::new() };
    let app_state = AppState { engine: Arc::new(Mutex::new(engine)), admin_token };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/match", get(match_handler))
        .route("/documents", post(add_document_handler))
        .route("/documents/count", get(count_handler))
        .route("/documents/at/:position", get(document_at_handler))
        .route("/stats", get(stats_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<SearchResponse>> {
    let start = std::time::Instant::now();
    let status = match params.status.as_deref() {
        Some(s) => s.parse().map_err(|e: String| (StatusCode::BAD_REQUEST, e))?,
        None => DocumentStatus::Actual,
    };
    let results = {
        let mut engine = state.engine.lock();
        let Engine { index, requests } = &mut *engine;
        requests.add_find_request_by_status(index, &params.q, status).map_err(reject)?
    };
    let elapsed = start.elapsed();
    Ok(Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits: results.len(), results }))
}

pub async fn match_handler(
    State(state): State<AppState>,
    Query(params): Query<MatchParams>,
) -> ApiResult<Json<MatchResponse>> {
    let (terms, status) = state.engine.lock().index.match_document(&params.q, params.id).map_err(reject)?;
    Ok(Json(MatchResponse { document_id: params.id, terms, status }))
}

pub async fn count_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let count = state.engine.lock().index.document_count();
    Json(serde_json::json!({ "count": count }))
}

pub async fn document_at_handler(
    State(state): State<AppState>,
    Path(position): Path<usize>,
) -> ApiResult<Json<serde_json::Value>> {
    let id = state.engine.lock().index.document_id(position).map_err(reject)?;
    Ok(Json(serde_json::json!({ "position": position, "document_id": id })))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let engine = state.engine.lock();
    Json(StatsResponse {
        no_result_requests: engine.requests.no_result_requests(),
        window_len: engine.requests.len(),
        window_capacity: engine.requests.capacity(),
    })
}

async fn add_document_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(doc): Json<InputDoc>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    authorize(&state, &headers)?;
    let mut engine = state.engine.lock();
    engine.index.add_document(doc.id, &doc.text, doc.status, &doc.ratings).map_err(reject)?;
    let count = engine.index.document_count();
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "document_id": doc.id, "count": count }))))
}

fn reject(err: SearchError) -> (StatusCode, String) {
    let code = match err {
        SearchError::DuplicateId(_) => StatusCode::CONFLICT,
        SearchError::OutOfRange { .. } | SearchError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
        SearchError::UnknownTerm(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    (code, err.to_string())
}

fn authorize(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
