//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::state::AppState;
use crate::encoding::Encoding;
use crate::error::TokCalcError;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_body_size = state.config.max_body_size;
    let cors_enabled = state.config.cors_enabled;
    let logging = state.config.logging;

    let mut router = Router::new()
        // Health and status
        .route("/health", get(health_check))
        .route("/status", get(status))
        // Lookups
        .route("/models", get(list_models))
        .route("/encoding", post(resolve_encoding))
        // Counting
        .route("/count", post(count_tokens))
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(state);

    if cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    if logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

/// Map a counting error onto an HTTP response
fn error_response(err: &TokCalcError) -> Response {
    let status = match err {
        TokCalcError::UnresolvedModel { .. } => StatusCode::NOT_FOUND,
        TokCalcError::EncodingFailure(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TokCalcError::UnknownEncoding(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(serde_json::json!({"error": err.to_string()}))).into_response()
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Status response
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
    pub known_models: usize,
    pub default_model: String,
    pub encodings: Vec<&'static str>,
}

/// Status endpoint
async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.uptime().as_secs(),
        known_models: state.catalog.known().len(),
        default_model: state.config.default_model.clone(),
        encodings: Encoding::ALL.iter().map(|e| e.name()).collect(),
    })
}

/// Model listing filter
#[derive(Deserialize)]
pub struct ModelsQuery {
    #[serde(default)]
    pub encoding: Option<String>,
}

/// List known models, optionally for one encoding
async fn list_models(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ModelsQuery>,
) -> Response {
    match query.encoding {
        None => Json(state.catalog.known()).into_response(),
        Some(name) => match name.parse::<Encoding>() {
            Ok(encoding) => Json(state.catalog.by_encoding(encoding)).into_response(),
            Err(e) => error_response(&e),
        },
    }
}

/// Encoding lookup request
#[derive(Deserialize)]
pub struct EncodingRequest {
    pub model: String,
}

/// Encoding lookup response
#[derive(Serialize)]
pub struct EncodingResponse {
    pub model: String,
    pub encoding: Encoding,
}

/// Resolve a model to its encoding
async fn resolve_encoding(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EncodingRequest>,
) -> Response {
    match state.counter.resolve_encoding(&req.model) {
        Ok(encoding) => Json(EncodingResponse {
            model: req.model,
            encoding,
        })
        .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Count request
#[derive(Deserialize)]
pub struct CountRequest {
    pub text: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub preview_tokens: Option<usize>,
}

/// Count tokens in the request text
async fn count_tokens(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CountRequest>,
) -> Response {
    let model = req
        .model
        .unwrap_or_else(|| state.config.default_model.clone());
    let preview = req.preview_tokens.unwrap_or(state.config.preview_tokens);

    // BPE merging is CPU-bound and superlinear on long unbroken runs
    let worker_state = Arc::clone(&state);
    let worker_model = model.clone();
    let result = tokio::task::spawn_blocking(move || {
        worker_state
            .counter
            .report(&worker_model, &req.text, preview)
    })
    .await;

    match result {
        Ok(Ok(report)) => (StatusCode::OK, Json(report)).into_response(),
        Ok(Err(e)) => {
            tracing::debug!(model = %model, error = %e, "count request failed");
            error_response(&e)
        },
        Err(e) => {
            tracing::error!(model = %model, error = %e, "count task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "count task failed"})),
            )
                .into_response()
        },
    }
}
