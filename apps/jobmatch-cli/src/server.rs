use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use jobmatch_core::corpus::{read_resume, resolve_resume};
use jobmatch_core::error::Error;
use jobmatch_core::traits::JobIndex;
use jobmatch_core::types::SearchResult;

use crate::check_top_k;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<dyn JobIndex>,
    pub resumes_dir: PathBuf,
    pub default_top_k: usize,
    pub max_top_k: usize,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub resume_id: Option<String>,
    #[serde(default)]
    pub top_k: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub documents: usize,
}

type ApiError = (StatusCode, Json<ErrorBody>);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/search", post(search))
        .with_state(state)
}

async fn healthz(State(state): State<AppState>) -> Json<Health> {
    Json(Health { status: "ok".to_string(), documents: state.index.len() })
}

async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let top_k = match request.top_k {
        None => state.default_top_k,
        // Negative values fail the range check as 0.
        Some(k) => check_top_k(usize::try_from(k).unwrap_or(0), state.max_top_k).map_err(error_response)?,
    };

    let text = match (request.text, request.resume_id) {
        (Some(text), None) => text,
        (None, Some(resume_id)) => {
            let path = resolve_resume(&state.resumes_dir, &resume_id).map_err(error_response)?;
            read_resume(&path).map_err(error_response)?
        }
        (None, None) => {
            return Err(error_response(Error::BadRequest(
                "Provide either text or resume_id".into(),
            )))
        }
        (Some(_), Some(_)) => {
            return Err(error_response(Error::BadRequest(
                "Provide only one of text or resume_id".into(),
            )))
        }
    };

    let results = state.index.query(&text, top_k).map_err(error_response)?;
    tracing::debug!(top_k, results = results.len(), "search served");
    Ok(Json(SearchResponse { results }))
}

/// Map a domain error to its HTTP status and `{"detail": ...}` body.
pub fn error_response(err: Error) -> ApiError {
    let status = match &err {
        Error::BadRequest(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "search failed");
    } else {
        tracing::info!(status = status.as_u16(), error = %err, "search rejected");
    }
    let detail = match err {
        Error::BadRequest(msg) | Error::NotFound(msg) => msg,
        other => other.to_string(),
    };
    (status, Json(ErrorBody { detail }))
}
