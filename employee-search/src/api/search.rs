//! `GET /search-employees?term=...`

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use shared::error::{AppError, AppResult};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub term: Option<String>,
}

/// Matching employees as a JSON array; `[]` for an absent or empty term.
pub async fn search_employees(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<Response> {
    // e.g. `?term=a&term=b`
    let Query(params) = params.map_err(|e| AppError::validation(e.body_text()))?;

    let results = state
        .search
        .search(params.term.as_deref())
        .await
        .map_err(|e| e.into_app_error(state.expose_errors))?;

    Ok(Json(results.as_slice()).into_response())
}
