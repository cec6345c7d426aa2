//! Axum route handlers for the History API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::analysis::result::AnalysisResult;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/history
///
/// Returns every stored record, most recent first.
pub async fn handle_list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnalysisResult>>, AppError> {
    let records = state
        .history
        .list()
        .map_err(|e| AppError::Storage(format!("failed to load history: {e}")))?;
    Ok(Json(records))
}

/// DELETE /api/v1/history/:id
///
/// Idempotent: deleting an unknown id still returns 204.
pub async fn handle_delete_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .history
        .remove(&id)
        .map_err(|e| AppError::Storage(format!("failed to delete history record: {e}")))?;
    Ok(StatusCode::NO_CONTENT)
}
