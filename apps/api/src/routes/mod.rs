pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::history::handlers as history_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyses", post(analysis_handlers::handle_analyze))
        .route(
            "/api/v1/analyses/upload",
            post(analysis_handlers::handle_analyze_upload),
        )
        // History API
        .route("/api/v1/history", get(history_handlers::handle_list_history))
        .route(
            "/api/v1/history/:id",
            delete(history_handlers::handle_delete_history),
        )
        .with_state(state)
}
