use std::sync::Arc;

use crate::config::Config;
use crate::history::store::HistoryStore;
use crate::llm_client::GeminiClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: GeminiClient,
    /// Ordered history of analysis records, whole-document persisted.
    pub history: Arc<HistoryStore>,
    pub config: Config,
}
