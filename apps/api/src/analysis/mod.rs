//! Resume analysis pipeline: payload building, the single Gemini call, and
//! response normalization.

pub mod handlers;
pub mod payload;
pub mod prompts;
pub mod result;

use tracing::info;

use crate::errors::AppError;
use crate::history::store::HistoryStore;
use crate::llm_client::{GeminiClient, Part};

use self::payload::AnalysisRequest;
use self::result::{normalize, parse_raw, response_schema, AnalysisResult};

/// Runs one analysis call and normalizes the response into a record.
///
/// Transport failures, API errors, and empty responses all collapse into
/// `AppError::Analysis`; the distinct cause survives only in logs.
pub async fn analyze(
    llm: &GeminiClient,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AppError> {
    let parts = vec![
        Part::inline_data(
            request.resume_mime_type.clone(),
            request.resume_base64.clone(),
        ),
        Part::text(prompts::instruction_for(
            request.mode,
            request.job_description.as_deref(),
        )),
    ];

    let schema = response_schema();
    let text = llm
        .generate(parts, &schema)
        .await
        .map_err(|e| AppError::Analysis(format!("analysis call failed: {e}")))?;

    Ok(normalize(parse_raw(&text), request))
}

/// Analyze-then-record: the only path that mutates history.
/// A failed call persists nothing.
pub async fn analyze_and_record(
    llm: &GeminiClient,
    history: &HistoryStore,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AppError> {
    let result = analyze(llm, request).await?;

    history
        .add(result.clone())
        .map_err(|e| AppError::Storage(format!("failed to persist analysis record: {e}")))?;

    info!("analysis recorded: id={}, mode={:?}", result.id, result.mode);
    Ok(result)
}
