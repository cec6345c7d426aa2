//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::analysis::result::AnalysisResult;
use crate::analysis::{analyze_and_record, payload};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequestBody {
    pub resume_base64: String,
    pub resume_mime_type: Option<String>,
    #[serde(default)]
    pub job_description: String,
}

/// POST /api/v1/analyses
///
/// JSON path: the client has already read and base64-encoded the PDF.
/// A `data:` URL prefix is tolerated and stripped.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequestBody>,
) -> Result<(StatusCode, Json<AnalysisResult>), AppError> {
    let request = payload::build_from_base64(
        &body.resume_base64,
        body.resume_mime_type.as_deref(),
        &body.job_description,
    )?;

    let result = analyze_and_record(&state.llm, &state.history, &request).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// POST /api/v1/analyses/upload
///
/// Multipart path: a `resume` file part plus an optional `job_description`
/// text part. The server does the base64 step.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<AnalysisResult>), AppError> {
    let mut resume_bytes: Option<Vec<u8>> = None;
    let mut content_type: Option<String> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        // Copy the name out before consuming the field
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("resume") => {
                content_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("failed to read resume part: {e}"))
                })?;
                resume_bytes = Some(bytes.to_vec());
            }
            Some("job_description") => {
                job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("failed to read job description: {e}"))
                })?;
            }
            // Unknown parts are ignored
            _ => {}
        }
    }

    let bytes = resume_bytes.unwrap_or_default();
    let request = payload::build_from_bytes(&bytes, content_type.as_deref(), &job_description)?;

    let result = analyze_and_record(&state.llm, &state.history, &request).await?;
    Ok((StatusCode::CREATED, Json(result)))
}
