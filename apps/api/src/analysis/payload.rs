//! Payload builder: turns an uploaded resume and optional job description
//! into an `AnalysisRequest`, or fails before any network call is made.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The only media type the analyzer accepts.
pub const PDF_MIME_TYPE: &str = "application/pdf";

const MISSING_RESUME_MESSAGE: &str = "Please upload your resume in PDF format first.";
const WRONG_TYPE_MESSAGE: &str = "Please upload a PDF file only.";

/// Which instruction/schema variant governs an analysis request.
/// `JobMatch` iff a non-empty job description was supplied. This is the sole
/// branching signal consumed downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Plain,
    JobMatch,
}

/// A fully built analysis request. Ephemeral, constructed per user action.
///
/// No maximum-size enforcement here: an oversized payload fails at the
/// transport layer and surfaces as the generic analysis failure.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Standard base64, no data-URL header.
    pub resume_base64: String,
    pub resume_mime_type: String,
    /// Trimmed; `None` when the submitted text was empty or whitespace.
    pub job_description: Option<String>,
    pub mode: Mode,
}

/// Builds a request from raw PDF bytes (the multipart upload path).
pub fn build_from_bytes(
    bytes: &[u8],
    content_type: Option<&str>,
    job_description: &str,
) -> Result<AnalysisRequest, AppError> {
    check_mime(content_type)?;
    if bytes.is_empty() {
        return Err(AppError::Validation(MISSING_RESUME_MESSAGE.to_string()));
    }
    Ok(assemble(BASE64.encode(bytes), job_description))
}

/// Builds a request from pre-encoded content (the JSON body path).
/// Accepts a bare base64 string or a full `data:` URL; the header is stripped.
pub fn build_from_base64(
    resume_base64: &str,
    resume_mime_type: Option<&str>,
    job_description: &str,
) -> Result<AnalysisRequest, AppError> {
    check_mime(resume_mime_type)?;
    let data = strip_data_url_prefix(resume_base64).trim();
    if data.is_empty() {
        return Err(AppError::Validation(MISSING_RESUME_MESSAGE.to_string()));
    }
    Ok(assemble(data.to_string(), job_description))
}

/// An absent media type is treated as PDF (the payload is declared as PDF on
/// the wire either way); anything else must be `application/pdf`.
fn check_mime(content_type: Option<&str>) -> Result<(), AppError> {
    let Some(content_type) = content_type else {
        return Ok(());
    };
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    if essence.eq_ignore_ascii_case(PDF_MIME_TYPE) {
        Ok(())
    } else {
        Err(AppError::Validation(WRONG_TYPE_MESSAGE.to_string()))
    }
}

fn assemble(resume_base64: String, job_description: &str) -> AnalysisRequest {
    let trimmed = job_description.trim();
    let (mode, job_description) = if trimmed.is_empty() {
        (Mode::Plain, None)
    } else {
        (Mode::JobMatch, Some(trimmed.to_string()))
    };

    AnalysisRequest {
        resume_base64,
        resume_mime_type: PDF_MIME_TYPE.to_string(),
        job_description,
        mode,
    }
}

/// Strips a `data:<mime>;base64,` header from a data URL, leaving the payload.
/// Input without such a header passes through unchanged.
fn strip_data_url_prefix(input: &str) -> &str {
    if input.starts_with("data:") {
        input.split_once(',').map(|(_, rest)| rest).unwrap_or(input)
    } else {
        input
    }
}
