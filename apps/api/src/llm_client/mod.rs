/// Gemini client, the single point of entry for all Gemini API calls in Check-U.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions MUST go through this module.
///
/// Model: gemini-3-flash-preview (hardcoded, do not make configurable to prevent drift)
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// The model used for all analysis calls in Check-U.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned empty content")]
    EmptyContent,
}

/// One part of a multi-part content block: either inline binary data or text.
/// Exactly one of the two fields is set.
#[derive(Debug, Serialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

/// Inline binary attachment, base64-encoded and tagged with its media type.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Extracts the text of the first text part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single Gemini client used by all services in Check-U.
/// Wraps the `generateContent` endpoint with structured-output support.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GEMINI_API_BASE.to_string())
    }

    /// Points the client at an alternate endpoint. Used by tests to target a
    /// mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Makes a single `generateContent` call with a declared JSON response
    /// schema and returns the response text. One outbound call per
    /// invocation: no retry, and timeouts are left to the transport defaults.
    pub async fn generate(
        &self,
        parts: Vec<Part>,
        response_schema: &Value,
    ) -> Result<String, GeminiError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema,
            },
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, MODEL);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the API's error envelope
            let message = serde_json::from_str::<GeminiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response: GenerateContentResponse = response.json().await.map_err(GeminiError::Http)?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={:?}, candidate_tokens={:?}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        response
            .text()
            .map(str::to_owned)
            .ok_or(GeminiError::EmptyContent)
    }
}
