//! Normalized analysis records, the declared response schema, and the
//! defaulting pass that turns the model's untrusted shape into a trusted one.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use crate::analysis::payload::{AnalysisRequest, Mode};

pub const FALLBACK_SUMMARY: &str = "No match summary generated.";
pub const FALLBACK_PROFILE: &str = "No candidate profile generated.";

/// How much of the job description is echoed back in `raw_input`.
const RAW_INPUT_JD_PREFIX_CHARS: usize = 50;

/// A statistic value. The schema asks for strings, but the model sometimes
/// returns numbers; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

/// One extracted statistic, e.g. years of experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub label: String,
    pub value: StatValue,
}

/// One chart data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub name: String,
    pub value: f64,
}

/// A persisted analysis record. Immutable once created; deleted as a whole
/// unit. Serialized in camelCase, matching the stored history document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: String,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
    pub mode: Mode,
    pub summary: String,
    pub candidate_profile: String,
    /// 0-100; typically present only in `job_match` mode, but not enforced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Vec<StatEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends: Option<Vec<TrendPoint>>,
    /// Never absent: an empty vec is substituted when the model omits it.
    pub suggestions: Vec<String>,
    /// Human-readable echo of what was submitted.
    pub raw_input: String,
}

/// The untrusted shape returned by the model. Every field is optional;
/// `normalize` applies the exhaustive defaulting pass.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysis {
    pub summary: Option<String>,
    pub candidate_profile: Option<String>,
    pub score: Option<f64>,
    pub stats: Option<Vec<StatEntry>>,
    pub trends: Option<Vec<TrendPoint>>,
    pub suggestions: Option<Vec<String>>,
}

/// The structured-output schema declared on every analysis call.
/// The service is expected, not guaranteed, to honor this shape.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "candidateProfile": { "type": "STRING" },
            "score": { "type": "NUMBER" },
            "stats": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": { "type": "STRING" },
                        "value": { "type": "STRING" }
                    },
                    "required": ["label", "value"]
                }
            },
            "trends": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "value": { "type": "NUMBER" }
                    },
                    "required": ["name", "value"]
                }
            },
            "suggestions": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["summary", "candidateProfile", "suggestions"]
    })
}

/// Parses the model's response text. A response that is not a JSON object is
/// treated as one with every field absent.
pub fn parse_raw(text: &str) -> RawAnalysis {
    match serde_json::from_str(text) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("analysis response was not the expected JSON shape, defaulting all fields: {e}");
            RawAnalysis::default()
        }
    }
}

/// Produces the trusted record shape from an untrusted partial one.
pub fn normalize(raw: RawAnalysis, request: &AnalysisRequest) -> AnalysisResult {
    AnalysisResult {
        id: Uuid::new_v4().to_string(),
        timestamp: Utc::now().timestamp_millis(),
        mode: request.mode,
        summary: non_blank(raw.summary, FALLBACK_SUMMARY),
        candidate_profile: non_blank(raw.candidate_profile, FALLBACK_PROFILE),
        score: raw.score.map(|s| s.round().clamp(0.0, 100.0) as u8),
        stats: raw.stats,
        trends: raw.trends,
        suggestions: raw.suggestions.unwrap_or_default(),
        raw_input: raw_input_echo(request.job_description.as_deref()),
    }
}

fn non_blank(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => fallback.to_string(),
    }
}

fn raw_input_echo(job_description: Option<&str>) -> String {
    match job_description {
        Some(jd) => {
            let prefix: String = jd.chars().take(RAW_INPUT_JD_PREFIX_CHARS).collect();
            format!("PDF Resume | {prefix}...")
        }
        None => "PDF Resume".to_string(),
    }
}
