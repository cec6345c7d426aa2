//! End-to-end analysis pipeline tests against a mock Gemini endpoint.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use checku_api::analysis::payload::{self, Mode};
use checku_api::analysis::result::{FALLBACK_PROFILE, FALLBACK_SUMMARY};
use checku_api::analysis::{analyze_and_record, payload::AnalysisRequest};
use checku_api::errors::AppError;
use checku_api::history::store::{HistoryStore, InMemoryBackend};
use checku_api::llm_client::{GeminiClient, MODEL};

const PDF_BYTES: &[u8] = b"%PDF-1.4 minimal fixture";

fn mock_client(server: &MockServer) -> GeminiClient {
    GeminiClient::with_base_url("test-key".to_string(), server.uri())
}

fn in_memory_history() -> HistoryStore {
    HistoryStore::new(Arc::new(InMemoryBackend::default()))
}

fn plain_request() -> AnalysisRequest {
    payload::build_from_bytes(PDF_BYTES, Some("application/pdf"), "").unwrap()
}

fn job_match_request(jd: &str) -> AnalysisRequest {
    payload::build_from_bytes(PDF_BYTES, Some("application/pdf"), jd).unwrap()
}

/// Wraps an analysis JSON object in the Gemini response envelope.
fn gemini_response(analysis: serde_json::Value) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": analysis.to_string() }]
            }
        }],
        "usageMetadata": { "promptTokenCount": 100, "candidatesTokenCount": 50 }
    })
}

fn generate_path() -> String {
    format!("/models/{MODEL}:generateContent")
}

#[tokio::test]
async fn plain_analysis_records_normalized_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gemini_response(json!({
                "candidateProfile": "X",
                "summary": "Y",
                "suggestions": ["A", "B"]
            }))),
        )
        .mount(&server)
        .await;

    let history = in_memory_history();
    let result = analyze_and_record(&mock_client(&server), &history, &plain_request())
        .await
        .unwrap();

    assert_eq!(result.mode, Mode::Plain);
    assert_eq!(result.summary, "Y");
    assert_eq!(result.candidate_profile, "X");
    assert_eq!(result.score, None);
    assert_eq!(result.suggestions, ["A", "B"]);
    assert_eq!(result.raw_input, "PDF Resume");
    assert!(!result.id.is_empty());
    assert!(result.timestamp > 0);

    let stored = history.list().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, result.id);
}

#[tokio::test]
async fn job_match_analysis_carries_score_and_trends() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        // The declared schema must ride along with every call
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gemini_response(json!({
                "score": 72,
                "summary": "Strong alignment.",
                "candidateProfile": "Seasoned engineer.",
                "trends": [{"name": "Skills", "value": 5}],
                "suggestions": []
            }))),
        )
        .mount(&server)
        .await;

    let history = in_memory_history();
    let result = analyze_and_record(
        &mock_client(&server),
        &history,
        &job_match_request("Senior Engineer"),
    )
    .await
    .unwrap();

    assert_eq!(result.mode, Mode::JobMatch);
    assert_eq!(result.score, Some(72));
    let trends = result.trends.as_ref().unwrap();
    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0].name, "Skills");
    assert!(result.suggestions.is_empty());
    assert_eq!(result.raw_input, "PDF Resume | Senior Engineer...");
}

#[tokio::test]
async fn server_error_collapses_to_analysis_failure_and_persists_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let history = in_memory_history();
    let err = analyze_and_record(&mock_client(&server), &history, &plain_request())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Analysis(_)));
    assert!(history.list().unwrap().is_empty());
}

#[tokio::test]
async fn network_error_collapses_to_analysis_failure() {
    // Nothing listens here; the connection fails outright.
    let llm = GeminiClient::with_base_url("test-key".to_string(), "http://127.0.0.1:9".to_string());
    let history = in_memory_history();

    let err = analyze_and_record(&llm, &history, &plain_request())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Analysis(_)));
    assert!(history.list().unwrap().is_empty());
}

#[tokio::test]
async fn non_json_model_text_falls_back_to_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Sorry, I cannot help with that." }] }
            }]
        })))
        .mount(&server)
        .await;

    let history = in_memory_history();
    let result = analyze_and_record(&mock_client(&server), &history, &plain_request())
        .await
        .unwrap();

    assert_eq!(result.summary, FALLBACK_SUMMARY);
    assert_eq!(result.candidate_profile, FALLBACK_PROFILE);
    assert!(result.suggestions.is_empty());
    // A defaulted record is still a completed analysis and is persisted
    assert_eq!(history.list().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_candidate_list_is_an_analysis_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let history = in_memory_history();
    let err = analyze_and_record(&mock_client(&server), &history, &plain_request())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Analysis(_)));
    assert!(history.list().unwrap().is_empty());
}

#[tokio::test]
async fn successive_analyses_stack_most_recent_first() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gemini_response(json!({
                "summary": "S",
                "candidateProfile": "P",
                "suggestions": []
            }))),
        )
        .mount(&server)
        .await;

    let llm = mock_client(&server);
    let history = in_memory_history();

    let first = analyze_and_record(&llm, &history, &plain_request())
        .await
        .unwrap();
    let second = analyze_and_record(&llm, &history, &job_match_request("SRE role"))
        .await
        .unwrap();

    let stored = history.list().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].id, second.id);
    assert_eq!(stored[1].id, first.id);
}
