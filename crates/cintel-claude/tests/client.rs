//! Integration tests for `ClaudeClient` using wiremock HTTP mocks.

use cintel_claude::{ClaudeClient, ClaudeError};
use cintel_core::{Analysis, AnalysisMode, Comment};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ClaudeClient {
    ClaudeClient::with_base_url("test-key", "claude-3-haiku-20240307", 2000, 30, base_url)
        .expect("client construction should not fail")
}

fn comment(text: &str) -> Comment {
    Comment {
        text: text.to_string(),
        author: "viewer".to_string(),
        like_count: 1,
        published_at: None,
    }
}

fn text_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "msg_01",
        "model": "claude-3-haiku-20240307",
        "content": [{ "type": "text", "text": text }]
    })
}

#[tokio::test]
async fn create_message_sends_fixed_model_and_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(serde_json::json!({
            "model": "claude-3-haiku-20240307",
            "max_tokens": 2000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("the analysis")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let text = client.create_message("prompt").await.expect("should succeed");
    assert_eq!(text, "the analysis");
}

#[tokio::test]
async fn non_success_status_carries_upstream_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_string(r#"{"type":"error","error":{"type":"rate_limit_error"}}"#),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.create_message("prompt").await;

    match result {
        Err(ClaudeError::Api { status, message }) => {
            assert_eq!(status, 429);
            assert!(message.contains("rate_limit_error"), "message: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn response_without_text_block_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "content": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.create_message("prompt").await;
    assert!(matches!(result, Err(ClaudeError::EmptyResponse)));
}

#[tokio::test]
async fn analyze_comments_free_text_returns_response_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response("**WHAT CUSTOMERS LOVE ABOUT ACME:**\n- a lot")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let analysis = client
        .analyze_comments("Acme", &[comment("great")], AnalysisMode::FreeText)
        .await
        .expect("should succeed");
    assert_eq!(
        analysis.raw_text(),
        Some("**WHAT CUSTOMERS LOVE ABOUT ACME:**\n- a lot")
    );
}

#[tokio::test]
async fn analyze_comments_structured_parses_embedded_json() {
    let server = MockServer::start().await;

    let model_output = r#"Here is the competitive analysis:
{
    "sentiment_summary": {"positive_count": 1, "negative_count": 0, "neutral_count": 0, "total_comments": 1},
    "key_themes": {"positive_aspects": [{"theme": "quality", "mentions": 1, "sample_comments": ["great"]}], "negative_aspects": []},
    "product_insights": {"strengths": [], "weaknesses": [], "suggestions": ["compete on price"]},
    "marketing_insights": ["highlight support"]
}"#;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(model_output)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let analysis = client
        .analyze_comments("Acme", &[comment("great")], AnalysisMode::Structured)
        .await
        .expect("should succeed");

    let structured = analysis.as_structured().expect("structured variant");
    assert_eq!(structured.sentiment_summary.positive_count, 1);
    assert_eq!(structured.key_themes.positive_aspects[0].theme, "quality");
    assert_eq!(
        structured.product_insights.suggestions,
        vec!["compete on price".to_string()]
    );
}

#[tokio::test]
async fn analyze_comments_structured_degrades_to_unparsed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response("no json in this reply")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let analysis = client
        .analyze_comments("Acme", &[comment("great")], AnalysisMode::Structured)
        .await
        .expect("parse failure is not a transport error");

    match analysis {
        Analysis::Unparsed { raw_response, .. } => {
            assert_eq!(raw_response, "no json in this reply");
        }
        other => panic!("expected Unparsed, got: {other:?}"),
    }
}
