//! Text service tests against a mock Gemini endpoint

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use creative_gateway::api::create_text_router;
use creative_gateway::backend::create_text_backend;
use creative_gateway::config::{Settings, UpstreamAuth};
use creative_gateway::gateway::TEXT_OPERATIONS;
use creative_gateway::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn create_test_app(server: &MockServer, timeout_ms: u64) -> Router {
    let mut settings = Settings::default();
    settings.text_service.upstream.endpoint = server.uri();
    settings.text_service.upstream.timeout_ms = timeout_ms;
    settings.text_service.upstream.auth = UpstreamAuth {
        api_key: Some("test-key".to_string()),
        ..Default::default()
    };

    let upstream = create_text_backend(&settings.text_service.upstream).unwrap();
    create_text_router(Arc::new(AppState::new(Arc::new(settings), upstream)))
}

fn app_for(server: &MockServer) -> Router {
    create_test_app(server, 2_000)
}

fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"parts": [{"text": text}], "role": "model"},
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 8, "totalTokenCount": 20}
    })
}

async fn mount_reply(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(wiremock::matchers::header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(text)))
        .mount(server)
        .await;
}

async fn send(app: Router, uri: &str, content_type: Option<&str>, body: String) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let response = app.oneshot(builder.body(Body::from(body)).unwrap()).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, uri, Some("application/json"), body.to_string()).await
}

async fn upstream_prompts(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            body["contents"][0]["parts"][0]["text"].as_str().unwrap().to_string()
        })
        .collect()
}

#[tokio::test]
async fn test_every_operation_wraps_reply_under_its_key() {
    let server = MockServer::start().await;
    mount_reply(&server, "Model says hello").await;

    for op in TEXT_OPERATIONS {
        let (status, body) = post(app_for(&server), op.path, json!({ op.field.name: "Once upon a time" })).await;

        assert_eq!(status, StatusCode::OK, "{}", op.path);
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 1, "{}", op.path);
        assert!(object.contains_key(op.response_key), "{}", op.path);
    }

    let prompts = upstream_prompts(&server).await;
    assert_eq!(prompts.len(), TEXT_OPERATIONS.len(), "exactly one call per request");
    assert!(prompts.iter().all(|p| p.ends_with(":\n\nOnce upon a time")));
}

#[tokio::test]
async fn test_enhance_content() {
    let server = MockServer::start().await;
    mount_reply(&server, "The rain whispered against the glass.").await;

    let (status, body) = post(
        app_for(&server),
        "/api/content/enhance",
        json!({"content": "it was raining"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"enhancedContent": "The rain whispered against the glass."}));
    assert_eq!(
        upstream_prompts(&server).await,
        vec!["Review and refine the following content to make it more engaging and professional. \
              Provide only one improved version:\n\nit was raining"
            .to_string()]
    );
}

#[tokio::test]
async fn test_suggest_edits_keeps_first_three_segments() {
    let server = MockServer::start().await;
    mount_reply(&server, "1. First\n\n2. Second\n\n3. Third\n\n4. Fourth").await;

    let (status, body) = post(
        app_for(&server),
        "/api/content/suggest-edits",
        json!({"content": "The cat sat."}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"suggestions": ["1. First", "2. Second", "3. Third"]}));
}

#[tokio::test]
async fn test_missing_content_is_rejected_without_upstream_call() {
    let server = MockServer::start().await;
    mount_reply(&server, "unused").await;

    for body in [
        json!({}),
        json!({"content": ""}),
        json!({"content": "   \n\t "}),
        json!({"content": 42}),
        json!({"script": "wrong field"}),
    ] {
        let (status, response) = post(app_for(&server), "/api/content/sentiment-analysis", body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(response, json!({"error": "Content is required"}));
    }

    assert!(upstream_prompts(&server).await.is_empty());
}

#[tokio::test]
async fn test_unreadable_body_is_rejected_with_body_message() {
    let server = MockServer::start().await;
    mount_reply(&server, "unused").await;

    let (status, body) = send(
        app_for(&server),
        "/api/content/enhance",
        Some("application/json"),
        "{not json".to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Request body must be valid JSON"}));

    // A well-formed body sent without a JSON content type is not read as JSON
    let (status, body) = send(
        app_for(&server),
        "/api/content/enhance",
        Some("text/plain"),
        json!({"content": "a real draft"}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Request body must be valid JSON"}));

    let (status, body) = send(app_for(&server), "/api/content/enhance", None, String::new()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Request body must be valid JSON"}));

    assert!(upstream_prompts(&server).await.is_empty());
}

#[tokio::test]
async fn test_readable_body_without_field_gets_field_message() {
    let server = MockServer::start().await;

    let (status, body) = post(app_for(&server), "/api/content/enhance", json!(["content"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Content is required"}));
}

#[tokio::test]
async fn test_field_specific_messages() {
    let server = MockServer::start().await;
    let cases = [
        ("/api/script/format", "Script is required"),
        ("/api/story/analyze-arc", "Story content is required"),
        ("/api/film/scene-suggestions", "Scene description is required"),
    ];

    for (uri, message) in cases {
        let (status, body) = post(app_for(&server), uri, json!({"content": "not the right field"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": message }));
    }
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_reply("too late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let (status, body) = post(
        create_test_app(&server, 200),
        "/api/story/analyze-arc",
        json!({"story": "A hero leaves home."}),
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body, json!({"error": "API request timed out"}));
}

#[tokio::test]
async fn test_upstream_error_status_is_not_exposed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "status": "RESOURCE_EXHAUSTED", "message": "Quota exceeded for project 0042"}
        })))
        .mount(&server)
        .await;

    let (status, body) = post(
        app_for(&server),
        "/api/content/sentiment-analysis",
        json!({"content": "I love this"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to analyze sentiment"}));
    assert!(!body.to_string().contains("Quota"));
    assert_eq!(upstream_prompts(&server).await.len(), 1, "no retries");
}

#[tokio::test]
async fn test_malformed_upstream_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let (status, body) = post(
        app_for(&server),
        "/api/script/format",
        json!({"script": "He enters. She leaves."}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to format script"}));
}

#[tokio::test]
async fn test_blocked_prompt_is_malformed_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"promptFeedback": {"blockReason": "SAFETY"}})),
        )
        .mount(&server)
        .await;

    let (status, body) = post(
        app_for(&server),
        "/api/film/scene-suggestions",
        json!({"scene": "A storm at sea"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to generate scene suggestions"}));
}

#[tokio::test]
async fn test_repeated_requests_are_structurally_identical() {
    let server = MockServer::start().await;
    mount_reply(&server, "Calm\n\nHopeful").await;

    let request = json!({"content": "The sun rose over the hills."});
    let first = post(app_for(&server), "/api/content/suggest-edits", request.clone()).await;
    let second = post(app_for(&server), "/api/content/suggest-edits", request).await;

    assert_eq!(first, second);
    assert_eq!(upstream_prompts(&server).await.len(), 2);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let response = app_for(&server).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let doc: Value = serde_json::from_slice(&body).unwrap();
    assert!(doc["paths"]["/api/content/suggest-edits"]["post"].is_object());
}
