//! Chatbot API tests

use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

async fn ask(app: &TestApp, message: Value) -> (StatusCode, String) {
    let response = app.server.post("/api/chat").json(&json!({ "message": message })).await;
    let reply: Value = response.json();
    (
        response.status_code(),
        reply["reply"].as_str().expect("reply text").to_string(),
    )
}

#[tokio::test]
async fn test_chat_answers_known_topics() {
    let app = TestApp::spawn().await;

    let (status, reply) = ask(&app, json!("Hello there")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!reply.is_empty());

    let (_, reply) = ask(&app, json!("How do I download a book?")).await;
    assert_contains!(reply.to_lowercase(), "download");
}

#[tokio::test]
async fn test_chat_rejects_invalid_messages() {
    let app = TestApp::spawn().await;

    let (status, reply) = ask(&app, json!("   ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reply, "Please send a valid message.");

    let (status, _) = ask(&app, json!(42)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let not_json = app.server.post("/api/chat").text("hello").await;
    assert_status!(not_json, StatusCode::BAD_REQUEST);
    assert_eq!(not_json.json::<Value>()["reply"], "Please send a valid message.");
}

#[tokio::test]
async fn test_chat_limits_message_length() {
    let app = TestApp::spawn().await;

    let (status, reply) = ask(&app, json!("a".repeat(501))).await;

    assert_eq!(status, StatusCode::OK);
    assert_contains!(reply, "under 500 characters");
}

#[tokio::test]
async fn test_chat_uses_language_model_when_configured() {
    let model = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer hf_test"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "generated_text": "Assistant: Try The Left Hand of Darkness." }])),
        )
        .expect(1)
        .mount(&model)
        .await;
    let app = TestApp::spawn_with(|config| config.chat_api_key("hf_test").chat_model_url(model.uri())).await;

    let (status, reply) = ask(&app, json!("Tell me something about winter planets")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply, "Try The Left Hand of Darkness.");
}

#[tokio::test]
async fn test_chat_falls_back_when_model_fails() {
    let model = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&model)
        .await;
    let app = TestApp::spawn_with(|config| config.chat_api_key("hf_test").chat_model_url(model.uri())).await;

    let (status, reply) = ask(&app, json!("Tell me something about winter planets")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!reply.is_empty());
}

#[tokio::test]
async fn test_chat_health() {
    let app = TestApp::spawn().await;
    let health: Value = app.server.get("/api/chat/health").await.json();
    assert_eq!(health["status"], "ready");
    assert_eq!(health["api_key_configured"], false);
    assert_eq!(health["mode"], "smart_matching_only");

    let configured = TestApp::spawn_with(|config| config.chat_api_key("hf_test")).await;
    let health: Value = configured.server.get("/api/chat/health").await.json();
    assert_eq!(health["api_key_configured"], true);
}
