//! Relay clients against a mocked upstream.

use ideate_config::{AssistantConfig, WorkflowConfig};
use ideate_core::entities::IdeaInput;
use ideate_relay::assistant::{FALLBACK_REPLY, NO_CONTEXT};
use ideate_relay::{AssistantClient, RelayError, WorkflowClient};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn submission() -> IdeaInput {
    serde_json::from_value(json!({
        "domain": "Education & Learning",
        "motivation": "Students juggle too many subjects",
        "idea": "Adaptive study planner",
        "confidence": 7,
        "email": "student@example.edu",
        "consent": true
    }))
    .unwrap()
}

fn workflow_client(server: &MockServer) -> WorkflowClient {
    WorkflowClient::new(&WorkflowConfig {
        webhook_url: format!("{}/webhook/ideas", server.uri()),
        ..WorkflowConfig::default()
    })
    .unwrap()
}

fn assistant_client(server: &MockServer, context_max_chars: usize) -> AssistantClient {
    AssistantClient::new(&AssistantConfig {
        base_url: format!("{}/openai/v1", server.uri()),
        api_key: "gsk_test".into(),
        context_max_chars,
        ..AssistantConfig::default()
    })
    .unwrap()
}

// ---------------------------------------------------------------------------
// Workflow engine
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_posts_envelope_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/ideas"))
        .and(header("user-agent", "InspirAI Custom Form"))
        .and(body_partial_json(json!({ "eventType": "FORM_RESPONSE" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    workflow_client(&server).submit(&submission()).await.unwrap();
}

#[tokio::test]
async fn upstream_503_is_reported_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/ideas"))
        .respond_with(ResponseTemplate::new(503).set_body_string("workflow paused"))
        .expect(1)
        .mount(&server)
        .await;

    let err = workflow_client(&server).submit(&submission()).await.unwrap_err();
    match err {
        RelayError::Upstream { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "workflow paused");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unreachable_engine_is_a_transport_error() {
    let client = WorkflowClient::new(&WorkflowConfig {
        webhook_url: "http://127.0.0.1:9/webhook".into(),
        timeout_secs: 2,
        ..WorkflowConfig::default()
    })
    .unwrap();
    let err = client.submit(&submission()).await.unwrap_err();
    assert!(matches!(err, RelayError::Http(_)));
}

// ---------------------------------------------------------------------------
// Assistant endpoint
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ask_sends_fixed_sampling_and_returns_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer gsk_test"))
        .and(body_partial_json(json!({
            "model": "llama-3.3-70b-versatile",
            "temperature": 0.7,
            "max_tokens": 500
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Start with a pilot." } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = assistant_client(&server, 6000)
        .ask("What next?", Some("Project: Planner"))
        .await
        .unwrap();
    assert_eq!(reply, "Start with a pilot.");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let system = body["messages"][0]["content"].as_str().unwrap();
    assert!(system.contains("Project: Planner"));
    assert_eq!(body["messages"][1]["content"], "What next?");
}

#[tokio::test]
async fn missing_context_uses_placeholder_and_long_context_is_capped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "ok" } }]
        })))
        .mount(&server)
        .await;

    let client = assistant_client(&server, 10);
    client.ask("hi", None).await.unwrap();
    client.ask("hi", Some(&"x".repeat(50))).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let first: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(first["messages"][0]["content"].as_str().unwrap().contains(NO_CONTEXT));

    let second: Value = serde_json::from_slice(&requests[1].body).unwrap();
    let system = second["messages"][0]["content"].as_str().unwrap();
    assert!(system.contains(&format!("DASHBOARD DATA:\n{}\n", "x".repeat(10))));
    assert!(!system.contains(&"x".repeat(11)));
}

#[tokio::test]
async fn empty_choices_yield_the_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let reply = assistant_client(&server, 6000).ask("hi", None).await.unwrap();
    assert_eq!(reply, FALLBACK_REPLY);
}

#[tokio::test]
async fn upstream_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&server)
        .await;

    let err = assistant_client(&server, 6000).ask("hi", None).await.unwrap_err();
    assert!(matches!(err, RelayError::Upstream { status: 429, .. }));
}
