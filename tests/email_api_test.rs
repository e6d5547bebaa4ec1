use std::env;
use std::sync::Once;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::post,
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

static INIT: Once = Once::new();

fn init() {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();
        env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
        env::set_var("OPENAI_API_KEY", "sk-test");
        env::set_var("EMAIL_ADDRESS", "sender@example.com");
        env::set_var("EMAIL_PASSWORD", "secret");
        // Exercise the full message-building path without an SMTP relay.
        env::set_var("EMAIL_SEND_DISABLED", "1");
        interviewer_backend::config::init_config().expect("init config");
    });
}

fn app() -> Router {
    init();
    Router::new()
        .route(
            "/send-email",
            post(interviewer_backend::routes::email::send_email),
        )
        .route(
            "/test-email",
            post(interviewer_backend::routes::email::test_email),
        )
        .with_state(interviewer_backend::AppState::new())
}

async fn post_json(app: &Router, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method("POST").uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

#[tokio::test]
async fn send_email_succeeds_with_valid_payload() {
    let app = app();
    let payload = json!({
        "to": "candidate@example.com",
        "subject": "Interview Evaluation Report",
        "html": "<h1>Report</h1><p>Score: 80/100</p>",
        "cc": ["hr@example.com"],
        "bcc": []
    });

    let (status, body) = post_json(&app, "/send-email", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"].as_bool(), Some(true));
    assert_eq!(body["message"].as_str(), Some("Email sent successfully"));
}

#[tokio::test]
async fn invalid_recipient_is_rejected() {
    let app = app();
    let payload = json!({
        "to": "not-an-email",
        "subject": "s",
        "html": "<p>x</p>"
    });

    let (status, _) = post_json(&app, "/send-email", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_cc_address_is_rejected() {
    let app = app();
    let payload = json!({
        "to": "candidate@example.com",
        "subject": "s",
        "html": "<p>x</p>",
        "cc": ["broken@@"]
    });

    let (status, _) = post_json(&app, "/send-email", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let app = app();
    let payload = json!({
        "to": "candidate@example.com",
        "subject": "",
        "html": ""
    });

    let (status, _) = post_json(&app, "/send-email", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_email_goes_to_the_configured_sender() {
    let app = app();
    let (status, body) = post_json(&app, "/test-email", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"].as_bool(), Some(true));
}
