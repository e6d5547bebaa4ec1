use std::env;
use std::sync::Once;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

static INIT: Once = Once::new();

fn init() {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();
        env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
        // Invalid key: generation falls back to the static question set.
        env::set_var("OPENAI_API_KEY", "sk-test");
        env::set_var("PUBLIC_RPS", "100");
        interviewer_backend::config::init_config().expect("init config");
    });
}

fn app() -> Router {
    init();
    Router::new()
        .route(
            "/start",
            post(interviewer_backend::routes::interview::start_interview),
        )
        .route(
            "/evaluate",
            post(interviewer_backend::routes::interview::evaluate_answers),
        )
        .route(
            "/final_result",
            get(interviewer_backend::routes::interview::final_result),
        )
        .with_state(interviewer_backend::AppState::new())
}

async fn post_json(app: &Router, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

fn answers_from_questions(questions: &[JsonValue], correct: usize) -> Vec<JsonValue> {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let user_answer = if i < correct {
                q["correct_answer"].as_str().unwrap().to_string()
            } else {
                "definitely wrong".to_string()
            };
            json!({
                "id": q["id"],
                "type": q["type"],
                "user_answer": user_answer
            })
        })
        .collect()
}

#[tokio::test]
async fn interview_flow_end_to_end() {
    let app = app();

    let (status, body) = post_json(&app, "/start", json!({"domain": "backend"})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["session_id"].is_string());
    let questions = body["questions"].as_array().expect("questions").clone();
    assert_eq!(questions.len(), 10);
    for q in &questions {
        assert!(q["question"].is_string());
        assert!(q["type"].is_string());
        assert!(q["correct_answer"].is_string());
    }
    let session_id = body["session_id"].as_str().unwrap().to_string();

    // All answers correct: full score, passed.
    let submission = json!({
        "session_id": session_id,
        "answers": answers_from_questions(&questions, questions.len())
    });
    let (status, body) = post_json(&app, "/evaluate", submission).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"].as_f64(), Some(100.0));
    assert_eq!(body["result"].as_str(), Some("Passed"));

    let (status, body) = get_json(&app, &format!("/final_result?easy_id={}", session_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passed"].as_bool(), Some(true));
    assert_eq!(body["easy_score"].as_f64(), Some(100.0));
    assert_eq!(body["medium_score"].as_f64(), Some(0.0));
    assert_eq!(body["hard_score"].as_f64(), Some(0.0));
    assert_eq!(body["final_result"].as_str(), Some("Passed"));
}

#[tokio::test]
async fn low_score_fails_session_and_final_result() {
    let app = app();

    let (_, body) = post_json(&app, "/start", json!({"domain": "java", "level": "hard"})).await;
    let questions = body["questions"].as_array().unwrap().clone();
    let session_id = body["session_id"].as_str().unwrap().to_string();

    // 3 of 10 correct: 30 points, below every threshold.
    let submission = json!({
        "session_id": session_id,
        "answers": answers_from_questions(&questions, 3)
    });
    let (status, body) = post_json(&app, "/evaluate", submission).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"].as_f64(), Some(30.0));
    assert_eq!(body["result"].as_str(), Some("Failed"));

    let (status, body) = get_json(&app, &format!("/final_result?easy_id={}", session_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passed"].as_bool(), Some(false));
    assert_eq!(body["final_result"].as_str(), Some("Failed"));
}

#[tokio::test]
async fn hard_tier_alone_can_pass_the_final_result() {
    let app = app();

    let (_, body) = post_json(&app, "/start", json!({"domain": "python", "level": "hard"})).await;
    let questions = body["questions"].as_array().unwrap().clone();
    let hard_id = body["session_id"].as_str().unwrap().to_string();

    // 5 of 10 correct: 50 points, above the 40-point hard threshold.
    let submission = json!({
        "session_id": hard_id,
        "answers": answers_from_questions(&questions, 5)
    });
    let (status, _) = post_json(&app, "/evaluate", submission).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = post_json(&app, "/start", json!({"domain": "python"})).await;
    let easy_questions = body["questions"].as_array().unwrap().clone();
    let easy_id = body["session_id"].as_str().unwrap().to_string();
    let submission = json!({
        "session_id": easy_id,
        "answers": answers_from_questions(&easy_questions, 0)
    });
    let (status, _) = post_json(&app, "/evaluate", submission).await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/final_result?easy_id={}&hard_id={}", easy_id, hard_id);
    let (status, body) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passed"].as_bool(), Some(true));
    assert_eq!(body["hard_score"].as_f64(), Some(50.0));
}

#[tokio::test]
async fn unknown_session_is_a_bad_request() {
    let app = app();

    let submission = json!({
        "session_id": "fake-id",
        "answers": [{"id": 1, "type": "mcq", "user_answer": "Option A"}]
    });
    let (status, body) = post_json(&app, "/evaluate", submission).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid session ID"));

    let (status, _) = get_json(&app, "/final_result?easy_id=fake-id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_domain_is_rejected() {
    let app = app();
    let (status, _) = post_json(&app, "/start", json!({"domain": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn answers_for_unknown_questions_are_skipped() {
    let app = app();

    let (_, body) = post_json(&app, "/start", json!({"domain": "go"})).await;
    let questions = body["questions"].as_array().unwrap().clone();
    let session_id = body["session_id"].as_str().unwrap().to_string();

    let mut answers = answers_from_questions(&questions, 2);
    answers.push(json!({"id": "not-a-question", "type": "mcq", "user_answer": "x"}));

    let submission = json!({"session_id": session_id, "answers": answers});
    let (status, body) = post_json(&app, "/evaluate", submission).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"].as_f64(), Some(20.0));
}
