use axum::{
    extract::{Query, State},
    response::Json,
};
use validator::Validate;

use crate::dto::interview_dto::{
    AnswerSubmission, EvaluationResponse, FinalResultParams, FinalResultResponse,
    StartInterviewRequest, StartInterviewResponse,
};
use crate::error::{Error, Result};
use crate::models::session::Session;
use crate::AppState;

const EASY_THRESHOLD: f64 = 80.0;
const MEDIUM_THRESHOLD: f64 = 60.0;
const HARD_THRESHOLD: f64 = 40.0;

#[axum::debug_handler]
pub async fn start_interview(
    State(state): State<AppState>,
    Json(req): Json<StartInterviewRequest>,
) -> Result<Json<StartInterviewResponse>> {
    req.validate()?;

    let questions = state.question_service.generate(&req.domain, &req.level).await;
    let session = Session::new(req.domain, req.level, questions.clone());
    let session_id = session.id.clone();
    state.sessions.insert(session);

    tracing::info!(session_id = %session_id, "interview session created");
    Ok(Json(StartInterviewResponse {
        session_id,
        questions,
    }))
}

#[axum::debug_handler]
pub async fn evaluate_answers(
    State(state): State<AppState>,
    Json(req): Json<AnswerSubmission>,
) -> Result<Json<EvaluationResponse>> {
    let session = state
        .sessions
        .get(&req.session_id)
        .ok_or_else(|| Error::BadRequest("Invalid session ID".to_string()))?;

    let (score, passed) = state
        .scoring_service
        .evaluate(&session.questions, &req.answers)
        .await?;
    let result = if passed { "Passed" } else { "Failed" };

    state.sessions.set_outcome(&req.session_id, score, result);
    tracing::info!(session_id = %req.session_id, score, result, "session evaluated");

    Ok(Json(EvaluationResponse {
        score,
        result: result.to_string(),
    }))
}

#[axum::debug_handler]
pub async fn final_result(
    State(state): State<AppState>,
    Query(params): Query<FinalResultParams>,
) -> Result<Json<FinalResultResponse>> {
    let easy_score = tier_score(&state, Some(&params.easy_id))?;
    let medium_score = tier_score(&state, params.medium_id.as_deref())?;
    let hard_score = tier_score(&state, params.hard_id.as_deref())?;

    let passed = easy_score >= EASY_THRESHOLD
        || medium_score >= MEDIUM_THRESHOLD
        || hard_score >= HARD_THRESHOLD;

    Ok(Json(FinalResultResponse {
        passed,
        easy_score,
        medium_score,
        hard_score,
        final_result: if passed { "Passed" } else { "Failed" }.to_string(),
    }))
}

/// A missing tier scores zero; a tier id that is unknown or not yet
/// evaluated is a client error.
fn tier_score(state: &AppState, id: Option<&str>) -> Result<f64> {
    match id {
        None => Ok(0.0),
        Some(id) => state
            .sessions
            .score_of(id)
            .ok_or_else(|| Error::BadRequest(format!("Session ID missing or invalid: '{}'", id))),
    }
}
