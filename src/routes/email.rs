use axum::{extract::State, response::Json};
use validator::Validate;

use crate::dto::email_dto::{EmailRequest, EmailResponse};
use crate::error::Result;
use crate::AppState;

#[axum::debug_handler]
pub async fn send_email(
    State(state): State<AppState>,
    Json(req): Json<EmailRequest>,
) -> Result<Json<EmailResponse>> {
    req.validate()?;

    let message_id = state
        .email_service
        .send_html(&req.to, &req.subject, &req.html, &req.cc, &req.bcc)
        .await?;

    Ok(Json(EmailResponse {
        success: true,
        message: "Email sent successfully".to_string(),
        message_id: Some(message_id),
    }))
}

#[axum::debug_handler]
pub async fn test_email(State(state): State<AppState>) -> Result<Json<EmailResponse>> {
    let message_id = state.email_service.send_test_message().await?;

    Ok(Json(EmailResponse {
        success: true,
        message: "Test email sent successfully".to_string(),
        message_id: Some(message_id),
    }))
}
