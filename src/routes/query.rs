use axum::{extract::State, response::Json};
use validator::Validate;

use crate::dto::query_dto::{QueryRequest, QueryResponse};
use crate::error::Result;
use crate::AppState;

#[axum::debug_handler]
pub async fn query_docs(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    req.validate()?;

    let index = state.retrieval_service.load_index(&req.lang).await?;
    let answer = state.retrieval_service.answer(&index, &req.question).await?;

    Ok(Json(QueryResponse { answer }))
}
