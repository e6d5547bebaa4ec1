use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QueryRequest {
    #[validate(length(min = 1))]
    pub lang: String,
    #[validate(length(min = 1))]
    pub question: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub answer: String,
}
