use crate::models::question::Question;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartInterviewRequest {
    #[validate(length(min = 1))]
    pub domain: String,
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "easy".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct StartInterviewResponse {
    pub session_id: String,
    pub questions: Vec<Question>,
}

/// Clients send question ids back either as the integer they received or as
/// a string; both compare against the stored string id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnswerId {
    Int(i64),
    Str(String),
}

impl std::fmt::Display for AnswerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerId::Int(n) => write!(f, "{}", n),
            AnswerId::Str(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerItem {
    pub id: AnswerId,
    #[serde(rename = "type")]
    pub answer_type: String,
    pub user_answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerSubmission {
    pub session_id: String,
    pub answers: Vec<AnswerItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    pub score: f64,
    pub result: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinalResultParams {
    pub easy_id: String,
    pub medium_id: Option<String>,
    pub hard_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalResultResponse {
    pub passed: bool,
    pub easy_score: f64,
    pub medium_score: f64,
    pub hard_score: f64,
    pub final_result: String,
}
