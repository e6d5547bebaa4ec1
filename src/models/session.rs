use crate::models::question::Question;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-side record linking a generated question set to a scoring outcome.
/// Created by question generation, updated once by evaluation, never deleted
/// (sessions accumulate for the process lifetime).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub domain: String,
    pub level: String,
    pub questions: Vec<Question>,
    pub score: Option<f64>,
    pub result: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(domain: String, level: String, questions: Vec<Question>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            domain,
            level,
            questions,
            score: None,
            result: None,
            created_at: Utc::now(),
        }
    }
}
