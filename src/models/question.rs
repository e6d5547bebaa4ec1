use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single interview question, either generated by the model or taken from
/// the static fallback set. Ids are kept as strings because model output may
/// number questions with integers, uuids, or arbitrary labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Mcq,
    Descriptive,
    // Anything else the model invents; skipped during scoring.
    #[serde(other)]
    Other,
}

impl Question {
    pub fn is_mcq(&self) -> bool {
        self.question_type == QuestionType::Mcq
    }
}
