use crate::error::Result;
use crate::models::question::{Question, QuestionType};
use rand::seq::SliceRandom;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

const OPTION_KEYS: [&str; 4] = ["a", "b", "c", "d"];
const QUESTIONS_PER_SESSION: usize = 10;

#[derive(Clone)]
pub struct QuestionService {
    client: Client,
    api_key: String,
    model: String,
}

impl QuestionService {
    pub fn new(api_key: String, model: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }

    /// Generates the question set for one interview session. Generation or
    /// parse failures never surface to the caller; the static fallback set
    /// keeps the session usable.
    pub async fn generate(&self, domain: &str, level: &str) -> Vec<Question> {
        match self.generate_via_model(domain, level).await {
            Ok(questions) if !questions.is_empty() => questions,
            Ok(_) => {
                tracing::warn!(domain, level, "model returned no usable questions, using fallback");
                Self::fallback_questions(domain)
            }
            Err(e) => {
                tracing::warn!(error = ?e, domain, level, "question generation failed, using fallback");
                Self::fallback_questions(domain)
            }
        }
    }

    async fn generate_via_model(&self, domain: &str, level: &str) -> Result<Vec<Question>> {
        let prompt = format!(
            "Generate {} {} level interview questions (mix of MCQs + Descriptive) on {}.\n\
             Format: JSON list of objects with keys: id, question, type, correct_answer, options.\n\
             For MCQs, 'options' must be a list of 4 values. Type is 'mcq' or 'descriptive'.",
            QUESTIONS_PER_SESSION, level, domain
        );

        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": "You are a helpful interviewer assistant."},
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.7,
            "max_tokens": 1500
        });

        let content = self.chat_completion(payload).await?;
        let json_str = extract_json_block(&content)
            .ok_or_else(|| anyhow::anyhow!("no JSON array in model output"))?;
        let raw: Vec<JsonValue> = serde_json::from_str(json_str)?;

        let mut rng = rand::thread_rng();
        let mut questions: Vec<Question> = raw
            .iter()
            .filter_map(|v| coerce_question(v, &mut rng))
            .collect();
        questions.truncate(QUESTIONS_PER_SESSION);
        Ok(questions)
    }

    async fn chat_completion(&self, payload: JsonValue) -> Result<String> {
        let res = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(Duration::from_secs(120))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("chat API error {}: {}", status, text).into());
        }

        let body: JsonValue = res.json().await?;
        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("invalid chat completion response format").into())
    }

    pub fn fallback_questions(domain: &str) -> Vec<Question> {
        (0..QUESTIONS_PER_SESSION)
            .map(|i| Question {
                id: i.to_string(),
                question: format!("Dummy question {} about {}", i + 1, domain),
                question_type: QuestionType::Mcq,
                correct_answer: "Option A".to_string(),
                options: Some(
                    OPTION_KEYS
                        .iter()
                        .zip(["Option A", "Option B", "Option C", "Option D"])
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
            })
            .collect()
    }
}

/// Pulls a JSON array out of a chat completion. Prefers a fenced ```json
/// block; otherwise scans for the outermost brackets.
fn extract_json_block(content: &str) -> Option<&str> {
    if let Some(fence_start) = content.find("```json") {
        let after = &content[fence_start + "```json".len()..];
        if let Some(fence_end) = after.find("```") {
            let inner = after[..fence_end].trim();
            if !inner.is_empty() {
                return Some(inner);
            }
        }
    }
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    if end > start {
        Some(&content[start..=end])
    } else {
        None
    }
}

/// Normalizes one raw model question: lowercased type, string id (generated
/// when absent), options list converted to an a..d map. Items without a
/// question or reference answer are dropped.
fn coerce_question(v: &JsonValue, rng: &mut impl rand::Rng) -> Option<Question> {
    let question = v.get("question")?.as_str()?.trim().to_string();
    if question.is_empty() {
        return None;
    }

    let type_str = v
        .get("type")
        .and_then(|s| s.as_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let question_type = match type_str.as_str() {
        "mcq" => QuestionType::Mcq,
        "descriptive" => QuestionType::Descriptive,
        _ => QuestionType::Other,
    };

    let correct_answer = match v.get("correct_answer") {
        Some(JsonValue::String(s)) => s.trim().to_string(),
        Some(JsonValue::Number(n)) => n.to_string(),
        _ => return None,
    };
    if correct_answer.is_empty() {
        return None;
    }

    let id = match v.get("id") {
        Some(JsonValue::String(s)) if !s.is_empty() => s.clone(),
        Some(JsonValue::Number(n)) => n.to_string(),
        _ => Uuid::new_v4().to_string(),
    };

    let options = if question_type == QuestionType::Mcq {
        Some(convert_options(v.get("options"), rng)?)
    } else {
        None
    };

    Some(Question {
        id,
        question,
        question_type,
        correct_answer,
        options,
    })
}

/// MCQ options arrive either as a list of 4 values or as an already-keyed
/// map. Lists are shuffled before keying so the correct option does not sit
/// in a fixed slot; matching is by option text, so shuffling cannot change
/// which answer is correct.
fn convert_options(
    options: Option<&JsonValue>,
    rng: &mut impl rand::Rng,
) -> Option<BTreeMap<String, String>> {
    match options {
        Some(JsonValue::Array(items)) => {
            let mut values: Vec<String> = items
                .iter()
                .filter_map(|o| o.as_str().map(|s| s.to_string()))
                .collect();
            if values.len() < 2 {
                return None;
            }
            values.shuffle(rng);
            Some(
                OPTION_KEYS
                    .iter()
                    .zip(values)
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            )
        }
        Some(JsonValue::Object(map)) => {
            let converted: BTreeMap<String, String> = map
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect();
            if converted.len() < 2 {
                None
            } else {
                Some(converted)
            }
        }
        _ => None,
    }
}
