use crate::dto::interview_dto::AnswerItem;
use crate::error::Result;
use crate::models::question::{Question, QuestionType};
use crate::services::embed_service::EmbedService;

const MCQ_POINTS: f64 = 10.0;
const MAX_SIMILARITY_POINTS: f64 = 10.0;
const PASS_THRESHOLD: f64 = 50.0;

#[derive(Clone)]
pub struct ScoringService {
    embed: EmbedService,
}

impl ScoringService {
    pub fn new(embed: EmbedService) -> Self {
        Self { embed }
    }

    /// Scores a submission against the session's question set. Answers that
    /// reference an unknown question id are skipped; question types other
    /// than MCQ/descriptive earn nothing.
    pub async fn evaluate(
        &self,
        questions: &[Question],
        answers: &[AnswerItem],
    ) -> Result<(f64, bool)> {
        let mut total = 0.0;

        for answer in answers {
            let answer_id = answer.id.to_string();
            let Some(question) = questions.iter().find(|q| q.id == answer_id) else {
                tracing::debug!(id = %answer_id, "answer references unknown question, skipping");
                continue;
            };

            match question.question_type {
                QuestionType::Mcq => {
                    if normalize(&answer.user_answer) == normalize(&question.correct_answer) {
                        total += MCQ_POINTS;
                    }
                }
                QuestionType::Descriptive => {
                    let texts = [
                        question.correct_answer.clone(),
                        answer.user_answer.clone(),
                    ];
                    let embeddings = self.embed.embed_texts(&texts).await?;
                    let (Some(reference), Some(submitted)) =
                        (embeddings.first(), embeddings.get(1))
                    else {
                        return Err(anyhow::anyhow!("embedding response missing vectors").into());
                    };
                    let sim = EmbedService::cosine_sim(reference, submitted);
                    total += similarity_points(sim);
                }
                QuestionType::Other => continue,
            }
        }

        let score = round2(total);
        Ok((score, score >= PASS_THRESHOLD))
    }
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Rescales cosine similarity from [-1, 1] to credit in [0, 10].
pub(crate) fn similarity_points(sim: f32) -> f64 {
    (f64::from(sim) * 10.0).clamp(0.0, MAX_SIMILARITY_POINTS)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
