use crate::error::{Error, Result};
use crate::services::embed_service::EmbedService;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::time::Duration;

const TOP_K: usize = 4;

/// One embedded chunk of scraped documentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub source: String,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// Persisted vector index for one documentation language, written by the
/// `build_index` binary and only ever read by the serving process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentIndex {
    pub lang: String,
    pub chunks: Vec<IndexedChunk>,
}

impl DocumentIndex {
    pub fn index_path(indexes_dir: &str, lang: &str) -> PathBuf {
        PathBuf::from(indexes_dir)
            .join(format!("{}_index", lang))
            .join("index.json")
    }
}

#[derive(Clone)]
pub struct RetrievalService {
    client: Client,
    api_key: String,
    chat_model: String,
    indexes_dir: String,
    embed: EmbedService,
}

impl RetrievalService {
    pub fn new(
        api_key: String,
        chat_model: String,
        indexes_dir: String,
        embed: EmbedService,
        client: Client,
    ) -> Self {
        Self {
            client,
            api_key,
            chat_model,
            indexes_dir,
            embed,
        }
    }

    /// Loads the persisted index for a language; any load failure maps to
    /// 404, mirroring "no index exists for this language".
    pub async fn load_index(&self, lang: &str) -> Result<DocumentIndex> {
        let path = DocumentIndex::index_path(&self.indexes_dir, lang);
        let data = tokio::fs::read(&path)
            .await
            .map_err(|_| Error::NotFound(format!("Index for '{}' not found.", lang)))?;
        serde_json::from_slice(&data)
            .map_err(|_| Error::NotFound(format!("Index for '{}' not found.", lang)))
    }

    /// Retrieval-augmented answer: embed the question, take the most similar
    /// chunks, and let the chat model answer over that context.
    pub async fn answer(&self, index: &DocumentIndex, question: &str) -> Result<String> {
        let query = [question.to_string()];
        let embeddings = self.embed.embed_texts(&query).await?;
        let query_embedding = embeddings
            .first()
            .ok_or_else(|| anyhow::anyhow!("embedding response was empty"))?;

        let top = rank_chunks(&index.chunks, query_embedding, TOP_K);
        if top.is_empty() {
            return Err(anyhow::anyhow!("index for '{}' has no chunks", index.lang).into());
        }

        let context = top
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n---\n\n");

        let payload = serde_json::json!({
            "model": self.chat_model,
            "messages": [
                {
                    "role": "system",
                    "content": "You are a precise documentation assistant. Answer using only \
                                the provided context. If the context does not contain the \
                                answer, say that you do not know."
                },
                {
                    "role": "user",
                    "content": format!("Context:\n{}\n\nQuestion: {}", context, question)
                }
            ],
            "temperature": 0.2,
            "max_tokens": 700
        });

        self.chat_completion(payload).await
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
            .map(|s| s.trim().to_string())
            .ok_or_else(|| anyhow::anyhow!("invalid chat completion response format").into())
    }
}

/// Chunks sorted by cosine similarity to the query, best first.
fn rank_chunks<'a>(
    chunks: &'a [IndexedChunk],
    query_embedding: &[f32],
    k: usize,
) -> Vec<&'a IndexedChunk> {
    let mut scored: Vec<(f32, &IndexedChunk)> = chunks
        .iter()
        .map(|c| (EmbedService::cosine_sim(&c.embedding, query_embedding), c))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(k).map(|(_, c)| c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(source: &str, embedding: Vec<f32>) -> IndexedChunk {
        IndexedChunk {
            source: source.to_string(),
            text: format!("text from {}", source),
            embedding,
        }
    }

    #[test]
    fn ranks_most_similar_chunks_first() {
        let chunks = vec![
            chunk("far", vec![0.0, 1.0]),
            chunk("near", vec![1.0, 0.0]),
            chunk("close", vec![0.9, 0.1]),
        ];
        let query = vec![1.0f32, 0.0];

        let ranked = rank_chunks(&chunks, &query, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].source, "near");
        assert_eq!(ranked[1].source, "close");
    }

    #[test]
    fn takes_at_most_k_chunks() {
        let chunks = vec![chunk("a", vec![1.0]), chunk("b", vec![0.5])];
        let ranked = rank_chunks(&chunks, &[1.0], 10);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn index_path_follows_lang_layout() {
        let path = DocumentIndex::index_path("indexes", "python");
        assert_eq!(path, PathBuf::from("indexes/python_index/index.json"));
    }
}
