//! Embeds the scraped documentation chunks and persists one vector index
//! per language under `{INDEXES_DIR}/{lang}_index/index.json`. The API
//! process only ever reads these files.

use interviewer_backend::config::{get_config, init_config, Config};
use interviewer_backend::services::embed_service::EmbedService;
use interviewer_backend::services::retrieval_service::{DocumentIndex, IndexedChunk};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

const EMBED_BATCH: usize = 64;
const DEFAULT_LANGUAGES: [&str; 3] = ["java", "python", "javascript"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;
    let embed = EmbedService::new(
        config.openai_api_key.clone(),
        config.embedding_model.clone(),
        client,
    );

    let mut languages: Vec<String> = std::env::args().skip(1).collect();
    if languages.is_empty() {
        languages = DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect();
    }

    for lang in &languages {
        build_index_for_language(&embed, config, lang).await?;
    }
    Ok(())
}

async fn build_index_for_language(
    embed: &EmbedService,
    config: &Config,
    lang: &str,
) -> anyhow::Result<()> {
    let docs_path = PathBuf::from(&config.docs_dir).join(lang);
    info!(lang, path = %docs_path.display(), "building index");

    let mut sources: Vec<(String, String)> = Vec::new();
    let mut entries = tokio::fs::read_dir(&docs_path).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let text = tokio::fs::read_to_string(&path).await?;
        if text.trim().is_empty() {
            continue;
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("chunk")
            .to_string();
        sources.push((name, text));
    }
    // Stable chunk order keeps rebuilt indexes diffable.
    sources.sort_by(|a, b| a.0.cmp(&b.0));
    anyhow::ensure!(
        !sources.is_empty(),
        "no documents found in {}",
        docs_path.display()
    );

    let mut chunks: Vec<IndexedChunk> = Vec::with_capacity(sources.len());
    for batch in sources.chunks(EMBED_BATCH) {
        let texts: Vec<String> = batch.iter().map(|(_, text)| text.clone()).collect();
        let embeddings = embed.embed_texts(&texts).await?;
        anyhow::ensure!(
            embeddings.len() == batch.len(),
            "embedding count mismatch: sent {}, got {}",
            batch.len(),
            embeddings.len()
        );
        for ((name, text), embedding) in batch.iter().zip(embeddings) {
            chunks.push(IndexedChunk {
                source: name.clone(),
                text: text.clone(),
                embedding,
            });
        }
    }

    let index = DocumentIndex {
        lang: lang.to_string(),
        chunks,
    };
    let path = DocumentIndex::index_path(&config.indexes_dir, lang);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, serde_json::to_vec_pretty(&index)?).await?;

    info!(lang, chunks = index.chunks.len(), "saved index");
    Ok(())
}
