//! Fetches documentation pages for each supported language, strips them to
//! plain text, and writes word-count chunks under `docs/{lang}/`. The
//! `build_index` binary turns those chunks into a searchable index.

use interviewer_backend::services::scrape_service::{
    chunk_words, clean_html, safe_filename, CHUNK_WORDS,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/114.0.0.0 Safari/537.36";

// Polite delay between fetches.
const FETCH_DELAY: Duration = Duration::from_secs(2);

fn doc_sources() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        (
            "java",
            vec![
                "https://docs.oracle.com/en/java/",
                "https://docs.oracle.com/javase/tutorial/",
                "https://www.baeldung.com/java-8-streams",
                "https://www.baeldung.com/java-collections",
                "https://www.programiz.com/java-programming",
                "https://www.w3schools.com/java/",
                "https://docs.spring.io/spring-framework/docs/current/reference/html/",
                "https://www.freecodecamp.org/news/java-tutorial-for-beginners/",
            ],
        ),
        (
            "python",
            vec![
                "https://docs.python.org/3/",
                "https://docs.python.org/3/tutorial/",
                "https://realpython.com/",
                "https://docs.python-guide.org/",
                "https://www.programiz.com/python-programming",
                "https://www.w3schools.com/python/",
                "https://flask.palletsprojects.com/en/latest/",
                "https://docs.python-requests.org/en/latest/",
            ],
        ),
        (
            "javascript",
            vec![
                "https://developer.mozilla.org/en-US/docs/Web/JavaScript",
                "https://javascript.info/",
                "https://www.w3schools.com/js/",
                "https://eloquentjavascript.net/",
                "https://nodejs.org/en/docs/",
                "https://www.typescriptlang.org/docs/",
                "https://javascript.info/async",
                "https://www.javascripttutorial.net/",
            ],
        ),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let docs_dir = std::env::var("DOCS_DIR").unwrap_or_else(|_| "docs".to_string());
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(15))
        .build()?;

    let mut total_chunks = 0usize;
    for (lang, urls) in doc_sources() {
        info!(lang, "processing language");
        for (i, url) in urls.iter().enumerate() {
            match scrape_and_save(&client, url, lang, i, &docs_dir).await {
                Ok(count) => total_chunks += count,
                Err(e) => warn!(url, error = ?e, "failed to scrape"),
            }
            tokio::time::sleep(FETCH_DELAY).await;
        }
    }

    info!(total_chunks, "scraping complete");
    Ok(())
}

async fn scrape_and_save(
    client: &reqwest::Client,
    url: &str,
    lang: &str,
    source_index: usize,
    docs_dir: &str,
) -> anyhow::Result<usize> {
    info!(url, "scraping");
    let resp = client.get(url).send().await?.error_for_status()?;
    let html = resp.text().await?;

    let text = clean_html(&html);
    let chunks = chunk_words(&text, CHUNK_WORDS);

    let save_dir = PathBuf::from(docs_dir).join(lang);
    tokio::fs::create_dir_all(&save_dir).await?;

    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| "source".to_string());

    let mut count = 0usize;
    for (idx, chunk) in chunks.iter().enumerate() {
        let fname = format!("{}_{}_{}.txt", safe_filename(&host), source_index, idx);
        tokio::fs::write(save_dir.join(fname), chunk).await?;
        count += 1;
    }

    info!(url, count, "saved chunks");
    Ok(count)
}
