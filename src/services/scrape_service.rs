use scraper::Html;

pub const CHUNK_WORDS: usize = 800;

const STRIPPED_TAGS: [&str; 7] = ["script", "style", "header", "footer", "nav", "aside", "form"];

/// Extracts readable text from an HTML page: boilerplate containers are
/// dropped, whitespace is normalized, empty lines removed.
pub fn clean_html(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut lines: Vec<String> = Vec::new();

    for node in doc.tree.nodes() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let stripped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |el| STRIPPED_TAGS.contains(&el.name()))
        });
        if stripped {
            continue;
        }
        for raw_line in text.split('\n') {
            let line = raw_line.split_whitespace().collect::<Vec<_>>().join(" ");
            if !line.is_empty() {
                lines.push(line);
            }
        }
    }

    lines.join("\n")
}

/// Splits text into chunks of roughly `size` words, word boundaries kept.
pub fn chunk_words(text: &str, size: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words.chunks(size.max(1)).map(|c| c.join(" ")).collect()
}

/// Filesystem-safe chunk filename stem, truncated to 50 characters.
pub fn safe_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .take(50)
        .collect()
}
