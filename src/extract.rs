// src/extract.rs
//! Best-effort full-text extraction for a single article URL. Downstream
//! consumers treat the text as optional enrichment, so every failure mode
//! collapses to an empty string.

use scraper::{Html, Selector};
use tracing::debug;

const MAX_TEXT_CHARS: usize = 5_000;

const CONTENT_SELECTORS: &[&str] = &["article", "main", "div.post-content", "div.article-body"];

/// Tags whose text is boilerplate, never article body.
const SKIP_TAGS: &[&str] = &["script", "style", "nav", "footer", "header", "aside"];

/// Pull readable text out of an HTML document: the first matching content
/// container, or the paragraph text of the whole page as a fallback.
pub fn extract_text_from_html(html: &str) -> String {
    let doc = Html::parse_document(html);

    for raw in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        if let Some(container) = doc.select(&selector).next() {
            let text = collect_paragraphs(container);
            if text.len() > 200 {
                return truncate_chars(&text, MAX_TEXT_CHARS);
            }
        }
    }

    // No recognizable container: take every paragraph on the page.
    let Ok(p) = Selector::parse("p") else {
        return String::new();
    };
    let mut parts = Vec::new();
    for node in doc.select(&p) {
        let t = node.text().collect::<String>();
        let t = t.trim();
        if t.len() > 40 {
            parts.push(t.to_string());
        }
    }
    truncate_chars(&parts.join("\n\n"), MAX_TEXT_CHARS)
}

fn collect_paragraphs(container: scraper::ElementRef<'_>) -> String {
    let Ok(p) = Selector::parse("p") else {
        return String::new();
    };
    let mut parts = Vec::new();
    for node in container.select(&p) {
        let inside_boilerplate = node
            .ancestors()
            .filter_map(scraper::ElementRef::wrap)
            .any(|el| SKIP_TAGS.contains(&el.value().name()));
        if inside_boilerplate {
            continue;
        }
        let t = node.text().collect::<String>();
        let t = t.trim();
        if !t.is_empty() {
            parts.push(t.to_string());
        }
    }
    parts.join("\n\n")
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.trim().to_string();
    }
    let cut: String = s.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}

/// Fetch a page and extract its article text. Returns an empty string on
/// any failure; callers fall back to the feed description.
pub async fn extract_article_text(client: &reqwest::Client, url: &str) -> String {
    let body = match crate::fetch::http_get_text(client, url).await {
        Ok(b) => b,
        Err(e) => {
            debug!(url, error = %e, "article page fetch failed");
            return String::new();
        }
    };
    extract_text_from_html(&body)
}
