// src/fetch/scrape.rs
//! Scrape strategy for sources without a feed: pull headline links off an
//! index page. Scraped items carry no publish date, so they are stamped
//! with fetch time and survive the lookback filter for one cycle.

use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

use crate::dedup::normalize_text;
use crate::fetch::{http_get_text, FetchStrategy};
use crate::model::{Article, FetchConstraints, FetchError, Source, SourceKind};

// Headline-ish anchors, most specific first. Index pages differ wildly;
// this is deliberately loose and relies on dedup/filtering downstream.
const HEADLINE_SELECTORS: &[&str] = &[
    "article h2 a[href]",
    "article h3 a[href]",
    "h2 a[href]",
    "h3 a[href]",
];

/// Extract headline candidates from an index page.
pub fn articles_from_page(
    html: &str,
    source: &Source,
    constraints: &FetchConstraints,
) -> Vec<Article> {
    let document = Html::parse_document(html);
    let base = Url::parse(&source.url).ok();

    let mut out: Vec<Article> = Vec::new();
    for selector_src in HEADLINE_SELECTORS {
        let Ok(selector) = Selector::parse(selector_src) else {
            continue;
        };
        for element in document.select(&selector) {
            if out.len() >= constraints.max_per_source {
                return out;
            }
            let title = normalize_text(&element.text().collect::<Vec<_>>().join(" "));
            if title.is_empty() {
                continue;
            }
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let resolved = match &base {
                Some(b) => match b.join(href) {
                    Ok(u) => u.to_string(),
                    Err(_) => continue,
                },
                None => href.to_string(),
            };
            if out.iter().any(|a| a.url == resolved) {
                continue;
            }
            out.push(Article::new(
                &title,
                &resolved,
                &source.id,
                SourceKind::Scrape,
                constraints.now,
            ));
        }
    }
    out
}

pub struct ScrapeStrategy {
    client: reqwest::Client,
}

impl ScrapeStrategy {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FetchStrategy for ScrapeStrategy {
    async fn fetch(
        &self,
        source: &Source,
        constraints: &FetchConstraints,
    ) -> Result<Vec<Article>, FetchError> {
        let body = http_get_text(&self.client, &source.url).await?;
        Ok(articles_from_page(&body, source, constraints))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Scrape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn source() -> Source {
        Source::new(
            "papers_index",
            "https://papers.example.com/latest",
            SourceKind::Scrape,
            8,
            "academic",
        )
    }

    #[test]
    fn headlines_resolve_relative_links() {
        let html = r#"
          <html><body>
            <article><h2><a href="/paper/one">A neural approach to everything</a></h2></article>
            <article><h2><a href="https://other.example.com/two">Cross-site headline here</a></h2></article>
            <h3><a href="/paper/three">Lower tier headline text</a></h3>
          </body></html>"#;
        let constraints = FetchConstraints::new(24, 5, Utc::now());
        let articles = articles_from_page(html, &source(), &constraints);
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].url, "https://papers.example.com/paper/one");
        assert_eq!(articles[1].url, "https://other.example.com/two");
        assert!(articles.iter().all(|a| a.kind == SourceKind::Scrape));
        assert!(articles.iter().all(|a| a.published == constraints.now));
    }

    #[test]
    fn cap_and_duplicate_links_are_enforced() {
        let items: String = (0..10)
            .map(|i| format!(r#"<article><h2><a href="/p/{i}">Headline number {i} right here</a></h2></article>"#))
            .collect();
        let dup = r#"<h2><a href="/p/0">Headline number 0 right here</a></h2>"#;
        let html = format!("<body>{items}{dup}</body>");
        let constraints = FetchConstraints::new(24, 4, Utc::now());
        let articles = articles_from_page(&html, &source(), &constraints);
        assert_eq!(articles.len(), 4);
    }

    #[test]
    fn pages_without_headlines_yield_nothing() {
        let constraints = FetchConstraints::new(24, 5, Utc::now());
        let articles = articles_from_page("<p>just text</p>", &source(), &constraints);
        assert!(articles.is_empty());
    }
}
