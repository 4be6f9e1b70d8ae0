// src/fetch/search.rs
//! Search-aggregator strategy: Google News RSS search. Used both for
//! search-kind catalog sources and as the orchestrator's last-resort tier;
//! discovery also reads the publisher names these feeds carry.

use async_trait::async_trait;

use crate::fetch::feed::{articles_from_feed, parse_feed_xml, ParsedFeed};
use crate::fetch::{http_get_text, FetchStrategy};
use crate::model::{Article, FetchConstraints, FetchError, Source, SourceKind};

/// Build a Google News RSS search URL for a query.
pub fn google_news_search_url(query: &str) -> String {
    format!(
        "https://news.google.com/rss/search?q={}&hl=en-US&gl=US&ceid=US:en",
        urlencoding::encode(query)
    )
}

pub struct SearchStrategy {
    client: reqwest::Client,
}

impl SearchStrategy {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch and parse a search feed, keeping the parsed form so callers
    /// (discovery) can read publisher names off the items.
    pub async fn fetch_parsed(&self, url: &str) -> Result<ParsedFeed, FetchError> {
        let body = http_get_text(&self.client, url).await?;
        parse_feed_xml(&body)
    }

    /// One broad query against the aggregator, returning plain articles.
    pub async fn search(
        &self,
        query: &str,
        constraints: &FetchConstraints,
    ) -> Result<Vec<Article>, FetchError> {
        let url = google_news_search_url(query);
        let parsed = self.fetch_parsed(&url).await?;
        let source = Source::new("google_news", &url, SourceKind::Search, 6, "search");
        Ok(articles_from_feed(&parsed, &source, SourceKind::Search, constraints))
    }
}

#[async_trait]
impl FetchStrategy for SearchStrategy {
    async fn fetch(
        &self,
        source: &Source,
        constraints: &FetchConstraints,
    ) -> Result<Vec<Article>, FetchError> {
        let parsed = self.fetch_parsed(&source.url).await?;
        Ok(articles_from_feed(&parsed, source, SourceKind::Search, constraints))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Search
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::feed::parse_feed_date;

    #[test]
    fn search_url_encodes_query() {
        let url = google_news_search_url("AI breakthrough & more");
        assert!(url.starts_with("https://news.google.com/rss/search?q=AI%20breakthrough"));
        assert!(url.contains("ceid=US%3Aen") || url.contains("ceid=US:en"));
    }

    #[test]
    fn search_feed_items_carry_publisher_names() {
        let xml = r#"<rss version="2.0"><channel>
          <title>"AI news" - Google News</title>
          <item>
            <title>Lab ships new model - Example Tech Daily</title>
            <link>https://news.google.com/rss/articles/abc123</link>
            <pubDate>Mon, 24 Aug 2026 09:00:00 GMT</pubDate>
            <source url="https://techdaily.example.com">Example Tech Daily</source>
          </item>
        </channel></rss>"#;
        let parsed = parse_feed_xml(xml).unwrap();
        assert_eq!(
            parsed.items[0].source_name.as_deref(),
            Some("Example Tech Daily")
        );

        let now = parse_feed_date("Mon, 24 Aug 2026 12:00:00 GMT").unwrap();
        let constraints = FetchConstraints::new(24, 5, now);
        let src = Source::new("gnews", "https://news.google.com/rss", SourceKind::Search, 6, "search");
        let articles = articles_from_feed(&parsed, &src, SourceKind::Search, &constraints);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].kind, SourceKind::Search);
    }
}
