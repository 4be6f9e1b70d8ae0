// src/fetch/arxiv.rs
//! Academic API strategy. The arXiv query API speaks Atom, so this reuses
//! the shared feed parser and differs only in kind tagging and in keeping
//! the abstract as the description.

use async_trait::async_trait;

use crate::fetch::feed::{articles_from_feed, parse_feed_xml};
use crate::fetch::{http_get_text, FetchStrategy};
use crate::model::{Article, FetchConstraints, FetchError, Source, SourceKind};

pub struct ArxivStrategy {
    client: reqwest::Client,
}

impl ArxivStrategy {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FetchStrategy for ArxivStrategy {
    async fn fetch(
        &self,
        source: &Source,
        constraints: &FetchConstraints,
    ) -> Result<Vec<Article>, FetchError> {
        let body = http_get_text(&self.client, &source.url).await?;
        let parsed = parse_feed_xml(&body)?;
        Ok(articles_from_feed(
            &parsed,
            source,
            SourceKind::AcademicApi,
            constraints,
        ))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::AcademicApi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::feed::parse_feed_date;

    const ARXIV_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query: search_query=cat:cs.AI</title>
  <entry>
    <title>Scaling Laws Revisited for Sparse Models</title>
    <link rel="alternate" type="text/html" href="http://arxiv.org/abs/2608.01234v1"/>
    <published>2026-08-24T04:30:00Z</published>
    <summary>We revisit scaling laws under sparsity constraints.</summary>
  </entry>
  <entry>
    <title>An Old Preprint</title>
    <link rel="alternate" href="http://arxiv.org/abs/2501.00001v1"/>
    <published>2025-01-01T00:00:00Z</published>
    <summary>Ancient history.</summary>
  </entry>
</feed>"#;

    #[test]
    fn arxiv_atom_maps_to_academic_articles() {
        let now = parse_feed_date("2026-08-24T12:00:00Z").unwrap();
        let constraints = FetchConstraints::new(24, 5, now);
        let source = Source::new(
            "arxiv",
            "http://export.arxiv.org/api/query?search_query=cat:cs.AI",
            SourceKind::AcademicApi,
            10,
            "academic",
        );
        let parsed = parse_feed_xml(ARXIV_FIXTURE).unwrap();
        let articles = articles_from_feed(&parsed, &source, SourceKind::AcademicApi, &constraints);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].kind, SourceKind::AcademicApi);
        assert_eq!(articles[0].url, "http://arxiv.org/abs/2608.01234v1");
        assert!(articles[0].description.contains("scaling laws"));
    }
}
