// src/fetch/community.rs
//! Community API strategy: Hacker News via the Algolia search envelope.
//! Points become the engagement metric; stories without an outbound URL
//! fall back to their HN discussion link so they still carry a canonical
//! identity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::dedup::normalize_text;
use crate::fetch::FetchStrategy;
use crate::model::{Article, FetchConstraints, FetchError, Source, SourceKind};

#[derive(Debug, Deserialize)]
struct HnResponse {
    #[serde(default)]
    hits: Vec<HnHit>,
}

#[derive(Debug, Deserialize)]
struct HnHit {
    title: Option<String>,
    url: Option<String>,
    points: Option<u32>,
    created_at: Option<String>,
    story_text: Option<String>,
    #[serde(rename = "objectID")]
    object_id: Option<String>,
}

fn item_link(object_id: &str) -> String {
    format!("https://news.ycombinator.com/item?id={object_id}")
}

/// Convert an Algolia envelope into articles. Malformed hits are skipped
/// one by one; the call never fails past JSON parsing.
pub fn articles_from_hits(
    body: &str,
    source: &Source,
    constraints: &FetchConstraints,
) -> Result<Vec<Article>, FetchError> {
    let resp: HnResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Recoverable(format!("hn json parse: {e}")))?;

    let mut out = Vec::new();
    for hit in resp.hits {
        if out.len() >= constraints.max_per_source {
            break;
        }
        let title = normalize_text(hit.title.as_deref().unwrap_or_default());
        if title.is_empty() {
            continue;
        }
        let published: DateTime<Utc> = match hit
            .created_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        {
            Some(dt) => dt.with_timezone(&Utc),
            None => {
                debug!(title = %title, "hit without parsable created_at skipped");
                continue;
            }
        };
        if !constraints.within_window(published) {
            continue;
        }
        let url = hit
            .url
            .filter(|u| !u.trim().is_empty())
            .or_else(|| hit.object_id.as_deref().map(item_link));
        let Some(url) = url else { continue };

        let mut article = Article::new(&title, &url, &source.id, SourceKind::CommunityApi, published);
        article.engagement = hit.points;
        article.description = normalize_text(hit.story_text.as_deref().unwrap_or_default());
        out.push(article);
    }
    Ok(out)
}

pub struct CommunityStrategy {
    client: reqwest::Client,
}

impl CommunityStrategy {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FetchStrategy for CommunityStrategy {
    async fn fetch(
        &self,
        source: &Source,
        constraints: &FetchConstraints,
    ) -> Result<Vec<Article>, FetchError> {
        let body = crate::fetch::http_get_text(&self.client, &source.url).await?;
        articles_from_hits(&body, source, constraints)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::CommunityApi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::feed::parse_feed_date;

    fn source() -> Source {
        Source::new(
            "hacker_news_ai",
            "https://hn.algolia.com/api/v1/search_by_date?tags=story&query=AI",
            SourceKind::CommunityApi,
            7,
            "community",
        )
    }

    fn constraints() -> FetchConstraints {
        FetchConstraints::new(24, 5, parse_feed_date("2026-08-24T12:00:00Z").unwrap())
    }

    #[test]
    fn hits_map_points_to_engagement() {
        let body = r#"{"hits":[
            {"title":"Show HN: tiny LLM runtime","url":"https://example.com/llm",
             "points":342,"created_at":"2026-08-24T08:00:00Z","objectID":"1"},
            {"title":"Ask HN: best AI papers?","url":null,
             "points":55,"created_at":"2026-08-24T07:00:00Z","objectID":"424242"}
        ]}"#;
        let articles = articles_from_hits(body, &source(), &constraints()).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].engagement, Some(342));
        assert_eq!(
            articles[1].url,
            "https://news.ycombinator.com/item?id=424242"
        );
        assert_eq!(articles[1].kind, SourceKind::CommunityApi);
    }

    #[test]
    fn malformed_hit_does_not_discard_the_rest() {
        let body = r#"{"hits":[
            {"title":null,"url":"https://example.com/a","created_at":"2026-08-24T08:00:00Z"},
            {"title":"Valid story","url":"https://example.com/b",
             "points":10,"created_at":"not-a-date"},
            {"title":"Another valid story","url":"https://example.com/c",
             "points":10,"created_at":"2026-08-24T09:00:00Z","objectID":"3"}
        ]}"#;
        let articles = articles_from_hits(body, &source(), &constraints()).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Another valid story");
    }

    #[test]
    fn stale_hits_fall_outside_window() {
        let body = r#"{"hits":[
            {"title":"Ancient discussion thread","url":"https://example.com/old",
             "points":900,"created_at":"2026-08-20T00:00:00Z","objectID":"9"}
        ]}"#;
        let articles = articles_from_hits(body, &source(), &constraints()).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn bad_envelope_is_recoverable() {
        let err = articles_from_hits("<html>", &source(), &constraints()).unwrap_err();
        assert!(matches!(err, FetchError::Recoverable(_)));
    }
}
