// src/fetch/newsapi.rs
//! NewsAPI client: the orchestrator's primary keyed tier. A missing key
//! silently disables the tier; the error envelope's `rateLimited` code maps
//! onto the rate-limit signal so the orchestrator can back off.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::dedup::normalize_text;
use crate::model::{Article, FetchConstraints, FetchError, SourceKind};

const ENDPOINT: &str = "https://newsapi.org/v2/everything";
pub const SOURCE_ID: &str = "newsapi";

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<ApiArticle>,
}

#[derive(Debug, Deserialize)]
struct ApiArticle {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

/// Parse a NewsAPI response body into articles. Error envelopes become
/// typed errors; malformed individual articles are skipped.
pub fn articles_from_response(
    body: &str,
    constraints: &FetchConstraints,
) -> Result<Vec<Article>, FetchError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| FetchError::Recoverable(format!("newsapi json parse: {e}")))?;

    if envelope.status != "ok" {
        let message = envelope.message.unwrap_or_default();
        return match envelope.code.as_deref() {
            Some("rateLimited") => Err(FetchError::RateLimited(message)),
            _ => Err(FetchError::Recoverable(format!(
                "newsapi error: {message}"
            ))),
        };
    }

    let mut out = Vec::new();
    for item in envelope.articles {
        if out.len() >= constraints.max_per_source {
            break;
        }
        let title = normalize_text(item.title.as_deref().unwrap_or_default());
        let Some(url) = item.url.filter(|u| !u.trim().is_empty()) else {
            continue;
        };
        if title.is_empty() {
            continue;
        }
        let published: DateTime<Utc> = match item
            .published_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        {
            Some(dt) => dt.with_timezone(&Utc),
            None => continue,
        };
        if !constraints.within_window(published) {
            continue;
        }
        let mut article = Article::new(&title, &url, SOURCE_ID, SourceKind::Search, published);
        article.description = normalize_text(item.description.as_deref().unwrap_or_default());
        out.push(article);
    }
    Ok(out)
}

pub struct NewsApiClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl NewsApiClient {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    pub fn available(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn everything(
        &self,
        query: &str,
        constraints: &FetchConstraints,
    ) -> Result<Vec<Article>, FetchError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(FetchError::Recoverable("newsapi key not configured".into()));
        };
        let from = (constraints.now - constraints.lookback).to_rfc3339();
        let resp = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("q", query),
                ("apiKey", key),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", &constraints.max_per_source.min(100).to_string()),
                ("from", &from),
            ])
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited("newsapi 429".into()));
        }
        let body = resp.text().await.map_err(FetchError::from_reqwest)?;
        articles_from_response(&body, constraints)
    }
}
