// src/fetch/serpapi.rs
//! SerpAPI (Google News engine) client: the orchestrator's secondary keyed
//! tier. Provider timestamps are inconsistent, so date parsing is
//! best-effort with a fetch-time fallback.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::dedup::normalize_text;
use crate::model::{Article, FetchConstraints, FetchError, SourceKind};

const ENDPOINT: &str = "https://serpapi.com/search";
pub const SOURCE_ID: &str = "serpapi";

#[derive(Debug, Deserialize)]
struct Envelope {
    error: Option<String>,
    #[serde(default)]
    news_results: Vec<NewsResult>,
}

#[derive(Debug, Deserialize)]
struct NewsResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
    date: Option<String>,
    #[serde(default)]
    source: SourceField,
}

/// The `source` field is a `{name: ...}` object on newer responses and a
/// bare string on older ones.
#[derive(Debug, Deserialize, Default)]
#[serde(untagged)]
enum SourceField {
    #[default]
    Missing,
    Name(String),
    Object {
        name: Option<String>,
    },
}

impl SourceField {
    fn name(&self) -> Option<&str> {
        match self {
            SourceField::Missing => None,
            SourceField::Name(s) => Some(s.as_str()),
            SourceField::Object { name } => name.as_deref(),
        }
    }
}

/// SerpAPI date strings come as RFC 3339 or `07/25/2026, 10:00 AM, +0000
/// UTC`; anything else falls back to `now`.
fn parse_serp_date(raw: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let t = raw.trim().trim_end_matches(" UTC");
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = DateTime::parse_from_str(t, "%m/%d/%Y, %I:%M %p, %z") {
        return dt.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(t, "%m/%d/%Y, %I:%M %p") {
        return naive.and_utc();
    }
    now
}

/// Parse a SerpAPI response body. Error envelopes that smell like quota
/// exhaustion become rate-limit signals.
pub fn articles_from_response(
    body: &str,
    constraints: &FetchConstraints,
) -> Result<Vec<Article>, FetchError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| FetchError::Recoverable(format!("serpapi json parse: {e}")))?;

    if let Some(message) = envelope.error {
        let lowered = message.to_lowercase();
        if lowered.contains("rate") || lowered.contains("run out of searches") {
            return Err(FetchError::RateLimited(message));
        }
        return Err(FetchError::Recoverable(format!("serpapi error: {message}")));
    }

    let mut out = Vec::new();
    for item in envelope.news_results {
        if out.len() >= constraints.max_per_source {
            break;
        }
        let title = normalize_text(item.title.as_deref().unwrap_or_default());
        if title.is_empty() {
            continue;
        }
        let Some(link) = item.link.filter(|l| !l.trim().is_empty()) else {
            continue;
        };
        let published = item
            .date
            .as_deref()
            .map(|d| parse_serp_date(d, constraints.now))
            .unwrap_or(constraints.now);
        if !constraints.within_window(published) {
            continue;
        }
        let mut article = Article::new(&title, &link, SOURCE_ID, SourceKind::Search, published);
        article.description = normalize_text(item.snippet.as_deref().unwrap_or_default());
        if let Some(name) = item.source.name() {
            if !article.description.is_empty() {
                article.description.push_str(" — ");
            }
            article.description.push_str(name);
        }
        out.push(article);
    }
    Ok(out)
}

pub struct SerpApiClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl SerpApiClient {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    pub fn available(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn news(
        &self,
        query: &str,
        constraints: &FetchConstraints,
    ) -> Result<Vec<Article>, FetchError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(FetchError::Recoverable("serpapi key not configured".into()));
        };
        let resp = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("q", query),
                ("api_key", key),
                ("engine", "google_news"),
                ("gl", "us"),
                ("hl", "en"),
                ("num", &constraints.max_per_source.min(100).to_string()),
            ])
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited("serpapi 429".into()));
        }
        let body = resp.text().await.map_err(FetchError::from_reqwest)?;
        articles_from_response(&body, constraints)
    }
}
