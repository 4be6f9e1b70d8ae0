// src/model.rs
//! Core data types shared across the aggregation pipeline: normalized
//! articles, catalog sources, fetch constraints, and the error taxonomy.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of fetch kinds. Strategy selection is an exhaustive match on
/// this enum, so adding a kind fails to compile until a strategy exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Feed,
    AcademicApi,
    CommunityApi,
    Scrape,
    Search,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Feed => "feed",
            SourceKind::AcademicApi => "academic_api",
            SourceKind::CommunityApi => "community_api",
            SourceKind::Scrape => "scrape",
            SourceKind::Search => "search",
        }
    }
}

/// One configured upstream provider of articles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Source {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// Static weight on the 0..=12 scale used by the relevance scorer.
    pub weight: u32,
    pub category: String,
    #[serde(default)]
    pub quality_score: f64,
    #[serde(default)]
    pub freshness_score: f64,
    #[serde(default)]
    pub topical_relevance: f64,
    #[serde(default)]
    pub validated_at: Option<DateTime<Utc>>,
}

impl Source {
    pub fn new(id: &str, url: &str, kind: SourceKind, weight: u32, category: &str) -> Self {
        Self {
            id: id.to_string(),
            url: url.to_string(),
            kind,
            weight,
            category: category.to_string(),
            quality_score: 0.0,
            freshness_score: 0.0,
            topical_relevance: 0.0,
            validated_at: None,
        }
    }
}

/// Fallback tier that served (or attempted to serve) a logical query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Primary,
    Secondary,
    DynamicFeeds,
    LastResort,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Primary => "primary",
            Tier::Secondary => "secondary",
            Tier::DynamicFeeds => "dynamic_feeds",
            Tier::LastResort => "last_resort",
        }
    }
}

/// One normalized news item. Canonical identity is the canonical URL, or a
/// normalized-title hash when the URL is absent (see `dedup`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub title: String,
    pub url: String,
    /// Id of the originating source (catalog id or provider name).
    pub source: String,
    pub kind: SourceKind,
    pub published: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    /// Engagement metric (points/score) when the provider exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement: Option<u32>,
    /// Assigned once during ranking; 0.0 until then.
    #[serde(default)]
    pub relevance: f64,
    /// Fallback tier that produced this article, when it came through the
    /// orchestrator rather than the per-source fan-out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    pub fetched_at: DateTime<Utc>,
}

impl Article {
    pub fn new(
        title: &str,
        url: &str,
        source: &str,
        kind: SourceKind,
        published: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            source: source.to_string(),
            kind,
            published,
            description: String::new(),
            engagement: None,
            relevance: 0.0,
            tier: None,
            fetched_at: Utc::now(),
        }
    }
}

/// Per-fetch constraints carried into every strategy call.
#[derive(Debug, Clone, Copy)]
pub struct FetchConstraints {
    /// Items older than `now - lookback` are dropped by the strategy.
    pub lookback: Duration,
    /// Per-source article cap applied after the lookback filter.
    pub max_per_source: usize,
    /// Reference clock for the lookback window; injected for determinism.
    pub now: DateTime<Utc>,
}

impl FetchConstraints {
    pub fn new(lookback_hours: i64, max_per_source: usize, now: DateTime<Utc>) -> Self {
        Self {
            lookback: Duration::hours(lookback_hours),
            max_per_source,
            now,
        }
    }

    /// True when `published` falls inside the lookback window.
    pub fn within_window(&self, published: DateTime<Utc>) -> bool {
        self.now.signed_duration_since(published) <= self.lookback
    }
}

/// Error taxonomy for fetch operations. Only `Fatal` may ever propagate out
/// of the core, and nothing in the current pipeline produces one.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transient network/DNS/timeout failure; the source contributes zero
    /// articles for this call and the orchestrator may escalate.
    #[error("recoverable: {0}")]
    Recoverable(String),
    /// Provider signaled rate limiting; retried with backoff within the
    /// same fallback tier before escalating.
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("fatal: {0}")]
    Fatal(String),
}

impl FetchError {
    /// Classify a transport error. DNS/connect/timeout problems are
    /// recoverable; HTTP 429 is a rate-limit signal.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS) {
            return FetchError::RateLimited(e.to_string());
        }
        FetchError::Recoverable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_includes_recent_and_excludes_old() {
        let now = Utc::now();
        let c = FetchConstraints::new(24, 5, now);
        assert!(c.within_window(now - Duration::hours(23)));
        assert!(!c.within_window(now - Duration::hours(25)));
    }

    #[test]
    fn source_kind_round_trips_through_serde() {
        let s = serde_json::to_string(&SourceKind::AcademicApi).unwrap();
        assert_eq!(s, "\"academic_api\"");
        let k: SourceKind = serde_json::from_str(&s).unwrap();
        assert_eq!(k, SourceKind::AcademicApi);
    }
}
