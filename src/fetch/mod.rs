// src/fetch/mod.rs
//! Fetch strategies: one polymorphic unit per source kind, plus the
//! bounded-concurrency fan-out that drives them. Strategies are pure
//! `(endpoint, constraints) -> articles` functions over a shared HTTP
//! client; they own no long-lived state.

pub mod arxiv;
pub mod community;
pub mod feed;
pub mod newsapi;
pub mod scrape;
pub mod search;
pub mod serpapi;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::{cache_key, CacheStore};
use crate::model::{Article, FetchConstraints, FetchError, Source, SourceKind};

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("fetch_articles_total", "Articles parsed from providers.");
        describe_counter!("fetch_errors_total", "Provider fetch/parse errors.");
        describe_counter!("fetch_timeouts_total", "Per-source fetches abandoned on timeout.");
        describe_counter!("fetch_cache_hits_total", "Per-source cache hits.");
        describe_histogram!("fetch_parse_ms", "Provider parse time in milliseconds.");
    });
}

/// A fetch strategy for one source kind.
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    async fn fetch(
        &self,
        source: &Source,
        constraints: &FetchConstraints,
    ) -> Result<Vec<Article>, FetchError>;

    fn kind(&self) -> SourceKind;
}

/// GET a URL as text, mapping transport failures onto the error taxonomy.
pub(crate) async fn http_get_text(
    client: &reqwest::Client,
    url: &str,
) -> Result<String, FetchError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(FetchError::from_reqwest)?;
    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(FetchError::RateLimited(format!("429 from {url}")));
    }
    if !resp.status().is_success() {
        return Err(FetchError::Recoverable(format!(
            "{} from {url}",
            resp.status()
        )));
    }
    resp.text().await.map_err(FetchError::from_reqwest)
}

/// The closed strategy table. `for_kind` is an exhaustive match, so the
/// compiler enforces one strategy per kind.
pub struct StrategySet {
    feed: feed::FeedStrategy,
    academic: arxiv::ArxivStrategy,
    community: community::CommunityStrategy,
    scrape: scrape::ScrapeStrategy,
    search: search::SearchStrategy,
}

impl StrategySet {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            feed: feed::FeedStrategy::new(client.clone()),
            academic: arxiv::ArxivStrategy::new(client.clone()),
            community: community::CommunityStrategy::new(client.clone()),
            scrape: scrape::ScrapeStrategy::new(client.clone()),
            search: search::SearchStrategy::new(client),
        }
    }

    pub fn for_kind(&self, kind: SourceKind) -> &dyn FetchStrategy {
        match kind {
            SourceKind::Feed => &self.feed,
            SourceKind::AcademicApi => &self.academic,
            SourceKind::CommunityApi => &self.community,
            SourceKind::Scrape => &self.scrape,
            SourceKind::Search => &self.search,
        }
    }
}

/// Fan out one fetch per source with bounded concurrency, consulting the
/// cache before and writing it after each successful fetch. Timeouts and
/// recoverable errors contribute nothing; nothing here escalates.
pub async fn fan_out(
    sources: &[Source],
    strategies: &StrategySet,
    cache: &CacheStore,
    constraints: FetchConstraints,
    concurrency: usize,
    timeout: std::time::Duration,
) -> Vec<Article> {
    ensure_metrics_described();

    let results = stream::iter(sources.iter())
        .map(|source| async move {
            let key = cache_key(&source.id, &source.url);
            if let Some(cached) = cache.get(&key) {
                counter!("fetch_cache_hits_total").increment(1);
                debug!(source = %source.id, count = cached.len(), "cache hit");
                return cached;
            }

            let strategy = strategies.for_kind(source.kind);
            match tokio::time::timeout(timeout, strategy.fetch(source, &constraints)).await {
                Ok(Ok(articles)) => {
                    counter!("fetch_articles_total").increment(articles.len() as u64);
                    if !articles.is_empty() {
                        cache.put(&key, &articles);
                    }
                    debug!(source = %source.id, count = articles.len(), "fetched");
                    articles
                }
                Ok(Err(e)) => {
                    counter!("fetch_errors_total").increment(1);
                    warn!(source = %source.id, error = %e, "source contributed nothing");
                    Vec::new()
                }
                Err(_) => {
                    counter!("fetch_timeouts_total").increment(1);
                    warn!(source = %source.id, ?timeout, "fetch timed out");
                    Vec::new()
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<Vec<Article>>>()
        .await;

    results.into_iter().flatten().collect()
}

/// Shared HTTP client for all strategies: browser-ish user agent (several
/// feed hosts reject the default one) and a hard request timeout.
pub fn build_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (compatible; ai-news-aggregator/0.1)")
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
}

// Arc alias used by engine wiring.
pub type SharedStrategies = Arc<StrategySet>;
