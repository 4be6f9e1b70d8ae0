// src/engine.rs
//! The aggregation engine: resolves sources from the catalog, fans out
//! per-source fetches, supplements with the keyed-API fallback tiers, then
//! dedups, filters, ranks, and truncates. `fetch_recent_articles` never
//! raises; the worst outcome is an empty list.

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::cache::CacheStore;
use crate::catalog::{FeedCheck, SourceCatalog};
use crate::config::{AppConfig, FilterConfig, ScoringConfig};
use crate::dedup::{dedup_and_filter, DedupStats};
use crate::fallback::{FallbackOrchestrator, TierFetch};
use crate::fetch::newsapi::NewsApiClient;
use crate::fetch::search::SearchStrategy;
use crate::fetch::serpapi::SerpApiClient;
use crate::fetch::{build_client, fan_out, SharedStrategies, StrategySet};
use crate::model::{Article, FetchConstraints, FetchError, Source, SourceKind, Tier};
use crate::score::{rank, SourceWeights};

/// Primary keyed tier: NewsAPI `everything`.
struct PrimaryTier {
    api: NewsApiClient,
    constraints: FetchConstraints,
}

#[async_trait]
impl TierFetch for PrimaryTier {
    fn tier(&self) -> Tier {
        Tier::Primary
    }
    fn available(&self) -> bool {
        self.api.available()
    }
    async fn fetch(&self, query: &str, _want: usize) -> Result<Vec<Article>, FetchError> {
        self.api.everything(query, &self.constraints).await
    }
}

/// Secondary keyed tier: SerpAPI Google News engine.
struct SecondaryTier {
    api: SerpApiClient,
    constraints: FetchConstraints,
}

#[async_trait]
impl TierFetch for SecondaryTier {
    fn tier(&self) -> Tier {
        Tier::Secondary
    }
    fn available(&self) -> bool {
        self.api.available()
    }
    async fn fetch(&self, query: &str, _want: usize) -> Result<Vec<Article>, FetchError> {
        self.api.news(query, &self.constraints).await
    }
}

/// Dynamic-feed tier: poll the catalog's best feeds in quality order until
/// enough articles are collected. Individual feed failures are skipped.
struct DynamicFeedTier {
    strategies: SharedStrategies,
    feeds: Vec<Source>,
    constraints: FetchConstraints,
}

#[async_trait]
impl TierFetch for DynamicFeedTier {
    fn tier(&self) -> Tier {
        Tier::DynamicFeeds
    }
    fn available(&self) -> bool {
        !self.feeds.is_empty()
    }
    async fn fetch(&self, _query: &str, want: usize) -> Result<Vec<Article>, FetchError> {
        let strategy = self.strategies.for_kind(SourceKind::Feed);
        let mut collected = Vec::new();
        for feed in &self.feeds {
            match strategy.fetch(feed, &self.constraints).await {
                Ok(articles) => collected.extend(articles),
                Err(e) => {
                    debug!(source = %feed.id, error = %e, "dynamic feed skipped");
                }
            }
            if collected.len() >= want {
                break;
            }
        }
        Ok(collected)
    }
}

/// Last-resort tier: one broad query against the Google News search feed.
struct LastResortTier {
    search: SearchStrategy,
    constraints: FetchConstraints,
}

#[async_trait]
impl TierFetch for LastResortTier {
    fn tier(&self) -> Tier {
        Tier::LastResort
    }
    async fn fetch(&self, query: &str, _want: usize) -> Result<Vec<Article>, FetchError> {
        self.search.search(query, &self.constraints).await
    }
}

/// Outcome of one aggregation call.
#[derive(Debug)]
pub struct Aggregation {
    pub articles: Vec<Article>,
    pub stats: DedupStats,
    /// Fallback tier that supplemented or rescued the fan-out, if any.
    pub served_by: Option<Tier>,
}

/// Pure assembly step: dedup and filter the merged pool, rank it, truncate.
/// Split out of the engine so it can be exercised without any I/O.
pub fn assemble(
    pool: Vec<Article>,
    sources: &[Source],
    filter: &FilterConfig,
    scoring: &ScoringConfig,
    now: chrono::DateTime<Utc>,
    limit: usize,
) -> (Vec<Article>, DedupStats) {
    let (deduped, stats) = dedup_and_filter(pool, filter);
    let weights = SourceWeights::from_sources(sources);
    let mut ranked = rank(deduped, &weights, scoring, now);
    ranked.truncate(limit);
    (ranked, stats)
}

pub struct NewsEngine {
    cfg: AppConfig,
    client: reqwest::Client,
    strategies: SharedStrategies,
    cache: CacheStore,
    catalog: SourceCatalog,
}

impl NewsEngine {
    /// Build the engine from configuration. Fails only on HTTP client
    /// construction; a missing or stale catalog bootstraps from seeds.
    pub fn new(cfg: AppConfig) -> anyhow::Result<Self> {
        let client = build_client(cfg.fetch_timeout_secs).context("building http client")?;
        let strategies = std::sync::Arc::new(StrategySet::new(client.clone()));
        let cache = CacheStore::new(&cfg.cache);
        let catalog = SourceCatalog::load_or_seed(&cfg.catalog);
        Ok(Self {
            cfg,
            client,
            strategies,
            cache,
            catalog,
        })
    }

    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &AppConfig {
        &self.cfg
    }

    fn resolve_profile<'a>(&'a self, requested: &'a str) -> &'a str {
        self.cfg.profile_override.as_deref().unwrap_or(requested)
    }

    fn constraints(&self) -> FetchConstraints {
        FetchConstraints::new(
            self.cfg.filter.lookback_hours,
            self.cfg.filter.max_per_source,
            Utc::now(),
        )
    }

    /// Aggregate recent articles for a profile. Per-source failures, tier
    /// failures, and cache problems all degrade; this never raises.
    #[instrument(skip(self))]
    pub async fn fetch_recent_articles(&self, profile: &str, limit: usize) -> Aggregation {
        let profile = self.resolve_profile(profile);
        let constraints = self.constraints();
        let sources = self.catalog.get_sources_for_profile(profile);
        info!(
            profile,
            sources = sources.len(),
            lookback_hours = self.cfg.filter.lookback_hours,
            "aggregation started"
        );

        let mut pool = fan_out(
            &sources,
            &self.strategies,
            &self.cache,
            constraints,
            self.cfg.fetch_concurrency,
            std::time::Duration::from_secs(self.cfg.fetch_timeout_secs),
        )
        .await;
        debug!(count = pool.len(), "fan-out collected");

        // Keyed APIs supplement the fan-out regardless of its yield.
        let keyed = FallbackOrchestrator::new(
            vec![
                Box::new(PrimaryTier {
                    api: NewsApiClient::new(self.client.clone(), self.cfg.newsapi_key.clone()),
                    constraints,
                }),
                Box::new(SecondaryTier {
                    api: SerpApiClient::new(self.client.clone(), self.cfg.serpapi_key.clone()),
                    constraints,
                }),
            ],
            self.cfg.retry,
        );
        let keyed_outcome = keyed.run(&self.cfg.topic_query, limit).await;
        let mut served_by = keyed_outcome.served_by;
        pool.extend(keyed_outcome.articles);

        // Rescue tiers engage only when everything above produced nothing.
        if pool.is_empty() {
            warn!("fan-out and keyed tiers empty, engaging rescue tiers");
            let rescue = FallbackOrchestrator::new(
                vec![
                    Box::new(DynamicFeedTier {
                        strategies: self.strategies.clone(),
                        feeds: self.catalog.feed_sources(10),
                        constraints,
                    }),
                    Box::new(LastResortTier {
                        search: SearchStrategy::new(self.client.clone()),
                        constraints,
                    }),
                ],
                self.cfg.retry,
            );
            let rescue_outcome = rescue.run(&self.cfg.topic_query, limit).await;
            served_by = rescue_outcome.served_by;
            pool.extend(rescue_outcome.articles);
        }

        let (articles, stats) = assemble(
            pool,
            &sources,
            &self.cfg.filter,
            &self.cfg.scoring,
            constraints.now,
            limit,
        );
        info!(
            returned = articles.len(),
            duplicates = stats.duplicates,
            filtered = stats.filtered,
            domain_capped = stats.domain_capped,
            served_by = served_by.map(|t| t.as_str()).unwrap_or("fan_out"),
            "aggregation finished"
        );
        Aggregation {
            articles,
            stats,
            served_by,
        }
    }

    /// Discover new sources and re-validate existing ones, persisting the
    /// result. `force` ignores the staleness check.
    pub async fn refresh_sources(&mut self, force: bool) -> anyhow::Result<(usize, usize)> {
        if !force && !self.catalog.is_stale() {
            info!("catalog still fresh, skipping refresh");
            return Ok((0, 0));
        }
        let added = self.catalog.discover(&self.client, 10).await;
        let (updated, removed) = self.catalog.refresh(&self.client).await;
        self.catalog.save().context("saving source catalog")?;
        Ok((updated + added, removed))
    }

    /// Validate one candidate feed URL against the quality threshold.
    pub async fn test_feed(&self, url: &str) -> Option<FeedCheck> {
        crate::catalog::validate_feed_url(
            &self.client,
            url,
            self.cfg.catalog.min_quality,
            Utc::now(),
        )
        .await
    }

    /// Fetch and extract readable text for one article URL. Empty string on
    /// any failure.
    pub async fn extract_article_text(&self, url: &str) -> String {
        crate::extract::extract_article_text(&self.client, url).await
    }

    /// Drop all cached per-source results and the persisted catalog.
    pub fn clear_caches(&self) -> anyhow::Result<()> {
        self.cache.clear().context("clearing article cache")?;
        self.catalog
            .clear_persisted()
            .context("removing catalog file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn filter() -> FilterConfig {
        FilterConfig {
            lookback_hours: 24,
            max_per_source: 5,
            max_per_domain: 3,
            min_title_chars: 10,
            exclude_keywords: Vec::new(),
        }
    }

    fn source(id: &str, weight: u32, category: &str) -> Source {
        Source::new(
            id,
            &format!("https://{id}.example.com/feed"),
            SourceKind::Feed,
            weight,
            category,
        )
    }

    fn article(title: &str, url: &str, source: &str, hours_ago: i64) -> Article {
        Article::new(
            title,
            url,
            source,
            SourceKind::Feed,
            Utc::now() - Duration::hours(hours_ago),
        )
    }

    #[test]
    fn assemble_dedups_ranks_and_truncates() {
        let now = Utc::now();
        let sources = vec![source("heavy", 10, "academic"), source("light", 3, "news")];
        let pool = vec![
            article("A longer duplicate headline", "https://x.example.com/a", "light", 2),
            article(
                "A longer duplicate headline",
                "https://x.example.com/a?utm_source=rss",
                "heavy",
                1,
            ),
            article("Completely different report", "https://y.example.com/b", "heavy", 1),
            article("Third distinct storyline here", "https://z.example.com/c", "light", 20),
        ];

        let (articles, stats) = assemble(
            pool,
            &sources,
            &filter(),
            &ScoringConfig::default(),
            now,
            2,
        );

        assert_eq!(stats.duplicates, 1);
        assert_eq!(articles.len(), 2);
        // Academic weight plus category bonus outranks everything else.
        assert_eq!(articles[0].source, "heavy");
        assert!(articles[0].relevance >= articles[1].relevance);
        assert!(articles.iter().all(|a| a.relevance > 0.0));
    }

    #[test]
    fn assemble_with_empty_pool_is_empty_not_error() {
        let (articles, stats) = assemble(
            Vec::new(),
            &[],
            &filter(),
            &ScoringConfig::default(),
            Utc::now(),
            10,
        );
        assert!(articles.is_empty());
        assert_eq!(stats.duplicates, 0);
    }

    #[test]
    fn profile_override_wins_over_requested_profile() {
        let mut cfg = AppConfig::default();
        cfg.cache.enabled = false;
        cfg.profile_override = Some("quick".to_string());
        let engine = NewsEngine::new(cfg).unwrap();
        assert_eq!(engine.resolve_profile("comprehensive"), "quick");
    }
}
