// src/catalog.rs
//! Dynamic source catalog: seed bootstrap, feed validation and scoring,
//! discovery of new named sources, periodic refresh with expiry of dead
//! feeds, JSON persistence, and profile resolution. The catalog is an
//! explicit object constructed once at startup and passed by reference; it
//! is the single writer of its persistence file.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::fetch::feed::{parse_feed_xml, ParsedFeed};
use crate::fetch::search::google_news_search_url;
use crate::model::{Source, SourceKind};

/// Domain vocabulary used for topical-relevance scoring.
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "artificial intelligence",
    "machine learning",
    "deep learning",
    "neural network",
    "llm",
    "gpt",
    "transformer",
    "ai model",
    "generative ai",
    "chatgpt",
    "computer vision",
    "nlp",
    "natural language",
    "reinforcement learning",
    "ai research",
    "ai development",
    "ai application",
    "ai ethics",
];

/// Fixed queries probed against the search aggregator during discovery.
/// Only the first two are used per run, to stay under provider rate limits.
const TRENDING_QUERIES: &[&str] = &[
    "artificial intelligence news",
    "machine learning research",
    "AI breakthrough",
    "generative AI developments",
];

const DISCOVERY_QUERY_LIMIT: usize = 2;
const DISCOVERY_ITEMS_PER_QUERY: usize = 5;
const SEED_QUALITY: f64 = 0.8;
const DISCOVERED_QUALITY: f64 = 0.7;

/// Static seed catalog used to bootstrap when no persisted catalog exists.
pub fn seed_sources() -> Vec<Source> {
    let entries: &[(&str, &str, SourceKind, u32, &str)] = &[
        (
            "arxiv",
            "http://export.arxiv.org/api/query?search_query=cat:cs.AI+OR+cat:cs.LG+OR+cat:cs.CL&start=0&max_results=50&sortBy=submittedDate&sortOrder=descending",
            SourceKind::AcademicApi,
            10,
            "academic",
        ),
        ("mit_news", "https://news.mit.edu/topic/artificial-intelligence2-rss", SourceKind::Feed, 9, "academic"),
        ("stanford_hai", "https://hai.stanford.edu/news/rss.xml", SourceKind::Feed, 9, "academic"),
        ("berkeley_ai", "https://bair.berkeley.edu/blog/feed.xml", SourceKind::Feed, 9, "academic"),
        ("distill_pub", "https://distill.pub/rss.xml", SourceKind::Feed, 8, "academic"),
        ("papers_with_code", "https://paperswithcode.com/latest", SourceKind::Scrape, 8, "academic"),
        ("openai_blog", "https://openai.com/blog/rss.xml", SourceKind::Feed, 10, "industry"),
        ("deepmind_blog", "https://deepmind.google/blog/rss.xml", SourceKind::Feed, 10, "industry"),
        ("anthropic_news", "https://www.anthropic.com/news", SourceKind::Scrape, 10, "industry"),
        ("meta_ai", "https://ai.meta.com/blog/rss/", SourceKind::Feed, 9, "industry"),
        ("google_ai_blog", "https://blog.google/technology/ai/rss/", SourceKind::Feed, 9, "industry"),
        ("microsoft_ai", "https://blogs.microsoft.com/ai/feed/", SourceKind::Feed, 9, "industry"),
        ("nvidia_blog", "https://blogs.nvidia.com/feed/", SourceKind::Feed, 8, "industry"),
        ("huggingface_blog", "https://huggingface.co/blog/feed.xml", SourceKind::Feed, 8, "industry"),
        ("techcrunch_ai", "https://techcrunch.com/category/artificial-intelligence/feed/", SourceKind::Feed, 8, "news"),
        ("venturebeat_ai", "https://venturebeat.com/category/ai/feed/", SourceKind::Feed, 8, "news"),
        ("mit_tech_review", "https://www.technologyreview.com/topic/artificial-intelligence/feed/", SourceKind::Feed, 9, "news"),
        ("wired_ai", "https://www.wired.com/feed/tag/ai/latest/rss", SourceKind::Feed, 7, "news"),
        ("the_verge_ai", "https://www.theverge.com/ai-artificial-intelligence/rss/index.xml", SourceKind::Feed, 7, "news"),
        (
            "hacker_news_ai",
            "https://hn.algolia.com/api/v1/search_by_date?tags=story&query=AI%7Cartificial%20intelligence%7Cmachine%20learning%7CLLM",
            SourceKind::CommunityApi,
            7,
            "community",
        ),
        ("import_ai", "https://jack-clark.net/feed/", SourceKind::Feed, 8, "community"),
        ("ai_weekly", "https://aiweekly.co/feed/", SourceKind::Feed, 7, "community"),
    ];

    entries
        .iter()
        .map(|(id, url, kind, weight, category)| {
            let mut s = Source::new(id, url, *kind, *weight, category);
            s.quality_score = SEED_QUALITY;
            s
        })
        .collect()
}

/// Validation result for one candidate feed.
#[derive(Debug, Clone)]
pub struct FeedCheck {
    pub title: String,
    pub description: String,
    pub entry_count: usize,
    pub latest_update: Option<DateTime<Utc>>,
    pub freshness_score: f64,
    pub topical_relevance: f64,
    pub quality_score: f64,
}

/// Score a parsed feed: freshness decays to zero over 30 days of silence
/// (0.5 when the newest item has no parsable date), topical relevance is
/// keyword hits over channel metadata plus the newest 5 item titles,
/// normalized by 5 and capped at 1.0.
pub fn evaluate_feed(parsed: &ParsedFeed, now: DateTime<Utc>) -> FeedCheck {
    let latest_update = parsed.items.iter().filter_map(|i| i.published).max();
    let freshness_score = match latest_update {
        Some(latest) => {
            let age_days = now.signed_duration_since(latest).num_seconds().max(0) as f64 / 86_400.0;
            (1.0 - age_days / 30.0).max(0.0)
        }
        None => 0.5,
    };

    let sample = {
        let mut s = format!("{} {}", parsed.title, parsed.description);
        for item in parsed.items.iter().take(5) {
            s.push(' ');
            s.push_str(&item.title);
        }
        s.to_lowercase()
    };
    let hits = DOMAIN_KEYWORDS.iter().filter(|kw| sample.contains(*kw)).count();
    let topical_relevance = (hits as f64 / 5.0).min(1.0);

    let quality_score = freshness_score * 0.6 + topical_relevance * 0.4;

    FeedCheck {
        title: parsed.title.clone(),
        description: parsed.description.chars().take(200).collect(),
        entry_count: parsed.items.len(),
        latest_update,
        freshness_score,
        topical_relevance,
        quality_score,
    }
}

/// Fetch and validate one candidate feed URL. `None` means unreachable,
/// unparsable, empty, or below the minimum quality.
pub async fn validate_feed_url(
    client: &reqwest::Client,
    url: &str,
    min_quality: f64,
    now: DateTime<Utc>,
) -> Option<FeedCheck> {
    let body = match crate::fetch::http_get_text(client, url).await {
        Ok(b) => b,
        Err(e) => {
            debug!(url, error = %e, "candidate feed unreachable");
            return None;
        }
    };
    let parsed = match parse_feed_xml(&body) {
        Ok(p) => p,
        Err(e) => {
            debug!(url, error = %e, "candidate feed unparsable");
            return None;
        }
    };
    if parsed.items.is_empty() {
        debug!(url, "candidate feed has no entries");
        return None;
    }
    let check = evaluate_feed(&parsed, now);
    if check.quality_score < min_quality {
        debug!(url, quality = check.quality_score, "candidate below quality threshold");
        return None;
    }
    Some(check)
}

fn short_hash_id(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogRecord {
    url: String,
    #[serde(rename = "type")]
    kind: SourceKind,
    #[serde(default)]
    category: String,
    #[serde(default)]
    quality_score: f64,
    #[serde(default)]
    freshness_score: f64,
    #[serde(default)]
    topical_relevance: f64,
    #[serde(default)]
    validated_at: Option<DateTime<Utc>>,
    /// Static weight for seed sources; discovered sources derive theirs
    /// from quality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    cached_at: DateTime<Utc>,
    sources: BTreeMap<String, CatalogRecord>,
}

pub struct SourceCatalog {
    cfg: CatalogConfig,
    sources: BTreeMap<String, CatalogRecord>,
    cached_at: DateTime<Utc>,
}

impl SourceCatalog {
    /// Load the persisted catalog if it exists and is younger than the
    /// refresh interval; otherwise bootstrap from the seed catalog. A
    /// stale file is still loaded (so `refresh` has something to
    /// re-validate) but `is_stale` reports it.
    pub fn load_or_seed(cfg: &CatalogConfig) -> Self {
        match Self::load_file(cfg) {
            Some((cached_at, sources)) if !sources.is_empty() => {
                info!(count = sources.len(), "loaded source catalog");
                Self {
                    cfg: cfg.clone(),
                    sources,
                    cached_at,
                }
            }
            _ => {
                info!("bootstrapping source catalog from seeds");
                Self::seeded(cfg)
            }
        }
    }

    fn seeded(cfg: &CatalogConfig) -> Self {
        let mut sources = BTreeMap::new();
        for seed in seed_sources() {
            sources.insert(
                seed.id.clone(),
                CatalogRecord {
                    url: seed.url,
                    kind: seed.kind,
                    category: seed.category,
                    quality_score: seed.quality_score,
                    freshness_score: 0.0,
                    topical_relevance: 0.0,
                    validated_at: None,
                    weight: Some(seed.weight),
                    name: None,
                },
            );
        }
        Self {
            cfg: cfg.clone(),
            sources,
            // Epoch-old so a seeded catalog always counts as stale.
            cached_at: DateTime::<Utc>::from_timestamp(0, 0).unwrap_or_else(Utc::now),
        }
    }

    fn load_file(cfg: &CatalogConfig) -> Option<(DateTime<Utc>, BTreeMap<String, CatalogRecord>)> {
        let raw = std::fs::read_to_string(&cfg.path).ok()?;
        match serde_json::from_str::<CatalogFile>(&raw) {
            Ok(file) => Some((file.cached_at, file.sources)),
            Err(e) => {
                warn!(path = %cfg.path.display(), error = %e, "catalog file unreadable, reseeding");
                None
            }
        }
    }

    /// True when the persisted snapshot is older than the refresh interval.
    pub fn is_stale(&self) -> bool {
        Utc::now().signed_duration_since(self.cached_at)
            > chrono::Duration::hours(self.cfg.refresh_hours)
    }

    /// Persist the catalog (temp file + rename). The catalog is the single
    /// writer of this file.
    pub fn save(&mut self) -> Result<()> {
        self.cached_at = Utc::now();
        let file = CatalogFile {
            cached_at: self.cached_at,
            sources: self.sources.clone(),
        };
        if let Some(parent) = self.cfg.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let body = serde_json::to_vec_pretty(&file)?;
        let tmp = self.cfg.path.with_extension("tmp");
        std::fs::write(&tmp, body).with_context(|| format!("writing {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.cfg.path)
            .with_context(|| format!("renaming into {}", self.cfg.path.display()))?;
        debug!(count = self.sources.len(), "catalog persisted");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn to_source(id: &str, record: &CatalogRecord) -> Source {
        let weight = record
            .weight
            .unwrap_or_else(|| (record.quality_score * 10.0).round().clamp(0.0, 12.0) as u32);
        Source {
            id: id.to_string(),
            url: record.url.clone(),
            kind: record.kind,
            weight,
            category: record.category.clone(),
            quality_score: record.quality_score,
            freshness_score: record.freshness_score,
            topical_relevance: record.topical_relevance,
            validated_at: record.validated_at,
        }
    }

    /// All sources above the quality threshold, best first.
    pub fn top_sources(&self, limit: usize) -> Vec<Source> {
        let mut all: Vec<Source> = self
            .sources
            .iter()
            .map(|(id, r)| Self::to_source(id, r))
            .filter(|s| s.quality_score >= self.cfg.min_quality)
            .collect();
        all.sort_by(|a, b| {
            b.quality_score
                .partial_cmp(&a.quality_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        all.truncate(limit);
        all
    }

    /// Resolve a profile to its weighted source set: quick = 5, balanced =
    /// 15, comprehensive = everything above threshold, anything else = 10.
    /// Custom configured feeds join every profile.
    pub fn get_sources_for_profile(&self, profile: &str) -> Vec<Source> {
        let limit = match profile.to_ascii_lowercase().as_str() {
            "quick" => 5,
            "balanced" => 15,
            "comprehensive" => usize::MAX,
            _ => 10,
        };
        let mut sources = self.top_sources(limit);
        for (idx, url) in self.cfg.custom_sources.iter().enumerate() {
            let mut custom = Source::new(
                &format!("custom_{idx}"),
                url,
                SourceKind::Feed,
                5,
                "custom",
            );
            custom.quality_score = self.cfg.min_quality;
            sources.push(custom);
        }
        sources
    }

    /// Feed-kind sources only, best first; the orchestrator's dynamic-feed
    /// tier polls these.
    pub fn feed_sources(&self, limit: usize) -> Vec<Source> {
        let mut feeds: Vec<Source> = self
            .sources
            .iter()
            .map(|(id, r)| Self::to_source(id, r))
            .filter(|s| s.kind == SourceKind::Feed && s.quality_score >= self.cfg.min_quality)
            .collect();
        feeds.sort_by(|a, b| {
            b.quality_score
                .partial_cmp(&a.quality_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        feeds.truncate(limit);
        feeds
    }

    fn apply_check(record: &mut CatalogRecord, check: &FeedCheck, now: DateTime<Utc>) {
        record.quality_score = check.quality_score;
        record.freshness_score = check.freshness_score;
        record.topical_relevance = check.topical_relevance;
        record.validated_at = Some(now);
        if record.name.is_none() && !check.title.is_empty() {
            record.name = Some(check.title.clone());
        }
    }

    /// Validate seeds missing from the catalog and probe the trending
    /// queries for new named sources. Returns how many sources were added.
    pub async fn discover(&mut self, client: &reqwest::Client, max_new: usize) -> usize {
        let now = Utc::now();
        let mut added = 0;

        // Seeds that dropped out (or were never present) get revalidated in.
        for seed in seed_sources() {
            if added >= max_new {
                break;
            }
            if self.sources.contains_key(&seed.id) {
                continue;
            }
            if seed.kind != SourceKind::Feed {
                // Non-feed seeds cannot be validated as feeds; re-add as-is.
                self.sources.insert(
                    seed.id.clone(),
                    CatalogRecord {
                        url: seed.url,
                        kind: seed.kind,
                        category: seed.category,
                        quality_score: SEED_QUALITY,
                        freshness_score: 0.0,
                        topical_relevance: 0.0,
                        validated_at: None,
                        weight: Some(seed.weight),
                        name: None,
                    },
                );
                added += 1;
                continue;
            }
            if let Some(check) = validate_feed_url(client, &seed.url, self.cfg.min_quality, now).await
            {
                let mut record = CatalogRecord {
                    url: seed.url,
                    kind: SourceKind::Feed,
                    category: seed.category,
                    quality_score: 0.0,
                    freshness_score: 0.0,
                    topical_relevance: 0.0,
                    validated_at: None,
                    weight: Some(seed.weight),
                    name: None,
                };
                Self::apply_check(&mut record, &check, now);
                self.sources.insert(seed.id, record);
                added += 1;
            }
        }

        // Surface new named publishers from the search aggregator.
        for query in TRENDING_QUERIES.iter().take(DISCOVERY_QUERY_LIMIT) {
            if added >= max_new {
                break;
            }
            let url = google_news_search_url(query);
            let body = match crate::fetch::http_get_text(client, &url).await {
                Ok(b) => b,
                Err(e) => {
                    debug!(query, error = %e, "discovery query failed");
                    continue;
                }
            };
            let Ok(parsed) = parse_feed_xml(&body) else {
                continue;
            };
            for item in parsed.items.iter().take(DISCOVERY_ITEMS_PER_QUERY) {
                if added >= max_new {
                    break;
                }
                let Some(name) = item.source_name.as_deref().filter(|n| !n.is_empty()) else {
                    continue;
                };
                let id = short_hash_id(name);
                if self.sources.contains_key(&id) {
                    continue;
                }
                self.sources.insert(
                    id,
                    CatalogRecord {
                        url: url.clone(),
                        kind: SourceKind::Search,
                        category: "discovered".to_string(),
                        quality_score: DISCOVERED_QUALITY,
                        freshness_score: 0.0,
                        topical_relevance: 0.0,
                        validated_at: Some(now),
                        weight: None,
                        name: Some(name.to_string()),
                    },
                );
                added += 1;
            }
        }

        info!(added, total = self.sources.len(), "source discovery finished");
        added
    }

    /// Re-validate every feed-kind source; unreachable, empty, or
    /// below-threshold feeds are removed. Returns (updated, removed).
    pub async fn refresh(&mut self, client: &reqwest::Client) -> (usize, usize) {
        let now = Utc::now();
        let ids: Vec<String> = self.sources.keys().cloned().collect();
        let mut updated = 0;
        let mut removed = 0;

        for id in ids {
            let Some(record) = self.sources.get(&id) else {
                continue;
            };
            if record.kind != SourceKind::Feed {
                continue;
            }
            let url = record.url.clone();
            match validate_feed_url(client, &url, self.cfg.min_quality, now).await {
                Some(check) => {
                    if let Some(record) = self.sources.get_mut(&id) {
                        Self::apply_check(record, &check, now);
                        updated += 1;
                    }
                }
                None => {
                    warn!(source = %id, url = %url, "removing dead source");
                    self.sources.remove(&id);
                    removed += 1;
                }
            }
        }

        info!(updated, removed, total = self.sources.len(), "source refresh finished");
        (updated, removed)
    }

    /// Snapshot of every record as a `Source`, for `show`/`export`.
    pub fn all_sources(&self) -> Vec<Source> {
        let mut all: Vec<Source> = self
            .sources
            .iter()
            .map(|(id, r)| Self::to_source(id, r))
            .collect();
        all.sort_by(|a, b| {
            b.quality_score
                .partial_cmp(&a.quality_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        all
    }

    /// Drop the persisted catalog file.
    pub fn clear_persisted(&self) -> std::io::Result<bool> {
        match std::fs::remove_file(&self.cfg.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::feed::FeedItem;
    use chrono::Duration;

    fn cfg(dir: &std::path::Path) -> CatalogConfig {
        CatalogConfig {
            path: dir.join("dynamic_sources.json"),
            refresh_hours: 24,
            min_quality: 0.6,
            custom_sources: Vec::new(),
        }
    }

    fn parsed_feed(newest_age_days: i64, titles: &[&str]) -> ParsedFeed {
        let now = Utc::now();
        ParsedFeed {
            title: "Example AI Research Blog".to_string(),
            description: "machine learning and deep learning notes".to_string(),
            items: titles
                .iter()
                .enumerate()
                .map(|(i, t)| FeedItem {
                    title: t.to_string(),
                    link: Some(format!("https://example.com/{i}")),
                    published: Some(now - Duration::days(newest_age_days + i as i64)),
                    summary: String::new(),
                    source_name: None,
                })
                .collect(),
        }
    }

    #[test]
    fn quality_combines_freshness_and_topical_relevance() {
        let parsed = parsed_feed(
            0,
            &["new llm benchmark", "gpt agents", "neural network pruning"],
        );
        let check = evaluate_feed(&parsed, Utc::now());
        assert!(check.freshness_score > 0.99);
        // At least 5 keyword hits across channel metadata and item titles.
        assert!((check.topical_relevance - 1.0).abs() < 1e-9);
        assert!((check.quality_score - (check.freshness_score * 0.6 + 0.4)).abs() < 1e-9);
        assert!(check.quality_score <= 1.0 && check.quality_score >= 0.0);
    }

    #[test]
    fn feed_silent_for_45_days_has_zero_freshness_and_fails_threshold() {
        let parsed = parsed_feed(45, &["machine learning retrospective"]);
        let check = evaluate_feed(&parsed, Utc::now());
        assert_eq!(check.freshness_score, 0.0);
        assert!(check.quality_score < 0.6);
    }

    #[test]
    fn feed_without_dates_gets_half_freshness() {
        let mut parsed = parsed_feed(0, &["some ai update"]);
        for item in parsed.items.iter_mut() {
            item.published = None;
        }
        let check = evaluate_feed(&parsed, Utc::now());
        assert!((check.freshness_score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn seeded_catalog_is_stale_and_profiles_resolve() {
        let tmp = tempfile::tempdir().unwrap();
        let catalog = SourceCatalog::seeded(&cfg(tmp.path()));
        assert!(catalog.is_stale());
        assert!(catalog.len() > 15);

        let quick = catalog.get_sources_for_profile("quick");
        assert_eq!(quick.len(), 5);
        let balanced = catalog.get_sources_for_profile("balanced");
        assert_eq!(balanced.len(), 15);
        let comprehensive = catalog.get_sources_for_profile("comprehensive");
        assert_eq!(comprehensive.len(), catalog.len());
        // Every resolved source sits above the threshold.
        assert!(comprehensive.iter().all(|s| s.quality_score >= 0.6));
    }

    #[test]
    fn save_and_reload_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let c = cfg(tmp.path());
        let mut catalog = SourceCatalog::seeded(&c);
        catalog.save().unwrap();

        let reloaded = SourceCatalog::load_or_seed(&c);
        assert_eq!(reloaded.len(), catalog.len());
        assert!(!reloaded.is_stale());
    }

    #[test]
    fn below_threshold_sources_are_excluded_from_profiles() {
        let tmp = tempfile::tempdir().unwrap();
        let mut catalog = SourceCatalog::seeded(&cfg(tmp.path()));
        // Degrade one source below the threshold.
        let record = catalog.sources.get_mut("wired_ai").unwrap();
        record.quality_score = 0.2;
        let all = catalog.get_sources_for_profile("comprehensive");
        assert!(all.iter().all(|s| s.id != "wired_ai"));
    }

    #[test]
    fn custom_sources_join_every_profile() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = cfg(tmp.path());
        c.custom_sources = vec!["https://custom.example.com/feed".to_string()];
        let catalog = SourceCatalog::seeded(&c);
        let quick = catalog.get_sources_for_profile("quick");
        assert_eq!(quick.len(), 6);
        let custom = quick.iter().find(|s| s.id == "custom_0").unwrap();
        assert_eq!(custom.category, "custom");
        assert_eq!(custom.weight, 5);
    }

    #[test]
    fn feed_sources_are_feed_kind_only() {
        let tmp = tempfile::tempdir().unwrap();
        let catalog = SourceCatalog::seeded(&cfg(tmp.path()));
        let feeds = catalog.feed_sources(50);
        assert!(!feeds.is_empty());
        assert!(feeds.iter().all(|s| s.kind == SourceKind::Feed));
    }

    #[test]
    fn discovered_ids_are_short_stable_hashes() {
        let a = short_hash_id("Example Tech Daily");
        let b = short_hash_id("Example Tech Daily");
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
    }
}
