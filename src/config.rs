// src/config.rs
//! Environment-driven configuration. Every knob has a safe default so the
//! engine boots with no environment at all; unparsable values fall back to
//! the default instead of erroring.

use serde::Deserialize;

// --- env names ---
pub const ENV_CACHE_ENABLED: &str = "ENABLE_CACHING";
pub const ENV_CACHE_TTL: &str = "CACHE_TTL";
pub const ENV_CACHE_DIR: &str = "CACHE_DIR";
pub const ENV_LOOKBACK_HOURS: &str = "LOOKBACK_HOURS";
pub const ENV_MAX_PER_SOURCE: &str = "MAX_PER_SOURCE";
pub const ENV_MAX_PER_DOMAIN: &str = "MAX_PER_DOMAIN";
pub const ENV_MIN_TITLE_CHARS: &str = "MIN_TITLE_CHARS";
pub const ENV_EXCLUDE_KEYWORDS: &str = "EXCLUDE_KEYWORDS";
pub const ENV_MIN_SOURCE_SCORE: &str = "MIN_SOURCE_SCORE";
pub const ENV_SOURCE_REFRESH_HOURS: &str = "SOURCE_REFRESH_HOURS";
pub const ENV_SOURCES_CACHE_PATH: &str = "SOURCES_CACHE_PATH";
pub const ENV_NEWSAPI_KEY: &str = "NEWSAPI_KEY";
pub const ENV_SERPAPI_KEY: &str = "SERPAPI_KEY";
pub const ENV_RATE_LIMIT_RETRIES: &str = "RATE_LIMIT_RETRIES";
pub const ENV_BACKOFF_BASE_SECS: &str = "BACKOFF_BASE_SECS";
pub const ENV_PROVIDER_PACE_MS: &str = "PROVIDER_PACE_MS";
pub const ENV_FETCH_CONCURRENCY: &str = "FETCH_CONCURRENCY";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_TOPIC_QUERY: &str = "TOPIC_QUERY";
pub const ENV_FEED_PROFILE: &str = "FEED_PROFILE";
pub const ENV_CUSTOM_SOURCES: &str = "CUSTOM_NEWS_SOURCES";

const DEFAULT_TOPIC_QUERY: &str =
    "artificial intelligence OR machine learning OR AI OR deep learning";

/// Get an environment variable with surrounding quotes stripped. Deployment
/// env files frequently quote values; a quoted key would silently break
/// provider auth.
pub fn get_env_clean(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    get_env_clean(key)
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    match get_env_clean(key).map(|v| v.to_ascii_lowercase()) {
        Some(v) => matches!(v.as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}

fn env_list(key: &str) -> Vec<String> {
    get_env_clean(key)
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Cache Store configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_secs: u64,
    pub dir: std::path::PathBuf,
}

/// Deduplication and content filtering knobs.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub lookback_hours: i64,
    pub max_per_source: usize,
    pub max_per_domain: usize,
    pub min_title_chars: usize,
    pub exclude_keywords: Vec<String>,
}

/// Scoring constants preserved from the reference behavior. These are
/// unvalidated heuristics; they are named and overridable, not tuned.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub recency_max: f64,
    pub recency_divisor: f64,
    pub engagement_cap: f64,
    pub engagement_divisor: f64,
    pub academic_bonus: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            recency_max: 10.0,
            recency_divisor: 2.4,
            engagement_cap: 5.0,
            engagement_divisor: 100.0,
            academic_bonus: 2.0,
        }
    }
}

impl ScoringConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            recency_max: env_parse("SCORE_RECENCY_MAX", d.recency_max),
            recency_divisor: env_parse("SCORE_RECENCY_DIVISOR", d.recency_divisor),
            engagement_cap: env_parse("SCORE_ENGAGEMENT_CAP", d.engagement_cap),
            engagement_divisor: env_parse("SCORE_ENGAGEMENT_DIVISOR", d.engagement_divisor),
            academic_bonus: env_parse("SCORE_ACADEMIC_BONUS", d.academic_bonus),
        }
    }
}

/// Rate-limit retry policy for the fallback orchestrator.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub backoff_base_secs: f64,
    /// Pacing delay before each keyed-API request (NewsAPI/SerpAPI-class
    /// providers are rate-limit sensitive).
    pub pace_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base_secs: 2.0,
            pace_ms: 500,
        }
    }
}

/// Dynamic source catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub path: std::path::PathBuf,
    pub refresh_hours: i64,
    pub min_quality: f64,
    /// Extra feed URLs appended to every profile (weight 5, category
    /// "custom").
    pub custom_sources: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub cache: CacheConfig,
    pub filter: FilterConfig,
    pub scoring: ScoringConfig,
    pub retry: RetryConfig,
    pub catalog: CatalogConfig,
    pub newsapi_key: Option<String>,
    pub serpapi_key: Option<String>,
    pub fetch_concurrency: usize,
    pub fetch_timeout_secs: u64,
    pub topic_query: String,
    /// Optional profile override applied to every aggregation call.
    pub profile_override: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            cache: CacheConfig {
                enabled: env_bool(ENV_CACHE_ENABLED, true),
                ttl_secs: env_parse(ENV_CACHE_TTL, 1800),
                dir: get_env_clean(ENV_CACHE_DIR)
                    .map(std::path::PathBuf::from)
                    .unwrap_or_else(|| std::path::PathBuf::from(".cache/news")),
            },
            filter: FilterConfig {
                lookback_hours: env_parse(ENV_LOOKBACK_HOURS, 24),
                max_per_source: env_parse(ENV_MAX_PER_SOURCE, 5),
                max_per_domain: env_parse(ENV_MAX_PER_DOMAIN, 3),
                min_title_chars: env_parse(ENV_MIN_TITLE_CHARS, 10),
                exclude_keywords: env_list(ENV_EXCLUDE_KEYWORDS),
            },
            scoring: ScoringConfig::from_env(),
            retry: RetryConfig {
                max_retries: env_parse(ENV_RATE_LIMIT_RETRIES, 3),
                backoff_base_secs: env_parse(ENV_BACKOFF_BASE_SECS, 2.0),
                pace_ms: env_parse(ENV_PROVIDER_PACE_MS, 500),
            },
            catalog: CatalogConfig {
                path: get_env_clean(ENV_SOURCES_CACHE_PATH)
                    .map(std::path::PathBuf::from)
                    .unwrap_or_else(|| std::path::PathBuf::from(".cache/dynamic_sources.json")),
                refresh_hours: env_parse(ENV_SOURCE_REFRESH_HOURS, 24),
                min_quality: env_parse::<f64>(ENV_MIN_SOURCE_SCORE, 0.6).clamp(0.0, 1.0),
                custom_sources: env_list(ENV_CUSTOM_SOURCES),
            },
            newsapi_key: get_env_clean(ENV_NEWSAPI_KEY),
            serpapi_key: get_env_clean(ENV_SERPAPI_KEY),
            fetch_concurrency: env_parse(ENV_FETCH_CONCURRENCY, 8),
            fetch_timeout_secs: env_parse(ENV_FETCH_TIMEOUT_SECS, 10),
            topic_query: get_env_clean(ENV_TOPIC_QUERY)
                .unwrap_or_else(|| DEFAULT_TOPIC_QUERY.to_string()),
            profile_override: get_env_clean(ENV_FEED_PROFILE).map(|p| p.to_ascii_lowercase()),
        }
    }
}

impl Default for AppConfig {
    /// Pure defaults, ignoring the environment. Used by tests that must not
    /// depend on ambient env vars.
    fn default() -> Self {
        Self {
            cache: CacheConfig {
                enabled: true,
                ttl_secs: 1800,
                dir: std::path::PathBuf::from(".cache/news"),
            },
            filter: FilterConfig {
                lookback_hours: 24,
                max_per_source: 5,
                max_per_domain: 3,
                min_title_chars: 10,
                exclude_keywords: Vec::new(),
            },
            scoring: ScoringConfig::default(),
            retry: RetryConfig::default(),
            catalog: CatalogConfig {
                path: std::path::PathBuf::from(".cache/dynamic_sources.json"),
                refresh_hours: 24,
                min_quality: 0.6,
                custom_sources: Vec::new(),
            },
            newsapi_key: None,
            serpapi_key: None,
            fetch_concurrency: 8,
            fetch_timeout_secs: 10,
            topic_query: DEFAULT_TOPIC_QUERY.to_string(),
            profile_override: None,
        }
    }
}
