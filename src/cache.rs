// src/cache.rs
//! TTL file cache for per-source result sets. A miss is returned for
//! absent, expired, or unreadable entries; writes are best-effort and go
//! through a temp file + atomic rename so a concurrent reader never sees a
//! torn entry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::config::CacheConfig;
use crate::model::Article;

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    timestamp: DateTime<Utc>,
    articles: Vec<Article>,
}

/// Stable cache key for a source: hex SHA-256 of `source_id + url`.
pub fn cache_key(source_id: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source_id.as_bytes());
    hasher.update(url.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for b in digest.iter() {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub struct CacheStore {
    dir: PathBuf,
    ttl: Duration,
    enabled: bool,
}

impl CacheStore {
    pub fn new(cfg: &CacheConfig) -> Self {
        Self {
            dir: cfg.dir.clone(),
            ttl: Duration::seconds(cfg.ttl_secs as i64),
            enabled: cfg.enabled,
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read a cached article list. Any failure (missing file, bad JSON,
    /// expired TTL, I/O error) degrades to a miss; expired entries are left
    /// on disk to be overwritten by the next `put`.
    pub fn get(&self, key: &str) -> Option<Vec<Article>> {
        if !self.enabled {
            return None;
        }
        let raw = std::fs::read_to_string(self.path_for(key)).ok()?;
        let entry: CacheEntry = serde_json::from_str(&raw).ok()?;
        if Utc::now().signed_duration_since(entry.timestamp) >= self.ttl {
            debug!(key, "cache entry expired");
            return None;
        }
        Some(entry.articles)
    }

    /// Write a cached article list, replacing any previous entry for the
    /// key. Failures are logged and dropped, never propagated.
    pub fn put(&self, key: &str, articles: &[Article]) {
        if !self.enabled {
            return;
        }
        let entry = CacheEntry {
            timestamp: Utc::now(),
            articles: articles.to_vec(),
        };
        if let Err(e) = self.try_put(key, &entry) {
            warn!(key, error = %e, "cache write dropped");
        }
    }

    fn try_put(&self, key: &str, entry: &CacheEntry) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let body = serde_json::to_vec_pretty(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let tmp = self.dir.join(format!(".{key}.tmp"));
        std::fs::write(&tmp, body)?;
        std::fs::rename(&tmp, self.path_for(key))
    }

    /// Remove every cache entry. Used by the `clear-cache` management
    /// command.
    pub fn clear(&self) -> std::io::Result<usize> {
        let mut removed = 0;
        match std::fs::read_dir(&self.dir) {
            Ok(entries) => {
                for e in entries.flatten() {
                    let path = e.path();
                    if path.extension().and_then(|s| s.to_str()) == Some("json")
                        && std::fs::remove_file(&path).is_ok()
                    {
                        removed += 1;
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceKind;

    fn store(dir: &std::path::Path, ttl_secs: u64) -> CacheStore {
        CacheStore::new(&CacheConfig {
            enabled: true,
            ttl_secs,
            dir: dir.to_path_buf(),
        })
    }

    fn article(title: &str) -> Article {
        Article::new(
            title,
            "https://example.test/a",
            "unit",
            SourceKind::Feed,
            Utc::now(),
        )
    }

    #[test]
    fn keys_are_stable_and_distinct() {
        let a = cache_key("mit_news", "https://news.mit.edu/rss");
        let b = cache_key("mit_news", "https://news.mit.edu/rss");
        let c = cache_key("other", "https://news.mit.edu/rss");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn round_trip_returns_same_articles() {
        let tmp = tempfile::tempdir().unwrap();
        let s = store(tmp.path(), 3600);
        let arts = vec![article("one"), article("two")];
        s.put("k1", &arts);
        assert_eq!(s.get("k1"), Some(arts));
    }

    #[test]
    fn missing_and_corrupt_entries_are_misses() {
        let tmp = tempfile::tempdir().unwrap();
        let s = store(tmp.path(), 3600);
        assert!(s.get("nope").is_none());
        std::fs::create_dir_all(tmp.path()).unwrap();
        std::fs::write(tmp.path().join("bad.json"), "{not json").unwrap();
        assert!(s.get("bad").is_none());
    }

    #[test]
    fn expired_entry_is_a_miss_not_stale_data() {
        let tmp = tempfile::tempdir().unwrap();
        let s = store(tmp.path(), 60);
        // Backdate the timestamp past the TTL by writing the entry directly.
        let entry = CacheEntry {
            timestamp: Utc::now() - Duration::seconds(120),
            articles: vec![article("stale")],
        };
        s.try_put("k", &entry).unwrap();
        assert!(s.get("k").is_none());
    }

    #[test]
    fn disabled_cache_never_hits() {
        let tmp = tempfile::tempdir().unwrap();
        let s = CacheStore::new(&CacheConfig {
            enabled: false,
            ttl_secs: 3600,
            dir: tmp.path().to_path_buf(),
        });
        s.put("k", &[article("x")]);
        assert!(s.get("k").is_none());
    }

    #[test]
    fn clear_removes_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let s = store(tmp.path(), 3600);
        s.put("a", &[article("x")]);
        s.put("b", &[article("y")]);
        assert_eq!(s.clear().unwrap(), 2);
        assert!(s.get("a").is_none());
    }
}
