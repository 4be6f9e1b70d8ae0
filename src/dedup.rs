// src/dedup.rs
//! Deduplication and content filtering: canonical-URL identity with a
//! normalized-title fallback, keyword/length filters, and a per-domain cap
//! that keeps one prolific outlet from crowding out diversity.

use std::collections::{HashMap, HashSet};
use url::Url;

use crate::config::FilterConfig;
use crate::model::Article;

/// Normalize text: decode HTML entities, strip tags, normalize typographic
/// quotes, collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();
    out.trim().to_string()
}

/// Canonical form of an article URL: scheme/host lowercased by the parser,
/// query string and fragment stripped, `www.` prefix and trailing slash
/// removed. Tracking-parameter variants of the same story collapse to one
/// identity.
pub fn canonical_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut url = Url::parse(trimmed).ok()?;
    url.set_query(None);
    url.set_fragment(None);
    let host = url.host_str()?.trim_start_matches("www.").to_string();
    let path = url.path().trim_end_matches('/');
    Some(format!("{}://{}{}", url.scheme(), host, path))
}

/// Registrable domain used for the per-domain cap (`www.` stripped).
pub fn domain_of(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    url.host_str()
        .map(|h| h.trim_start_matches("www.").to_ascii_lowercase())
}

/// Identity hash for URL-less articles: lowercase title, punctuation to
/// spaces, whitespace collapsed, SHA-256 hex.
pub fn title_hash(title: &str) -> String {
    use sha2::{Digest, Sha256};
    let normalized: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let collapsed = normalized.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut hasher = Sha256::new();
    hasher.update(collapsed.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for b in digest.iter() {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Canonical identity of one article: canonical URL when present, otherwise
/// the normalized-title hash.
pub fn canonical_identity(article: &Article) -> String {
    canonical_url(&article.url).unwrap_or_else(|| format!("title:{}", title_hash(&article.title)))
}

fn matches_exclusion(article: &Article, keywords: &[String]) -> Option<String> {
    if keywords.is_empty() {
        return None;
    }
    let haystack = format!("{} {}", article.title, article.description).to_lowercase();
    keywords
        .iter()
        .find(|kw| haystack.contains(&kw.to_lowercase()))
        .cloned()
}

/// Counts of what the pipeline removed, for logging and telemetry.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DedupStats {
    pub duplicates: usize,
    pub filtered: usize,
    pub domain_capped: usize,
}

/// Run the full dedup + filter pipeline.
///
/// 1. Sort by recency (newest first) so the domain cap keeps the freshest
///    items.
/// 2. Drop duplicate canonical identities (URL first, title hash when the
///    URL is absent).
/// 3. Drop short titles and exclusion-keyword matches.
/// 4. Enforce the per-domain cap.
pub fn dedup_and_filter(mut articles: Vec<Article>, cfg: &FilterConfig) -> (Vec<Article>, DedupStats) {
    let mut stats = DedupStats::default();

    articles.sort_by(|a, b| b.published.cmp(&a.published));

    let mut seen: HashSet<String> = HashSet::new();
    let mut domain_counts: HashMap<String, usize> = HashMap::new();
    let mut kept = Vec::with_capacity(articles.len());

    for article in articles {
        if !seen.insert(canonical_identity(&article)) {
            stats.duplicates += 1;
            continue;
        }

        if article.title.chars().count() < cfg.min_title_chars {
            stats.filtered += 1;
            continue;
        }
        if let Some(kw) = matches_exclusion(&article, &cfg.exclude_keywords) {
            tracing::debug!(title = %article.title, keyword = %kw, "excluded by keyword");
            stats.filtered += 1;
            continue;
        }

        if let Some(domain) = domain_of(&article.url) {
            let count = domain_counts.entry(domain).or_insert(0);
            if *count >= cfg.max_per_domain {
                stats.domain_capped += 1;
                continue;
            }
            *count += 1;
        }

        kept.push(article);
    }

    (kept, stats)
}
