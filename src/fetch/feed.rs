// src/fetch/feed.rs
//! RSS/Atom parsing shared by the feed strategy, the search strategy, and
//! catalog validation. quick-xml with serde; one malformed item never
//! discards the rest of the feed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use quick_xml::de::from_str;
use serde::Deserialize;
use time::{format_description::well_known::Rfc2822, OffsetDateTime, UtcOffset};

use crate::dedup::normalize_text;
use crate::fetch::{http_get_text, FetchStrategy};
use crate::model::{Article, FetchConstraints, FetchError, Source, SourceKind};

const MAX_DESCRIPTION_CHARS: usize = 500;

// --- RSS 2.0 ---

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
    source: Option<RssSource>,
}

/// Google News search feeds name the originating publisher in `<source>`;
/// discovery uses it to surface new named sources.
#[derive(Debug, Deserialize)]
struct RssSource {
    #[serde(rename = "@url")]
    _url: Option<String>,
    #[serde(rename = "$text")]
    name: Option<String>,
}

// --- Atom ---

#[derive(Debug, Deserialize)]
struct Atom {
    title: Option<String>,
    subtitle: Option<String>,
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<String>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    published: Option<String>,
    updated: Option<String>,
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

/// Transport-agnostic view of a parsed feed.
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub title: String,
    pub description: String,
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, Default)]
pub struct FeedItem {
    pub title: String,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub summary: String,
    /// Publisher name from the RSS `<source>` element, when present.
    pub source_name: Option<String>,
}

fn parse_rfc2822_utc(ts: &str) -> Option<DateTime<Utc>> {
    OffsetDateTime::parse(ts, &Rfc2822)
        .ok()
        .map(|dt| dt.to_offset(UtcOffset::UTC).unix_timestamp())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
}

/// Parse a feed date: RFC 2822 (RSS pubDate) first, then RFC 3339 (Atom).
pub fn parse_feed_date(ts: &str) -> Option<DateTime<Utc>> {
    let t = ts.trim();
    if t.is_empty() {
        return None;
    }
    parse_rfc2822_utc(t).or_else(|| {
        DateTime::parse_from_rfc3339(t)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}

/// Parse RSS or Atom XML into a `ParsedFeed`. RSS is tried first because an
/// RSS document never satisfies the Atom shape, while the reverse can
/// produce a false empty feed.
pub fn parse_feed_xml(xml: &str) -> Result<ParsedFeed, FetchError> {
    let t0 = std::time::Instant::now();
    let clean = scrub_html_entities_for_xml(xml);

    let parsed = if let Ok(rss) = from_str::<Rss>(&clean) {
        feed_from_rss(rss)
    } else {
        match from_str::<Atom>(&clean) {
            Ok(atom) => feed_from_atom(atom),
            Err(e) => {
                return Err(FetchError::Recoverable(format!("feed xml parse: {e}")));
            }
        }
    };

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("fetch_parse_ms").record(ms);
    Ok(parsed)
}

fn feed_from_rss(rss: Rss) -> ParsedFeed {
    let items = rss
        .channel
        .items
        .into_iter()
        .map(|it| FeedItem {
            title: normalize_text(it.title.as_deref().unwrap_or_default()),
            link: it.link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty()),
            published: it.pub_date.as_deref().and_then(parse_feed_date),
            summary: normalize_text(it.description.as_deref().unwrap_or_default()),
            source_name: it.source.and_then(|s| s.name).map(|n| n.trim().to_string()),
        })
        .collect();
    ParsedFeed {
        title: normalize_text(rss.channel.title.as_deref().unwrap_or_default()),
        description: normalize_text(rss.channel.description.as_deref().unwrap_or_default()),
        items,
    }
}

fn feed_from_atom(atom: Atom) -> ParsedFeed {
    let items = atom
        .entries
        .into_iter()
        .map(|entry| {
            // Prefer the alternate link; fall back to the first href.
            let link = entry
                .links
                .iter()
                .find(|l| l.rel.as_deref() == Some("alternate"))
                .and_then(|l| l.href.clone())
                .or_else(|| entry.links.iter().find_map(|l| l.href.clone()));
            FeedItem {
                title: normalize_text(entry.title.as_deref().unwrap_or_default()),
                link,
                published: entry
                    .published
                    .as_deref()
                    .or(entry.updated.as_deref())
                    .and_then(parse_feed_date),
                summary: normalize_text(entry.summary.as_deref().unwrap_or_default()),
                source_name: None,
            }
        })
        .collect();
    ParsedFeed {
        title: normalize_text(atom.title.as_deref().unwrap_or_default()),
        description: normalize_text(atom.subtitle.as_deref().unwrap_or_default()),
        items,
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        s.chars().take(max).collect()
    } else {
        s.to_string()
    }
}

/// Convert parsed feed items into articles under the fetch constraints:
/// empty titles skipped, missing dates stamped with fetch time, lookback
/// window enforced, capped per source.
pub fn articles_from_feed(
    parsed: &ParsedFeed,
    source: &Source,
    kind: SourceKind,
    constraints: &FetchConstraints,
) -> Vec<Article> {
    let mut out = Vec::new();
    for item in &parsed.items {
        if out.len() >= constraints.max_per_source {
            break;
        }
        if item.title.is_empty() {
            continue;
        }
        let published = item.published.unwrap_or(constraints.now);
        if !constraints.within_window(published) {
            continue;
        }
        let mut article = Article::new(
            &item.title,
            item.link.as_deref().unwrap_or_default(),
            &source.id,
            kind,
            published,
        );
        article.description = truncate_chars(&item.summary, MAX_DESCRIPTION_CHARS);
        out.push(article);
    }
    counter!("fetch_articles_total").increment(out.len() as u64);
    out
}

pub struct FeedStrategy {
    client: reqwest::Client,
}

impl FeedStrategy {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FetchStrategy for FeedStrategy {
    async fn fetch(
        &self,
        source: &Source,
        constraints: &FetchConstraints,
    ) -> Result<Vec<Article>, FetchError> {
        let body = http_get_text(&self.client, &source.url).await?;
        let parsed = parse_feed_xml(&body)?;
        Ok(articles_from_feed(&parsed, source, SourceKind::Feed, constraints))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Feed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_FIXTURE: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <title>AI Lab Blog</title>
  <description>Research notes on machine learning</description>
  <item>
    <title>New model release</title>
    <link>https://lab.example.com/posts/new-model</link>
    <pubDate>Mon, 24 Aug 2026 10:00:00 GMT</pubDate>
    <description>We trained a thing.</description>
  </item>
  <item>
    <title></title>
    <link>https://lab.example.com/posts/broken</link>
  </item>
  <item>
    <title>Older post outside the window</title>
    <link>https://lab.example.com/posts/old</link>
    <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
  </item>
</channel></rss>"#;

    const ATOM_FIXTURE: &str = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Lab</title>
  <subtitle>neural networks weekly</subtitle>
  <entry>
    <title>Atom entry one</title>
    <link rel="alternate" href="https://atom.example.com/1"/>
    <published>2026-08-24T09:00:00Z</published>
    <summary>An entry.</summary>
  </entry>
</feed>"#;

    fn constraints() -> FetchConstraints {
        let now = parse_feed_date("Mon, 24 Aug 2026 12:00:00 GMT").unwrap();
        FetchConstraints::new(24, 5, now)
    }

    fn src() -> Source {
        Source::new("lab", "https://lab.example.com/rss", SourceKind::Feed, 8, "industry")
    }

    #[test]
    fn rss_parses_with_channel_metadata() {
        let parsed = parse_feed_xml(RSS_FIXTURE).unwrap();
        assert_eq!(parsed.title, "AI Lab Blog");
        assert_eq!(parsed.items.len(), 3);
        assert!(parsed.items[0].published.is_some());
    }

    #[test]
    fn atom_parses_with_alternate_link() {
        let parsed = parse_feed_xml(ATOM_FIXTURE).unwrap();
        assert_eq!(parsed.title, "Atom Lab");
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].link.as_deref(), Some("https://atom.example.com/1"));
    }

    #[test]
    fn malformed_xml_is_recoverable() {
        let err = parse_feed_xml("this is not xml at all").unwrap_err();
        assert!(matches!(err, FetchError::Recoverable(_)));
    }

    #[test]
    fn articles_skip_empty_titles_and_old_items() {
        let parsed = parse_feed_xml(RSS_FIXTURE).unwrap();
        let articles = articles_from_feed(&parsed, &src(), SourceKind::Feed, &constraints());
        // Empty title skipped, 2024 item outside lookback.
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "New model release");
    }

    #[test]
    fn per_source_cap_truncates() {
        let items: String = (0..8)
            .map(|i| {
                format!(
                    "<item><title>Story number {i}</title>\
                     <link>https://lab.example.com/{i}</link>\
                     <pubDate>Mon, 24 Aug 2026 10:00:00 GMT</pubDate></item>"
                )
            })
            .collect();
        let xml = format!("<rss><channel><title>t</title>{items}</channel></rss>");
        let parsed = parse_feed_xml(&xml).unwrap();
        let articles = articles_from_feed(&parsed, &src(), SourceKind::Feed, &constraints());
        assert_eq!(articles.len(), 5);
    }

    #[test]
    fn missing_date_defaults_to_fetch_time() {
        let xml = "<rss><channel><title>t</title>\
                   <item><title>No date on this one</title>\
                   <link>https://lab.example.com/x</link></item>\
                   </channel></rss>";
        let parsed = parse_feed_xml(xml).unwrap();
        let c = constraints();
        let articles = articles_from_feed(&parsed, &src(), SourceKind::Feed, &c);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].published, c.now);
    }

    #[test]
    fn feed_dates_parse_both_formats() {
        assert!(parse_feed_date("Mon, 24 Aug 2026 10:00:00 GMT").is_some());
        assert!(parse_feed_date("2026-08-24T10:00:00Z").is_some());
        assert!(parse_feed_date("yesterday-ish").is_none());
    }
}
