// tests/catalog_lifecycle.rs
// Catalog bootstrap, persistence, corruption recovery, and profile
// resolution through the public API.

use ai_news_aggregator::catalog::{evaluate_feed, seed_sources, SourceCatalog};
use ai_news_aggregator::config::CatalogConfig;
use ai_news_aggregator::fetch::feed::parse_feed_xml;
use ai_news_aggregator::model::SourceKind;

fn cfg(dir: &std::path::Path) -> CatalogConfig {
    CatalogConfig {
        path: dir.join("dynamic_sources.json"),
        refresh_hours: 24,
        min_quality: 0.6,
        custom_sources: Vec::new(),
    }
}

#[test]
fn missing_file_bootstraps_from_seeds() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = SourceCatalog::load_or_seed(&cfg(tmp.path()));
    assert_eq!(catalog.len(), seed_sources().len());
    assert!(catalog.is_stale());
}

#[test]
fn corrupt_file_falls_back_to_seeds() {
    let tmp = tempfile::tempdir().unwrap();
    let c = cfg(tmp.path());
    std::fs::write(&c.path, "{not json").unwrap();
    let catalog = SourceCatalog::load_or_seed(&c);
    assert_eq!(catalog.len(), seed_sources().len());
}

#[test]
fn saved_catalog_survives_reload_and_is_fresh() {
    let tmp = tempfile::tempdir().unwrap();
    let c = cfg(tmp.path());
    let mut catalog = SourceCatalog::load_or_seed(&c);
    catalog.save().unwrap();

    let reloaded = SourceCatalog::load_or_seed(&c);
    assert_eq!(reloaded.len(), catalog.len());
    assert!(!reloaded.is_stale());

    // The persisted shape keeps kind tags readable by hand.
    let raw = std::fs::read_to_string(&c.path).unwrap();
    assert!(raw.contains("\"cached_at\""));
    assert!(raw.contains("\"type\""));
}

#[test]
fn profiles_scale_from_quick_to_comprehensive() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = SourceCatalog::load_or_seed(&cfg(tmp.path()));
    let quick = catalog.get_sources_for_profile("quick");
    let balanced = catalog.get_sources_for_profile("balanced");
    let comprehensive = catalog.get_sources_for_profile("comprehensive");
    let unknown = catalog.get_sources_for_profile("frobnicate");

    assert_eq!(quick.len(), 5);
    assert_eq!(balanced.len(), 15);
    assert!(comprehensive.len() >= balanced.len());
    assert_eq!(unknown.len(), 10);
    // Best-first ordering inside every profile.
    assert!(quick
        .windows(2)
        .all(|w| w[0].quality_score >= w[1].quality_score));
}

#[test]
fn seed_catalog_spans_all_source_kinds() {
    let seeds = seed_sources();
    for kind in [
        SourceKind::Feed,
        SourceKind::AcademicApi,
        SourceKind::CommunityApi,
        SourceKind::Scrape,
    ] {
        assert!(
            seeds.iter().any(|s| s.kind == kind),
            "no seed of kind {:?}",
            kind
        );
    }
    assert!(seeds.iter().all(|s| s.weight <= 12));
}

#[test]
fn validation_scores_follow_the_documented_blend() {
    let xml = r#"<rss version="2.0"><channel>
      <title>Machine Learning Digest</title>
      <description>deep learning and neural network coverage</description>
      <item>
        <title>Transformer efficiency results</title>
        <link>https://digest.example.com/1</link>
        <pubDate>Mon, 24 Aug 2026 09:00:00 GMT</pubDate>
      </item>
    </channel></rss>"#;
    let parsed = parse_feed_xml(xml).unwrap();
    let now = ai_news_aggregator::fetch::feed::parse_feed_date("Mon, 24 Aug 2026 12:00:00 GMT")
        .unwrap();
    let check = evaluate_feed(&parsed, now);
    assert!(check.freshness_score > 0.99);
    assert!(check.topical_relevance > 0.0);
    let expected = check.freshness_score * 0.6 + check.topical_relevance * 0.4;
    assert!((check.quality_score - expected).abs() < 1e-9);
    assert_eq!(check.entry_count, 1);
}
