//! AI News Aggregator — Binary Entrypoint
//! Management CLI over the aggregation engine: fetch briefings, inspect and
//! refresh the dynamic source catalog, validate candidate feeds, and manage
//! the on-disk caches.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ai_news_aggregator::config::AppConfig;
use ai_news_aggregator::engine::NewsEngine;

#[derive(Parser)]
#[command(name = "ai-news-aggregator", about = "Tiered AI news aggregation engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch, rank, and print recent articles.
    Fetch {
        /// Source profile: quick, balanced, or comprehensive.
        #[arg(long, default_value = "balanced")]
        profile: String,
        /// Maximum number of articles to print.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Show the current source catalog, best sources first.
    Show,
    /// Discover and re-validate sources, persisting the catalog.
    Refresh {
        /// Refresh even when the catalog is still fresh.
        #[arg(long)]
        force: bool,
    },
    /// Validate one candidate feed URL against the quality threshold.
    Test { url: String },
    /// Remove cached article results and the persisted catalog.
    ClearCache,
    /// Export the catalog as JSON to a file, or stdout when omitted.
    Export { file: Option<std::path::PathBuf> },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ai_news_aggregator=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let cfg = AppConfig::from_env();

    match cli.command {
        Command::Fetch { profile, limit } => {
            let engine = NewsEngine::new(cfg)?;
            let result = engine.fetch_recent_articles(&profile, limit).await;
            if result.articles.is_empty() {
                println!("No articles found.");
                return Ok(());
            }
            for (i, a) in result.articles.iter().enumerate() {
                let tier = a
                    .tier
                    .map(|t| format!(" [{}]", t.as_str()))
                    .unwrap_or_default();
                println!(
                    "{:>2}. [{:>5.1}] {} ({}{})",
                    i + 1,
                    a.relevance,
                    a.title,
                    a.source,
                    tier
                );
                println!("      {}", a.url);
            }
            println!(
                "\n{} articles ({} duplicates, {} filtered, {} domain-capped)",
                result.articles.len(),
                result.stats.duplicates,
                result.stats.filtered,
                result.stats.domain_capped
            );
        }
        Command::Show => {
            let engine = NewsEngine::new(cfg)?;
            let sources = engine.catalog().all_sources();
            println!("{} sources in catalog:\n", sources.len());
            for s in &sources {
                let validated = s
                    .validated_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "never".to_string());
                println!(
                    "  {:<20} {:<12} q={:.2} w={:>2} [{}] validated {}",
                    s.id,
                    s.kind.as_str(),
                    s.quality_score,
                    s.weight,
                    s.category,
                    validated
                );
            }
        }
        Command::Refresh { force } => {
            let mut engine = NewsEngine::new(cfg)?;
            let (updated, removed) = engine.refresh_sources(force).await?;
            println!("Refreshed catalog: {updated} updated/added, {removed} removed.");
        }
        Command::Test { url } => {
            let engine = NewsEngine::new(cfg)?;
            match engine.test_feed(&url).await {
                Some(check) => {
                    println!("VALID: {}", check.title);
                    println!("  entries:   {}", check.entry_count);
                    println!("  freshness: {:.2}", check.freshness_score);
                    println!("  topical:   {:.2}", check.topical_relevance);
                    println!("  quality:   {:.2}", check.quality_score);
                    if let Some(latest) = check.latest_update {
                        println!("  latest:    {}", latest.format("%Y-%m-%d %H:%M"));
                    }
                }
                None => {
                    println!("INVALID: unreachable, unparsable, empty, or below threshold.");
                    std::process::exit(1);
                }
            }
        }
        Command::ClearCache => {
            let engine = NewsEngine::new(cfg)?;
            engine.clear_caches()?;
            println!("Caches cleared.");
        }
        Command::Export { file } => {
            let engine = NewsEngine::new(cfg)?;
            let sources = engine.catalog().all_sources();
            let body = serde_json::to_string_pretty(&sources)?;
            match file {
                Some(path) => {
                    std::fs::write(&path, body)?;
                    println!("Exported {} sources to {}.", sources.len(), path.display());
                }
                None => println!("{body}"),
            }
        }
    }
    Ok(())
}
