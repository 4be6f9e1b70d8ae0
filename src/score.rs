// src/score.rs
//! Relevance scoring: a deterministic composite of recency, static source
//! weight, engagement, and an academic-category bonus. Heuristic, not a
//! model; identical inputs and timestamps always produce identical
//! rankings.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::ScoringConfig;
use crate::model::{Article, Source};

/// Per-source inputs the scorer needs: static weight and category.
#[derive(Debug, Clone, Default)]
pub struct SourceWeights {
    by_id: HashMap<String, (u32, String)>,
}

impl SourceWeights {
    pub fn from_sources(sources: &[Source]) -> Self {
        let mut by_id = HashMap::new();
        for s in sources {
            by_id.insert(s.id.clone(), (s.weight, s.category.clone()));
        }
        Self { by_id }
    }

    fn lookup(&self, source_id: &str) -> (u32, &str) {
        match self.by_id.get(source_id) {
            Some((w, cat)) => (*w, cat.as_str()),
            None => (0, ""),
        }
    }
}

/// Score one article. Terms, in order: linear recency decay reaching zero at
/// 24h, static source weight (0..=12), capped engagement, academic bonus.
pub fn score_article(
    article: &Article,
    weights: &SourceWeights,
    cfg: &ScoringConfig,
    now: DateTime<Utc>,
) -> f64 {
    let hours_since = now
        .signed_duration_since(article.published)
        .num_seconds()
        .max(0) as f64
        / 3600.0;
    let recency = (cfg.recency_max - hours_since / cfg.recency_divisor).max(0.0);

    let (weight, category) = weights.lookup(&article.source);

    let engagement = article
        .engagement
        .map(|e| (e as f64 / cfg.engagement_divisor).min(cfg.engagement_cap))
        .unwrap_or(0.0);

    let category_bonus = if category == "academic" {
        cfg.academic_bonus
    } else {
        0.0
    };

    recency + weight as f64 + engagement + category_bonus
}

/// Assign scores and rank descending. The sort is stable, so ties preserve
/// encounter order.
pub fn rank(
    mut articles: Vec<Article>,
    weights: &SourceWeights,
    cfg: &ScoringConfig,
    now: DateTime<Utc>,
) -> Vec<Article> {
    for article in articles.iter_mut() {
        article.relevance = score_article(article, weights, cfg, now);
    }
    articles.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
    });
    articles
}
