// src/fallback.rs
//! Tiered fallback orchestration for one logical query: primary keyed API →
//! secondary keyed API → dynamic feeds → last-resort search. Rate limits
//! retry within a tier with bounded exponential backoff; everything else
//! escalates. The orchestrator never raises to its caller.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::RetryConfig;
use crate::model::{Article, FetchError, Tier};

/// One fallback tier. Implementations wrap the keyed API clients, the
/// catalog feed poll, and the search aggregator; tests inject stubs.
#[async_trait]
pub trait TierFetch: Send + Sync {
    fn tier(&self) -> Tier;

    /// False when the tier cannot run at all (e.g. no API key). Skipped
    /// silently, without counting as a failure.
    fn available(&self) -> bool {
        true
    }

    async fn fetch(&self, query: &str, want: usize) -> Result<Vec<Article>, FetchError>;
}

/// What happened at one tier, kept for inspection and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierStatus {
    Skipped,
    Empty,
    Failed(String),
    RateLimitedOut,
    Served(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierAttempt {
    pub tier: Tier,
    pub status: TierStatus,
}

/// Orchestrator outcome: collected articles (tagged with the serving tier)
/// plus the attempt log. `served_by` is `None` on total exhaustion.
#[derive(Debug, Default)]
pub struct FallbackOutcome {
    pub articles: Vec<Article>,
    pub served_by: Option<Tier>,
    pub attempts: Vec<TierAttempt>,
}

/// Backoff delay before retry number `attempt` (1-based): `base^attempt`
/// seconds. Strictly increasing for any base > 1.
pub fn backoff_delay(base_secs: f64, attempt: u32) -> Duration {
    Duration::from_secs_f64(base_secs.max(0.0).powi(attempt as i32))
}

pub struct FallbackOrchestrator {
    tiers: Vec<Box<dyn TierFetch>>,
    retry: RetryConfig,
}

impl FallbackOrchestrator {
    pub fn new(tiers: Vec<Box<dyn TierFetch>>, retry: RetryConfig) -> Self {
        Self { tiers, retry }
    }

    /// Walk the tiers until one serves data. Within a tier, rate limits are
    /// retried up to `max_retries` times with `base^attempt` second delays;
    /// empty results and recoverable errors escalate immediately.
    pub async fn run(&self, query: &str, want: usize) -> FallbackOutcome {
        let mut outcome = FallbackOutcome::default();

        for tier_fetch in &self.tiers {
            let tier = tier_fetch.tier();
            if !tier_fetch.available() {
                debug!(tier = tier.as_str(), "tier unavailable, skipping");
                outcome.attempts.push(TierAttempt {
                    tier,
                    status: TierStatus::Skipped,
                });
                continue;
            }

            if self.retry.pace_ms > 0 && matches!(tier, Tier::Primary | Tier::Secondary) {
                tokio::time::sleep(Duration::from_millis(self.retry.pace_ms)).await;
            }

            let status = self.run_tier(tier_fetch.as_ref(), query, want, &mut outcome).await;
            let served = matches!(status, TierStatus::Served(_));
            outcome.attempts.push(TierAttempt { tier, status });
            if served {
                outcome.served_by = Some(tier);
                info!(
                    tier = tier.as_str(),
                    count = outcome.articles.len(),
                    "fallback tier served"
                );
                return outcome;
            }
        }

        info!(query, "all fallback tiers exhausted");
        outcome
    }

    async fn run_tier(
        &self,
        tier_fetch: &dyn TierFetch,
        query: &str,
        want: usize,
        outcome: &mut FallbackOutcome,
    ) -> TierStatus {
        let tier = tier_fetch.tier();
        let mut attempt: u32 = 0;
        loop {
            match tier_fetch.fetch(query, want).await {
                Ok(articles) if !articles.is_empty() => {
                    outcome.articles = articles;
                    for article in outcome.articles.iter_mut() {
                        article.tier = Some(tier);
                    }
                    return TierStatus::Served(outcome.articles.len());
                }
                Ok(_) => {
                    debug!(tier = tier.as_str(), "tier returned nothing");
                    return TierStatus::Empty;
                }
                Err(FetchError::RateLimited(reason)) => {
                    if attempt >= self.retry.max_retries {
                        warn!(tier = tier.as_str(), reason, "rate limit retries exhausted");
                        return TierStatus::RateLimitedOut;
                    }
                    attempt += 1;
                    let delay = backoff_delay(self.retry.backoff_base_secs, attempt);
                    warn!(
                        tier = tier.as_str(),
                        attempt,
                        delay_secs = delay.as_secs_f64(),
                        "rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!(tier = tier.as_str(), error = %e, "tier failed, escalating");
                    return TierStatus::Failed(e.to_string());
                }
            }
        }
    }
}
