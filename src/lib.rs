// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod cache;
pub mod catalog;
pub mod config;
pub mod dedup;
pub mod engine;
pub mod extract;
pub mod fallback;
pub mod fetch;
pub mod model;
pub mod score;

// ---- Re-exports for stable public API ----
pub use crate::config::AppConfig;
pub use crate::engine::{Aggregation, NewsEngine};
pub use crate::model::{Article, Source, SourceKind, Tier};
