//! Orchestrator crate for the movie recommender.
//!
//! Ties the recommender to a metadata source: rank first, then enrich every
//! result with details, keeping rank order and isolating per-item failures.

pub mod orchestrator;

pub use orchestrator::{
    DEFAULT_MAX_CONCURRENT_FETCHES, Details, EnrichedRecommendation, RecommendationOrchestrator,
};
