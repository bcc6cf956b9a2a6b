//! # Recommendation Orchestrator
//!
//! Coordinates a full request:
//! 1. Rank similar movies for the query title (blocking pool)
//! 2. Fetch details for every result, a bounded number at a time
//! 3. Reassemble the enriched results in rank order
//!
//! A failed lookup only marks its own item as unavailable; the rest of the
//! list is still returned.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use data_loader::{Catalog, MovieId};
use metadata_client::{FetchError, MetadataSource, MovieDetails};
use recommender::{Recommendation, Recommender};

/// Lookups in flight at once unless configured otherwise
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 4;

/// Outcome of the details lookup for one recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Details {
    Available(MovieDetails),
    Unavailable(FetchError),
}

impl Details {
    pub fn as_available(&self) -> Option<&MovieDetails> {
        match self {
            Details::Available(details) => Some(details),
            Details::Unavailable(_) => None,
        }
    }
}

/// Final recommendation returned to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecommendation {
    pub rank: usize,
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
    pub details: Details,
}

/// In-flight lookups for one request; dropping it aborts whatever is
/// still running
struct FetchTasks(Vec<JoinHandle<std::result::Result<MovieDetails, FetchError>>>);

impl Drop for FetchTasks {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

/// Main orchestrator that coordinates ranking and enrichment
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    recommender: Recommender,
    metadata: Arc<dyn MetadataSource>,
    max_concurrent_fetches: usize,
}

impl RecommendationOrchestrator {
    /// Create a new orchestrator
    ///
    /// # Arguments
    /// * `catalog` - Shared reference to the loaded catalog
    /// * `metadata` - Where movie details come from (TMDB in production)
    pub fn new(catalog: Arc<Catalog>, metadata: Arc<dyn MetadataSource>) -> Self {
        Self {
            recommender: Recommender::new(catalog),
            metadata,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    /// Bound the number of concurrent lookups (minimum 1; 1 is sequential)
    pub fn with_max_concurrent_fetches(mut self, n: usize) -> Self {
        self.max_concurrent_fetches = n.max(1);
        self
    }

    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_concurrent_fetches
    }

    /// Titles only, no enrichment
    pub fn recommend_titles(&self, title: &str, limit: usize) -> Result<Vec<String>> {
        self.recommender
            .recommend(title, limit)
            .with_context(|| format!("Failed to recommend movies similar to '{}'", title))
    }

    /// Main entry point: ranked recommendations for `title`, each with details
    ///
    /// # Returns
    /// Up to `limit` results sorted by similarity (highest first). Ranking
    /// errors propagate; lookup errors end up in [`Details::Unavailable`].
    pub async fn get_recommendations(
        &self,
        title: &str,
        limit: usize,
    ) -> Result<Vec<EnrichedRecommendation>> {
        let start_time = Instant::now();

        let ranked = self.rank(title, limit).await?;
        info!(
            "Ranked {} recommendations for '{}' in {:.2?}",
            ranked.len(),
            title,
            start_time.elapsed()
        );

        let enriched = self.enrich(ranked).await;
        let unavailable = enriched
            .iter()
            .filter(|rec| matches!(rec.details, Details::Unavailable(_)))
            .count();
        if unavailable > 0 {
            warn!(
                "Details unavailable for {} of {} recommendations",
                unavailable,
                enriched.len()
            );
        }

        info!(
            "Total time to get recommendations for '{}': {:.2?}",
            title,
            start_time.elapsed()
        );
        Ok(enriched)
    }

    /// Run the ranking on the blocking pool
    async fn rank(&self, title: &str, limit: usize) -> Result<Vec<Recommendation>> {
        let recommender = self.recommender.clone();
        let query = title.to_string();

        let ranked = tokio::task::spawn_blocking(move || recommender.recommend_scored(&query, limit))
            .await
            .context("Ranking task panicked")?;

        ranked.with_context(|| format!("Failed to recommend movies similar to '{}'", title))
    }

    /// Fetch details for every recommendation, keeping rank order
    async fn enrich(&self, ranked: Vec<Recommendation>) -> Vec<EnrichedRecommendation> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_fetches));
        info!(
            "Fetching details for {} movies from {} ({} at a time)",
            ranked.len(),
            self.metadata.name(),
            self.max_concurrent_fetches
        );

        let mut tasks = FetchTasks(
            ranked
                .iter()
                .map(|rec| {
                    let metadata = self.metadata.clone();
                    let semaphore = semaphore.clone();
                    let movie_id = rec.movie_id;
                    tokio::spawn(async move {
                        // The semaphore is never closed
                        let _permit = semaphore.acquire_owned().await.ok();
                        metadata.fetch_details(movie_id).await
                    })
                })
                .collect(),
        );

        // Await in spawn order so output order is rank order
        let mut enriched = Vec::with_capacity(ranked.len());
        for (rec, handle) in ranked.into_iter().zip(tasks.0.iter_mut()) {
            let details = match handle.await {
                Ok(Ok(details)) => Details::Available(details),
                Ok(Err(e)) => {
                    warn!("Could not load details for '{}' ({}): {}", rec.title, rec.movie_id, e);
                    Details::Unavailable(e)
                }
                Err(e) => {
                    error!("Details task for '{}' ({}) failed: {}", rec.title, rec.movie_id, e);
                    Details::Unavailable(FetchError::NetworkError {
                        message: format!("details task failed: {}", e),
                    })
                }
            };

            enriched.push(EnrichedRecommendation {
                rank: rec.rank,
                movie_id: rec.movie_id,
                title: rec.title,
                score: rec.score,
                details,
            });
        }

        enriched
    }
}
