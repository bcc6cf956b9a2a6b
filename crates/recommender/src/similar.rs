//! Similar-movie recommender
//!
//! Ranks every other catalog entry by its precomputed similarity to the
//! query title.
//!
//! ## Algorithm
//! 1. Find the catalog position of the query title (first exact match)
//! 2. Pair every other position with its score from the query's matrix row
//! 3. Sort by score DESC; the sort is stable, so equal scores keep
//!    ascending catalog order
//! 4. Keep the first `top_n` and map positions back to movies

use crate::error::{RecommendError, Result};
use data_loader::{Catalog, MovieId};
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// One ranked result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// 1-based position in the result list
    pub rank: usize,
    /// Catalog position of the recommended movie
    pub index: usize,
    pub movie_id: MovieId,
    pub title: String,
    /// Similarity to the query title
    pub score: f32,
}

/// Recommends movies by similarity to a query title
#[derive(Debug, Clone)]
pub struct Recommender {
    /// Shared, read-only catalog
    catalog: Arc<Catalog>,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Titles of the `top_n` movies most similar to `title`, best first.
    ///
    /// Returns `min(top_n, catalog.len() - 1)` titles. The query's own
    /// entry is never part of the result.
    pub fn recommend(&self, title: &str, top_n: usize) -> Result<Vec<String>> {
        Ok(self
            .recommend_scored(title, top_n)?
            .into_iter()
            .map(|rec| rec.title)
            .collect())
    }

    /// Same ranking as [`Recommender::recommend`], with ids and scores kept.
    #[instrument(skip(self))]
    pub fn recommend_scored(&self, title: &str, top_n: usize) -> Result<Vec<Recommendation>> {
        if top_n < 1 {
            return Err(RecommendError::InvalidArgument(format!(
                "top_n must be at least 1, got {}",
                top_n
            )));
        }

        let query = self
            .catalog
            .index_of(title)
            .ok_or_else(|| RecommendError::NotFound {
                title: title.to_string(),
            })?;

        let ranked = self.rank_row(query, top_n);
        debug!(
            "Ranked {} of {} catalog entries for position {}",
            ranked.len(),
            self.catalog.len(),
            query
        );

        let recommendations = ranked
            .into_iter()
            .enumerate()
            .map(|(i, (index, score))| {
                let movie = &self.catalog.movies()[index];
                Recommendation {
                    rank: i + 1,
                    index,
                    movie_id: movie.id,
                    title: movie.title.clone(),
                    score,
                }
            })
            .collect();

        Ok(recommendations)
    }

    /// Top `limit` (position, score) pairs from `query`'s row, self excluded
    fn rank_row(&self, query: usize, limit: usize) -> Vec<(usize, f32)> {
        let row = self.catalog.similarity().row(query);

        let mut scored: Vec<(usize, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(index, _)| index != query)
            .collect();

        // sort_by is stable: ties stay in ascending position order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(limit);
        scored
    }
}
