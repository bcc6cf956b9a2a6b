//! Core domain types for the movie catalog.
//!
//! The catalog is an ordered list of movies plus a square similarity matrix
//! addressed by the same positions. Both are built once and only read after
//! that, so every accessor hands out references.

use serde::Serialize;
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a movie in the external metadata service (TMDB id)
pub type MovieId = u32;

// =============================================================================
// Movie
// =============================================================================

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

// =============================================================================
// SimilarityMatrix
// =============================================================================

/// Square table of pairwise similarity scores, stored row-major.
///
/// `score(i, j)` is the similarity between catalog positions `i` and `j`;
/// higher means more similar.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from its rows.
    ///
    /// Returns `None` when the rows don't form a square.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        let scores = rows.into_iter().flatten().collect();
        Some(Self { size, scores })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Full row for position `i`
    ///
    /// Panics if `i` is out of range, like slice indexing.
    pub fn row(&self, i: usize) -> &[f32] {
        let start = i * self.size;
        &self.scores[start..start + self.size]
    }

    /// Single score, `None` when either position is out of range
    pub fn score(&self, i: usize, j: usize) -> Option<f32> {
        if i >= self.size || j >= self.size {
            return None;
        }
        Some(self.scores[i * self.size + j])
    }
}

// =============================================================================
// Catalog - the load-once store
// =============================================================================

/// Movie list and similarity matrix, aligned by position.
///
/// Construct it with [`Catalog::new`] or [`Catalog::load_from_files`]; both
/// validate the invariants, so holders of a `Catalog` can index the matrix
/// with any catalog position.
#[derive(Debug)]
pub struct Catalog {
    pub(crate) movies: Vec<Movie>,
    pub(crate) similarity: SimilarityMatrix,

    /// Title -> position of the first movie carrying that title
    pub(crate) title_index: HashMap<String, usize>,
    /// Movie id -> position
    pub(crate) id_index: HashMap<MovieId, usize>,
}

impl Catalog {
    /// Number of movies in the catalog
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// All movies in catalog order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Movie at a catalog position
    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    /// Movie by its id
    pub fn get_by_id(&self, id: MovieId) -> Option<&Movie> {
        self.id_index.get(&id).map(|&i| &self.movies[i])
    }

    /// Position of the first movie whose title matches exactly
    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Case-insensitive title search.
    ///
    /// Exact matches come first, then substring matches, each group in
    /// catalog order.
    pub fn search_titles(&self, query: &str, limit: usize) -> Vec<&Movie> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(u8, &Movie)> = self
            .movies
            .iter()
            .filter_map(|movie| {
                let title = movie.title.to_lowercase();
                if title == query {
                    Some((0, movie))
                } else if title.contains(&query) {
                    Some((1, movie))
                } else {
                    None
                }
            })
            .collect();

        // Stable, so catalog order survives inside each group
        matches.sort_by_key(|(relevance, _)| *relevance);
        matches.into_iter().take(limit).map(|(_, m)| m).collect()
    }
}
