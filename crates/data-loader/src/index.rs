//! Catalog construction and validation.
//!
//! Loading happens once at startup:
//! - parse both artifacts (in parallel)
//! - check that the matrix lines up with the movie list
//! - build the title and id lookup maps

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use tracing::{debug, info, warn};

/// Largest tolerated difference between `[i][j]` and `[j][i]`
pub const SYMMETRY_TOLERANCE: f32 = 1e-4;

impl Catalog {
    /// Load the catalog from a directory holding `movies.dat` and
    /// `similarity.dat`.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", data_dir);

        let movies_path = data_dir.join(parser::MOVIES_FILE);
        let similarity_path = data_dir.join(parser::SIMILARITY_FILE);

        // The matrix file dominates load time, so parse both side by side
        let (movies, similarity) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_similarity(&similarity_path),
        );
        let movies = movies?;
        let similarity = similarity?;

        info!(
            "Parsed {} movies and a {}x{} similarity matrix",
            movies.len(),
            similarity.size(),
            similarity.size()
        );

        let catalog = Catalog::new(movies, similarity)?;
        info!("Catalog successfully built and validated");
        Ok(catalog)
    }

    /// Build a catalog from already-parsed parts.
    ///
    /// Fails if the matrix doesn't match the movie list, if a score is not
    /// finite, if the matrix isn't symmetric or if two movies share an id.
    /// Repeated titles are allowed; lookups resolve to the first one.
    pub fn new(movies: Vec<Movie>, similarity: SimilarityMatrix) -> Result<Self> {
        validate_matrix(movies.len(), &similarity)?;

        let mut title_index = HashMap::with_capacity(movies.len());
        let mut id_index = HashMap::with_capacity(movies.len());

        for (position, movie) in movies.iter().enumerate() {
            match id_index.entry(movie.id) {
                Entry::Occupied(existing) => {
                    return Err(DataLoadError::DuplicateId {
                        id: movie.id,
                        first: *existing.get(),
                        second: position,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }

            // First occurrence wins for repeated titles
            if let Entry::Vacant(slot) = title_index.entry(movie.title.clone()) {
                slot.insert(position);
            } else {
                debug!("Repeated title {:?} at position {}", movie.title, position);
            }
        }

        let duplicates = movies.len() - title_index.len();
        if duplicates > 0 {
            warn!(
                "{} catalog entries repeat an earlier title and can't be queried by title",
                duplicates
            );
        }

        Ok(Self {
            movies,
            similarity,
            title_index,
            id_index,
        })
    }
}

/// Check the matrix invariants against the catalog size
fn validate_matrix(catalog_len: usize, matrix: &SimilarityMatrix) -> Result<()> {
    let size = matrix.size();
    if size != catalog_len {
        return Err(DataLoadError::DimensionMismatch {
            catalog: catalog_len,
            matrix: size,
        });
    }

    // Rows are independent, so check them in parallel
    (0..size).into_par_iter().try_for_each(|i| {
        let row = matrix.row(i);
        for (j, &score) in row.iter().enumerate() {
            if !score.is_finite() {
                return Err(DataLoadError::InvalidValue {
                    field: format!("similarity[{}][{}]", i, j),
                    value: score.to_string(),
                });
            }
            // Only the upper triangle needs comparing
            if j > i {
                let mirrored = matrix.row(j)[i];
                if (score - mirrored).abs() > SYMMETRY_TOLERANCE {
                    return Err(DataLoadError::ValidationError(format!(
                        "Similarity matrix is not symmetric: [{}][{}]={} but [{}][{}]={}",
                        i, j, score, j, i, mirrored
                    )));
                }
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn matrix(rows: &[&[f32]]) -> SimilarityMatrix {
        SimilarityMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn three_movies() -> Vec<Movie> {
        vec![
            Movie::new(10, "Alien"),
            Movie::new(20, "Aliens"),
            Movie::new(30, "Heat"),
        ]
    }

    #[test]
    fn test_new_builds_lookups() {
        let catalog = Catalog::new(
            three_movies(),
            matrix(&[&[1.0, 0.8, 0.1], &[0.8, 1.0, 0.2], &[0.1, 0.2, 1.0]]),
        )
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.index_of("Aliens"), Some(1));
        assert_eq!(catalog.index_of("aliens"), None);
        assert_eq!(catalog.get_by_id(30).map(|m| m.title.as_str()), Some("Heat"));
        assert!(catalog.get_by_id(99).is_none());
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = Catalog::new(three_movies(), matrix(&[&[1.0, 0.5], &[0.5, 1.0]])).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::DimensionMismatch {
                catalog: 3,
                matrix: 2
            }
        ));
    }

    #[test]
    fn test_asymmetric_matrix_rejected() {
        let err = Catalog::new(
            three_movies(),
            matrix(&[&[1.0, 0.8, 0.1], &[0.7, 1.0, 0.2], &[0.1, 0.2, 1.0]]),
        )
        .unwrap_err();
        assert!(matches!(err, DataLoadError::ValidationError(_)));
    }

    #[test]
    fn test_nan_score_rejected() {
        let err = Catalog::new(
            three_movies(),
            matrix(&[&[1.0, f32::NAN, 0.1], &[f32::NAN, 1.0, 0.2], &[0.1, 0.2, 1.0]]),
        )
        .unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let movies = vec![Movie::new(1, "A"), Movie::new(1, "B")];
        let err = Catalog::new(movies, matrix(&[&[1.0, 0.0], &[0.0, 1.0]])).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::DuplicateId {
                id: 1,
                first: 0,
                second: 1
            }
        ));
    }

    #[test]
    fn test_repeated_title_resolves_to_first() {
        let movies = vec![
            Movie::new(1, "Solaris"),
            Movie::new(2, "Stalker"),
            Movie::new(3, "Solaris"),
        ];
        let catalog = Catalog::new(
            movies,
            matrix(&[&[1.0, 0.3, 0.9], &[0.3, 1.0, 0.2], &[0.9, 0.2, 1.0]]),
        )
        .unwrap();

        assert_eq!(catalog.index_of("Solaris"), Some(0));
        assert_eq!(catalog.get_by_id(3).map(|m| m.id), Some(3));
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("movies.dat"),
            "10::Alien\n20::Aliens\n\n30::Heat\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("similarity.dat"),
            "1.0,0.8,0.1\n0.8,1.0,0.2\n0.1,0.2,1.0\n",
        )
        .unwrap();

        let catalog = Catalog::load_from_files(dir.path()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.similarity().score(0, 1), Some(0.8));
        assert_eq!(catalog.movies()[2].title, "Heat");
    }

    #[test]
    fn test_load_missing_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load_from_files(dir.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
