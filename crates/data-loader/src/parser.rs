//! Parsers for the two catalog artifacts.
//!
//! - movies.dat: movieId::title
//! - similarity.dat: one matrix row per line, comma-separated scores
//!
//! Line `i` of similarity.dat belongs to the `i`-th movie of movies.dat
//! (blank lines are ignored in both files).

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const MOVIES_FILE: &str = "movies.dat";
pub const SIMILARITY_FILE: &str = "similarity.dat";

/// Read a file and split it into lines.
///
/// Invalid UTF-8 is replaced rather than rejected; titles from scraped
/// datasets occasionally carry stray bytes.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content = String::from_utf8_lossy(&bytes);
    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Parse the movies.dat file
///
/// Format: movieId::title
///
/// Only the first `::` separates the fields, so titles may contain `::`.
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let lines = read_lines(path)?;
    parse_movie_lines(&lines)
}

pub(crate) fn parse_movie_lines(lines: &[String]) -> Result<Vec<Movie>> {
    let mut movies = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let (movie_id, title) = line_trimmed.split_once("::").ok_or_else(|| {
            DataLoadError::ParseError {
                file: MOVIES_FILE.to_string(),
                line: line_no,
                reason: "Missing '::' between movieId and title".to_string(),
            }
        })?;

        let title = title.trim();
        if title.is_empty() {
            return Err(DataLoadError::ParseError {
                file: MOVIES_FILE.to_string(),
                line: line_no,
                reason: "Missing title".to_string(),
            });
        }

        let movie = Movie {
            id: movie_id.trim().parse().map_err(|e| DataLoadError::ParseError {
                file: MOVIES_FILE.to_string(),
                line: line_no,
                reason: format!("Invalid movieId: {}", e),
            })?,
            title: title.to_string(),
        };

        movies.push(movie);
    }

    Ok(movies)
}

/// Parse the similarity.dat file into a square matrix
pub fn parse_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let lines = read_lines(path)?;
    parse_similarity_lines(&lines)
}

pub(crate) fn parse_similarity_lines(lines: &[String]) -> Result<SimilarityMatrix> {
    let mut rows: Vec<Vec<f32>> = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let row = line_trimmed
            .split(',')
            .map(|field| {
                field.trim().parse::<f32>().map_err(|e| DataLoadError::ParseError {
                    file: SIMILARITY_FILE.to_string(),
                    line: line_no,
                    reason: format!("Invalid score '{}': {}", field.trim(), e),
                })
            })
            .collect::<Result<Vec<f32>>>()?;

        // Every row must be as wide as the first one
        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(DataLoadError::FieldCountMismatch {
                    expected: first.len(),
                    found: row.len(),
                    line: line_no,
                });
            }
        }

        rows.push(row);
    }

    let row_count = rows.len();
    let width = rows.first().map(|r| r.len()).unwrap_or(0);
    SimilarityMatrix::from_rows(rows).ok_or_else(|| {
        DataLoadError::ValidationError(format!(
            "Similarity matrix is not square: {} rows of {} scores",
            row_count, width
        ))
    })
}
