//! Error types for the data-loader crate.
//!
//! Every failure that can happen while reading the catalog artifacts or
//! validating the similarity matrix against the movie list ends up here.

use thiserror::Error;

/// Errors that can occur while loading and validating the catalog
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in data file couldn't be parsed
    ///
    /// This variant stores context about where the error occurred
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// A similarity row has a different length than the matrix is wide
    #[error("Expected {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// Matrix size doesn't line up with the movie list
    #[error("Similarity matrix is {matrix}x{matrix} but catalog has {catalog} movies")]
    DimensionMismatch { catalog: usize, matrix: usize },

    /// Two catalog entries share a movie id
    #[error("Duplicate movie id {id} at catalog positions {first} and {second}")]
    DuplicateId { id: u32, first: usize, second: usize },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
