use thiserror::Error;

/// Errors returned by [`crate::Recommender`].
///
/// Both are caller mistakes, so they go straight back to the caller instead
/// of being absorbed like metadata failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// The query title has no exact match in the catalog
    #[error("Movie '{title}' not found in catalog")]
    NotFound { title: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
