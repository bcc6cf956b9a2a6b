//! # Recommender Crate
//!
//! Picks the movies most similar to a query title from the precomputed
//! similarity matrix.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use recommender::Recommender;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::load_from_files(Path::new("data"))?);
//! let recommender = Recommender::new(catalog.clone());
//!
//! // Five most similar titles, best first, query excluded
//! let titles = recommender.recommend("Avatar", 5)?;
//! ```
//!
//! The recommender only reads the shared catalog, so it is cheap to clone
//! and safe to call from any number of tasks.

pub mod error;
pub mod similar;

pub use error::{RecommendError, Result};
pub use similar::{Recommendation, Recommender};
