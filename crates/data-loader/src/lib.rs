//! # Data Loader Crate
//!
//! This crate holds the catalog store: the fixed list of known movies and the
//! precomputed similarity matrix aligned to it by position.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, SimilarityMatrix, Catalog)
//! - **parser**: Parse the `.dat` artifacts into Rust structs
//! - **index**: Validate the artifacts and build the lookup maps
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! // Load once, share everywhere
//! let catalog = Arc::new(Catalog::load_from_files(Path::new("data"))?);
//!
//! let position = catalog.index_of("Avatar").unwrap();
//! let row = catalog.similarity().row(position);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::SYMMETRY_TOLERANCE;
pub use types::{Catalog, Movie, MovieId, SimilarityMatrix};
