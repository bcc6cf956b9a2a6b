//! # Metadata Client Crate
//!
//! Fetches descriptive details (poster, overview, rating, release date,
//! genres, runtime) for a movie id from TMDB.
//!
//! A lookup either yields normalized [`MovieDetails`] or a [`FetchError`];
//! missing fields become [`Field::Unknown`] instead of failing the lookup.
//!
//! ## Example Usage
//!
//! ```ignore
//! use metadata_client::{MetadataConfig, TmdbClient};
//!
//! let config = MetadataConfig::from_env()?;
//! let client = TmdbClient::from_config(&config);
//! let details = client.fetch_details(19995).await?;
//! println!("{} ({})", details.overview, details.rating);
//! ```

pub mod client;
pub mod config;
pub mod details;
pub mod error;

pub use client::{MetadataSource, TmdbClient, LANGUAGE};
pub use config::MetadataConfig;
pub use details::{Field, MovieDetails, NO_OVERVIEW};
pub use error::FetchError;
