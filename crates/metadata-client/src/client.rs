//! TMDB client.
//!
//! One lookup is one `GET /movie/{id}`: no retries and no caching. Every
//! outcome, including failures, comes back as a value.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, error, info, instrument};

use crate::config::MetadataConfig;
use crate::details::{ApiMovie, MovieDetails};
use crate::error::FetchError;

/// Fixed response language
pub const LANGUAGE: &str = "en-US";

/// Anything that can look up details for a movie id.
///
/// The orchestrator only sees this trait, so tests can swap in a canned
/// source instead of a live service.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_details(&self, movie_id: u32) -> Result<MovieDetails, FetchError>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}

/// Client for TMDB's movie details endpoint
#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
    timeout: Duration,
}

impl TmdbClient {
    /// Create a client with default image base and a 10 second timeout.
    ///
    /// # Arguments
    /// * `api_key` - TMDB v3 API key
    /// * `api_url` - Base URL, e.g. "https://api.themoviedb.org/3"
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: api_key.into(),
            api_url: api_url.into(),
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn from_config(config: &MetadataConfig) -> Self {
        Self::new(config.tmdb_api_key.clone(), config.tmdb_api_url.clone())
            .with_image_base_url(config.tmdb_image_base_url.clone())
            .with_timeout(config.timeout())
    }

    /// Configure the poster URL prefix
    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into();
        self
    }

    /// Configure the per-request timeout (default: 10s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn movie_url(&self, movie_id: u32) -> String {
        format!("{}/movie/{}", self.api_url.trim_end_matches('/'), movie_id)
    }

    /// Fetch and normalize details for one movie.
    ///
    /// Never panics and never retries; see [`FetchError`] for the failure
    /// kinds.
    #[instrument(skip(self))]
    pub async fn fetch_details(&self, movie_id: u32) -> Result<MovieDetails, FetchError> {
        let url = self.movie_url(movie_id);
        info!("Fetching details for movie {} from {}", movie_id, url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| log_transport_error(movie_id, e))?;

        let status = response.status();
        debug!("Response status for movie {}: {}", movie_id, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Metadata API error for movie {}: {} - {}", movie_id, status, body);
            return Err(FetchError::HttpError {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| log_transport_error(movie_id, e))?;

        let payload: ApiMovie = serde_json::from_str(&body).map_err(|e| {
            error!("Could not decode details for movie {}: {}", movie_id, e);
            FetchError::ParseError {
                message: e.to_string(),
            }
        })?;

        info!("Successfully fetched details for movie {}", movie_id);
        Ok(payload.normalize(&self.image_base_url))
    }
}

fn log_transport_error(movie_id: u32, e: reqwest::Error) -> FetchError {
    let err = FetchError::from(e);
    error!("Request for movie {} failed: {}", movie_id, err);
    err
}

#[async_trait]
impl MetadataSource for TmdbClient {
    async fn fetch_details(&self, movie_id: u32) -> Result<MovieDetails, FetchError> {
        TmdbClient::fetch_details(self, movie_id).await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
