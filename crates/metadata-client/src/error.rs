use serde::Serialize;
use thiserror::Error;

/// Ways a single details lookup can fail.
///
/// All of them are environmental: the caller skips the one movie and keeps
/// going with the rest.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum FetchError {
    /// The service answered with a non-success status
    #[error("Metadata service returned HTTP {status}")]
    HttpError { status: u16 },

    /// No complete response within the configured timeout
    #[error("Metadata request timed out")]
    TimeoutError,

    /// Connection or transport failure
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// Response body wasn't the expected JSON object
    #[error("Invalid response from metadata service: {message}")]
    ParseError { message: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the API key
        let e = e.without_url();
        if e.is_timeout() {
            FetchError::TimeoutError
        } else if e.is_decode() {
            FetchError::ParseError {
                message: e.to_string(),
            }
        } else {
            FetchError::NetworkError {
                message: e.to_string(),
            }
        }
    }
}
