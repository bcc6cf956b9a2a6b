//! Client tests against a local mock of TMDB's details endpoint

use std::collections::HashMap;
use std::time::{Duration, Instant};

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tokio::net::TcpListener;

use metadata_client::{FetchError, Field, TmdbClient, NO_OVERVIEW};

const API_KEY: &str = "test-key";
const IMAGE_BASE: &str = "http://images.test/w500";

// ============================================================================
// Mock Service
// ============================================================================

async fn movie_handler(
    Path(id): Path<u32>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("api_key").map(String::as_str) != Some(API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            r#"{"status_message": "Invalid API key"}"#,
        )
            .into_response();
    }
    if params.get("language").map(String::as_str) != Some("en-US") {
        return (StatusCode::BAD_REQUEST, "missing language").into_response();
    }

    match id {
        1 => axum::Json(json!({
            "id": 1,
            "title": "Avatar",
            "poster_path": "/avatar.jpg",
            "overview": "A paraplegic Marine dispatched to the moon Pandora.",
            "vote_average": 7.2,
            "release_date": "2009-12-15",
            "genres": [
                {"id": 28, "name": "Action"},
                {"id": 12, "name": "Adventure"},
                {"id": 14, "name": "Fantasy"}
            ],
            "runtime": 162
        }))
        .into_response(),
        2 => axum::Json(json!({
            "id": 2,
            "poster_path": null,
            "vote_average": 5.0,
            "release_date": "",
            "runtime": null
        }))
        .into_response(),
        3 => (StatusCode::OK, "<html>not json</html>").into_response(),
        4 => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            axum::Json(json!({"id": 4})).into_response()
        }
        _ => (
            StatusCode::NOT_FOUND,
            r#"{"status_message": "The resource you requested could not be found."}"#,
        )
            .into_response(),
    }
}

/// Start the mock service on a random port
async fn start_mock_tmdb() -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock service");
    let addr = listener.local_addr().expect("Failed to get local address");

    let app = Router::new().route("/movie/:id", get(movie_handler));
    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Mock service failed");
    });

    (format!("http://{}", addr), handle)
}

async fn build_client() -> (TmdbClient, tokio::task::JoinHandle<()>) {
    let (addr, handle) = start_mock_tmdb().await;
    let client = TmdbClient::new(API_KEY, addr)
        .with_image_base_url(IMAGE_BASE)
        .with_timeout(Duration::from_millis(500));
    (client, handle)
}

// ============================================================================
// Successful lookups
// ============================================================================

#[tokio::test]
async fn test_fetch_full_details() {
    let (client, handle) = build_client().await;

    let details = client.fetch_details(1).await.expect("fetch failed");

    assert_eq!(
        details.poster_url,
        Field::Known("http://images.test/w500/avatar.jpg".to_string())
    );
    assert_eq!(
        details.overview,
        "A paraplegic Marine dispatched to the moon Pandora."
    );
    assert_eq!(details.rating, Field::Known(7.2));
    assert_eq!(details.release_date, Field::Known("2009-12-15".to_string()));
    assert_eq!(details.genres_display(), "Action, Adventure, Fantasy");
    assert_eq!(details.runtime_minutes, Field::Known(162));

    handle.abort();
}

#[tokio::test]
async fn test_missing_fields_become_unknown() {
    let (client, handle) = build_client().await;

    let details = client.fetch_details(2).await.expect("fetch failed");

    assert_eq!(details.poster_url, Field::Unknown);
    assert_eq!(details.overview, NO_OVERVIEW);
    assert_eq!(details.rating, Field::Known(5.0));
    assert_eq!(details.release_date, Field::Unknown);
    assert_eq!(details.genres, Field::Unknown);
    assert_eq!(details.runtime_minutes, Field::Unknown);

    handle.abort();
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_not_found_is_http_error() {
    let (client, handle) = build_client().await;

    let result = client.fetch_details(42).await;
    assert_eq!(result, Err(FetchError::HttpError { status: 404 }));

    handle.abort();
}

#[tokio::test]
async fn test_bad_key_is_http_error() {
    let (addr, handle) = start_mock_tmdb().await;
    let client = TmdbClient::new("wrong-key", addr);

    let result = client.fetch_details(1).await;
    assert_eq!(result, Err(FetchError::HttpError { status: 401 }));

    handle.abort();
}

#[tokio::test]
async fn test_invalid_body_is_parse_error() {
    let (client, handle) = build_client().await;

    let result = client.fetch_details(3).await;
    assert!(
        matches!(result, Err(FetchError::ParseError { .. })),
        "Expected ParseError, got {:?}",
        result
    );

    handle.abort();
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let (addr, handle) = start_mock_tmdb().await;
    let client = TmdbClient::new(API_KEY, addr).with_timeout(Duration::from_millis(200));

    let start = Instant::now();
    let result = client.fetch_details(4).await;

    assert_eq!(result, Err(FetchError::TimeoutError));
    assert!(
        start.elapsed() < Duration::from_millis(1500),
        "Timeout should fire well before the handler finishes"
    );

    handle.abort();
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    // Grab a free port, then close it
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = TmdbClient::new(API_KEY, format!("http://{}", addr))
        .with_timeout(Duration::from_secs(2));

    let result = client.fetch_details(1).await;
    match result {
        Err(FetchError::NetworkError { message }) => {
            assert!(!message.contains(API_KEY), "Error must not leak the key");
        }
        other => panic!("Expected NetworkError, got {:?}", other),
    }
}
