//! Normalized movie details and the raw TMDB payload they come from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overview used when the service has none
pub const NO_OVERVIEW: &str = "No description available.";

/// A field the service may leave out.
///
/// `Unknown` is the explicit "not available" marker; it prints as `N/A`.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Known(T),
    Unknown,
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Known(value) => value.serialize(serializer),
            Field::Unknown => serializer.serialize_str("N/A"),
        }
    }
}

impl<T> Field<T> {
    pub fn as_known(&self) -> Option<&T> {
        match self {
            Field::Known(value) => Some(value),
            Field::Unknown => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Known(value),
            None => Field::Unknown,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Known(value) => fmt::Display::fmt(value, f),
            Field::Unknown => f.write_str("N/A"),
        }
    }
}

/// Descriptive fields for one movie, ready to display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetails {
    pub poster_url: Field<String>,
    pub overview: String,
    pub rating: Field<f32>,
    pub release_date: Field<String>,
    /// Genre names in service order; `Unknown` when there are none
    pub genres: Field<Vec<String>>,
    pub runtime_minutes: Field<u32>,
}

impl MovieDetails {
    /// Genres as a single comma-separated string, or `N/A`
    pub fn genres_display(&self) -> String {
        match &self.genres {
            Field::Known(names) => names.join(", "),
            Field::Unknown => "N/A".to_string(),
        }
    }

    /// Leading year of the release date (`"2009-12-15"` -> 2009)
    pub fn release_year(&self) -> Option<u16> {
        let date = self.release_date.as_known()?;
        date.get(..4)?.parse().ok()
    }
}

// =============================================================================
// Raw payload
// =============================================================================

/// Subset of TMDB's `GET /movie/{id}` response. Every key is optional.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiMovie {
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f32>,
    pub release_date: Option<String>,
    pub genres: Option<Vec<ApiGenre>>,
    pub runtime: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiGenre {
    pub name: String,
}

/// Drop absent, null and blank strings
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Join the image base and a poster path with exactly one slash
fn poster_url(image_base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        image_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

impl ApiMovie {
    pub(crate) fn normalize(self, image_base: &str) -> MovieDetails {
        let genres: Vec<String> = self
            .genres
            .unwrap_or_default()
            .into_iter()
            .map(|g| g.name)
            .collect();

        MovieDetails {
            poster_url: non_blank(self.poster_path)
                .map(|path| poster_url(image_base, &path))
                .into(),
            overview: non_blank(self.overview).unwrap_or_else(|| NO_OVERVIEW.to_string()),
            rating: self.vote_average.into(),
            release_date: non_blank(self.release_date).into(),
            genres: if genres.is_empty() {
                Field::Unknown
            } else {
                Field::Known(genres)
            },
            runtime_minutes: self.runtime.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn parse(json: &str) -> MovieDetails {
        serde_json::from_str::<ApiMovie>(json)
            .unwrap()
            .normalize(IMAGE_BASE)
    }

    #[test]
    fn test_full_payload() {
        let details = parse(
            r#"{
                "poster_path": "/kyeqWdyUXW608qlYkRqosgbbJyK.jpg",
                "overview": "A paraplegic Marine...",
                "vote_average": 7.2,
                "release_date": "2009-12-15",
                "genres": [{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}],
                "runtime": 162,
                "budget": 237000000
            }"#,
        );

        let poster = "https://image.tmdb.org/t/p/w500/kyeqWdyUXW608qlYkRqosgbbJyK.jpg";
        assert_eq!(details.poster_url, Field::Known(poster.to_string()));
        assert_eq!(details.overview, "A paraplegic Marine...");
        assert_eq!(details.rating, Field::Known(7.2));
        assert_eq!(details.release_year(), Some(2009));
        assert_eq!(details.genres_display(), "Action, Adventure");
        assert_eq!(details.runtime_minutes, Field::Known(162));
    }

    #[test]
    fn test_empty_payload_uses_sentinels() {
        let details = parse("{}");

        assert_eq!(details.poster_url, Field::Unknown);
        assert_eq!(details.overview, NO_OVERVIEW);
        assert_eq!(details.rating, Field::Unknown);
        assert_eq!(details.release_date, Field::Unknown);
        assert_eq!(details.genres, Field::Unknown);
        assert_eq!(details.genres_display(), "N/A");
        assert_eq!(details.runtime_minutes, Field::Unknown);
        assert_eq!(details.release_year(), None);
    }

    #[test]
    fn test_nulls_and_blanks() {
        let details = parse(
            r#"{"poster_path": null, "overview": "", "release_date": "", "genres": [], "runtime": null}"#,
        );

        assert_eq!(details.poster_url, Field::Unknown);
        assert_eq!(details.overview, NO_OVERVIEW);
        assert_eq!(details.release_date, Field::Unknown);
        assert_eq!(details.genres, Field::Unknown);
        assert_eq!(details.runtime_minutes, Field::Unknown);
    }

    #[test]
    fn test_null_and_whitespace_overview() {
        assert_eq!(parse(r#"{"overview": null}"#).overview, NO_OVERVIEW);
        assert_eq!(parse(r#"{"overview": "   "}"#).overview, NO_OVERVIEW);
    }

    #[test]
    fn test_poster_url_single_slash() {
        assert_eq!(poster_url("http://img/", "/a.jpg"), "http://img/a.jpg");
        assert_eq!(poster_url("http://img", "a.jpg"), "http://img/a.jpg");
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::Known(7.5_f32).to_string(), "7.5");
        assert_eq!(Field::<f32>::Unknown.to_string(), "N/A");
        assert_eq!(Field::Known(3_u32).as_known(), Some(&3));
        assert_eq!(Field::<u32>::from(None), Field::Unknown);
    }

    #[test]
    fn test_unknown_serializes_as_marker() {
        let details = parse(r#"{"runtime": 90}"#);
        let json = serde_json::to_value(&details).unwrap();

        assert_eq!(json["runtime_minutes"], 90);
        assert_eq!(json["genres"], "N/A");
        assert_eq!(json["poster_url"], "N/A");
    }
}
