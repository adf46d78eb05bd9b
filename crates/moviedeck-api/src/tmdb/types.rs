//! TMDB API response types.

use chrono::NaiveDate;
use serde::Deserialize;

/// Default image size token used when the caller does not pick one.
pub const DEFAULT_IMAGE_SIZE: &str = "w500";

// --- Configuration ---

/// Response from the `configuration` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Configuration {
    /// Image URL settings.
    #[serde(default)]
    pub images: ImageConfiguration,
    /// Keys reported by the change endpoints.
    #[serde(default)]
    pub change_keys: Vec<String>,
}

/// Image URL settings within `Configuration`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImageConfiguration {
    /// Plain HTTP image base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    /// HTTPS image base URL.
    #[serde(default)]
    pub secure_base_url: Option<String>,
    /// Supported backdrop sizes (e.g. "w300", "original").
    #[serde(default)]
    pub backdrop_sizes: Vec<String>,
    /// Supported logo sizes.
    #[serde(default)]
    pub logo_sizes: Vec<String>,
    /// Supported poster sizes.
    #[serde(default)]
    pub poster_sizes: Vec<String>,
    /// Supported profile sizes.
    #[serde(default)]
    pub profile_sizes: Vec<String>,
    /// Supported still sizes.
    #[serde(default)]
    pub still_sizes: Vec<String>,
}

impl Configuration {
    /// Builds an absolute image URL from an image path.
    ///
    /// Returns `None` when `path` is absent or empty, or when no secure base
    /// URL is configured.
    #[must_use]
    pub fn image_url(&self, path: Option<&str>, size: &str) -> Option<String> {
        let path = path.filter(|p| !p.is_empty())?;
        let base = self
            .images
            .secure_base_url
            .as_deref()
            .filter(|b| !b.is_empty())?;
        Some(format!("{base}{size}{path}"))
    }

    /// Whether `size` is one of the advertised poster sizes.
    #[must_use]
    pub fn supports_poster_size(&self, size: &str) -> bool {
        self.images.poster_sizes.iter().any(|s| s == size)
    }
}

/// Resolves an image path against an optional configuration.
///
/// Returns `None` (never an error) when the configuration has not been
/// loaded yet or `Configuration::image_url` yields nothing.
#[must_use]
pub fn resolve_image_url(
    configuration: Option<&Configuration>,
    path: Option<&str>,
    size: &str,
) -> Option<String> {
    configuration?.image_url(path, size)
}

// --- Movies ---

/// A page of movies from `search/movie` or `movie/popular`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    /// Current page number.
    pub page: u32,
    /// Movies in received order.
    pub results: Vec<Movie>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

/// A movie as returned by list endpoints or `movie/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Overview text.
    #[serde(default)]
    pub overview: String,
    /// Release date (YYYY-MM-DD, empty or null when unknown).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Genre IDs (list endpoints only).
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Video flag.
    #[serde(default)]
    pub video: bool,
    /// Genres (details endpoint only).
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Runtime in minutes (details endpoint only).
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Tagline (details endpoint only).
    #[serde(default)]
    pub tagline: Option<String>,
    /// Release status, e.g. "Released" (details endpoint only).
    #[serde(default)]
    pub status: Option<String>,
}

impl Movie {
    /// Parses `release_date`, ignoring empty or malformed values.
    #[must_use]
    pub fn parsed_release_date(&self) -> Option<NaiveDate> {
        let raw = self.release_date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}
