//! `TmdbClient` - TMDB API client implementation.

use std::time::Duration;

use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::error::{ClientError, Result};
use super::types::{Configuration, Movie, SearchResult, TmdbErrorResponse};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "es-ES";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// TMDB API client.
///
/// Every request carries the API key as the `api_key` query parameter and
/// the client's fixed response language.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key (v3 auth).
    api_key: String,
    /// Response language sent with every list/details request.
    language: String,
    /// Optional ISO 3166-1 region filter.
    region: Option<String>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
    region: Option<String>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            language: None,
            region: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the response language (default: "es-ES").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the region filter.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when:
    /// - `api_key` is not set or blank.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ClientError::config("API key is required"))?;
        let user_agent = self
            .user_agent
            .ok_or_else(|| ClientError::config("user_agent is required"))?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| ClientError::config(format!("invalid default base URL: {e}")))?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(ClientError::from_transport)?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key,
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
            region: self.region.filter(|r| !r.is_empty()),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Response language sent with each request.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Sends a GET request with the API key and query params.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::config(format!("failed to join URL path {path}: {e}")))?;

        let request = self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .build()
            .map_err(ClientError::from_transport)?;

        // The full URL carries the API key, so only the path is logged.
        tracing::debug!(path, "TMDB API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(ClientError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let server_message = serde_json::from_str::<TmdbErrorResponse>(&body)
                .ok()
                .map(|e| e.status_message);
            let err =
                ClientError::from_status(status.as_u16(), status.canonical_reason(), server_message);
            tracing::warn!(
                status = status.as_u16(),
                kind = ?err.kind(),
                path,
                "TMDB API error response"
            );
            return Err(err);
        }

        let body = response
            .text()
            .await
            .map_err(ClientError::from_transport)?;
        serde_json::from_str(&body).map_err(|e| ClientError::decode(format!("{path}: {e}")))
    }

    /// Common `page` + `language` (+ `region`) parameters.
    fn paged_query(&self, page: u32) -> Result<Vec<(&'static str, String)>> {
        if page == 0 {
            return Err(ClientError::validation("page must be 1 or greater"));
        }
        let mut query = vec![
            ("page", page.to_string()),
            ("language", self.language.clone()),
        ];
        if let Some(ref region) = self.region {
            query.push(("region", region.clone()));
        }
        Ok(query)
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn configuration(&self) -> Result<Configuration> {
        self.get_json("configuration", &[]).await
    }

    #[instrument(skip_all)]
    async fn search_movies(&self, query: &str, page: u32) -> Result<SearchResult> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ClientError::validation("search query must not be empty"));
        }

        let mut params = vec![("query", String::from(trimmed))];
        params.extend(self.paged_query(page)?);
        params.push(("include_adult", String::from("false")));

        self.get_json("search/movie", &params).await
    }

    #[instrument(skip_all)]
    async fn popular_movies(&self, page: u32) -> Result<SearchResult> {
        let params = self.paged_query(page)?;
        self.get_json("movie/popular", &params).await
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, movie_id: u64) -> Result<Movie> {
        let path = format!("movie/{movie_id}");
        let params = [("language", self.language.clone())];
        self.get_json(&path, &params).await
    }
}
