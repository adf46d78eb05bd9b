//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::Result;
use super::types::{Configuration, Movie, SearchResult};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches the image configuration.
    ///
    /// # Errors
    ///
    /// Returns a classified `ClientError` if the request fails or the server
    /// answers with a non-success status.
    async fn configuration(&self) -> Result<Configuration>;

    /// Searches movies by title.
    ///
    /// The query is trimmed before it is sent.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error without touching the network when the
    /// trimmed query is empty or `page` is 0; otherwise a classified error
    /// if the request fails.
    async fn search_movies(&self, query: &str, page: u32) -> Result<SearchResult>;

    /// Fetches a page of popular movies.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error when `page` is 0, otherwise a classified
    /// error if the request fails.
    async fn popular_movies(&self, page: u32) -> Result<SearchResult>;

    /// Fetches details for a single movie.
    ///
    /// # Errors
    ///
    /// Returns a classified error if the request fails.
    async fn movie_details(&self, movie_id: u64) -> Result<Movie>;
}
