//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints,
//! classifies failures and resolves image URLs.

mod api;
mod client;
mod error;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_LANGUAGE, DEFAULT_TIMEOUT, TmdbClient, TmdbClientBuilder};
pub use error::{ClientError, ErrorKind, Result};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    Configuration, DEFAULT_IMAGE_SIZE, Genre, ImageConfiguration, Movie, SearchResult,
    TmdbErrorResponse, resolve_image_url,
};
