//! API client library for moviedeck.
//!
//! Provides a client for the TMDB movie API.

/// TMDB API client.
pub mod tmdb;
