//! Terminal UI components for moviedeck.
//!
//! Uses `ratatui` + `crossterm` for rendering.

/// Popular/search movie browser screen.
pub mod movie_browser;

pub use movie_browser::run_movie_browser;
