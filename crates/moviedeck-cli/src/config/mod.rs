//! Application configuration module.
//!
//! Manages the TOML config file holding TMDB client and display settings.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::{LOG_FILE_NAME, resolve_config_dir, resolve_config_path};
