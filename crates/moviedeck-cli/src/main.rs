//! moviedeck - TMDB movie browser CLI.

/// Application configuration (TOML).
mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, LOG_FILE_NAME, resolve_config_dir, resolve_config_path};
use moviedeck_api::tmdb::{DEFAULT_IMAGE_SIZE, Movie, SearchResult, TmdbApi, TmdbClient};

/// Environment variable holding the TMDB API key.
const API_KEY_ENV: &str = "TMDB_API_KEY";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/log directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Query TMDB API.
    Tmdb(TmdbCommand),
    /// Browse popular movies and search interactively.
    Browse,
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `tmdb` subcommand.
#[derive(clap::Args)]
struct TmdbCommand {
    /// TMDB subcommand to run.
    #[command(subcommand)]
    command: TmdbSubcommands,
}

/// Available TMDB subcommands.
#[derive(Subcommand)]
enum TmdbSubcommands {
    /// Show image base URLs and size tokens.
    Configuration,
    /// Search for movies by title.
    Search(TmdbSearchArgs),
    /// List popular movies.
    Popular(TmdbPageArgs),
    /// Get movie details.
    Details(TmdbDetailsArgs),
    /// Resolve an image path to an absolute URL.
    ImageUrl(TmdbImageUrlArgs),
}

/// Arguments for the `tmdb search` subcommand.
#[derive(clap::Args)]
struct TmdbSearchArgs {
    /// Search query (e.g. "batman").
    #[arg(long, required = true)]
    query: String,
    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `tmdb popular` subcommand.
#[derive(clap::Args)]
struct TmdbPageArgs {
    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `tmdb details` subcommand.
#[derive(clap::Args)]
struct TmdbDetailsArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `tmdb image-url` subcommand.
#[derive(clap::Args)]
struct TmdbImageUrlArgs {
    /// Image path (e.g. "/abc.jpg").
    #[arg(long, required = true)]
    path: String,
    /// Size token (e.g. "w300").
    #[arg(long, default_value = DEFAULT_IMAGE_SIZE)]
    size: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a config file with default settings.
    Init(ConfigInitArgs),
}

/// Arguments for the `config init` subcommand.
#[derive(clap::Args)]
struct ConfigInitArgs {
    /// API key to store in the file.
    #[arg(long)]
    api_key: Option<String>,
    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

/// Builds a TMDB client from config and environment.
///
/// # Errors
///
/// Returns an error if no API key is configured, the base URL override is
/// invalid, or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_key = config
        .tmdb
        .resolve_api_key(std::env::var(API_KEY_ENV).ok())
        .context("TMDB API key is not configured (set TMDB_API_KEY or [tmdb].api_key in config.toml)")?;

    let mut builder = TmdbClient::builder()
        .api_key(api_key)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .language(config.tmdb.language.as_str())
        .timeout(config.tmdb.timeout());

    if let Some(region) = config.tmdb.region.as_deref() {
        builder = builder.region(region);
    }
    if let Some(base) = config.tmdb.base_url.as_deref() {
        // Url::join drops the last segment unless the base ends with '/'.
        let normalized = if base.ends_with('/') {
            String::from(base)
        } else {
            format!("{base}/")
        };
        let url = Url::parse(&normalized)
            .with_context(|| format!("invalid [tmdb].base_url: {base}"))?;
        builder = builder.base_url(url);
    }

    builder.build().context("failed to build TMDB client")
}

/// Loads the config file for `dir`.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir)?;
    AppConfig::load(&config_path)
}

/// Logs one result page as a table.
fn log_movie_page(response: &SearchResult) {
    tracing::info!(
        "Page {}/{} ({} results)",
        response.page,
        response.total_pages,
        response.total_results
    );
    tracing::info!("ID\tTitle\t\t\tOrigLang\tReleaseDate\tRating");
    for movie in &response.results {
        tracing::info!(
            "{}\t{}\t{}\t\t{}\t{:.1}",
            movie.id,
            movie.title,
            movie.original_language,
            movie
                .release_date
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or("-"),
            movie.vote_average,
        );
    }
}

/// Runs the `tmdb configuration` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tmdb_configuration(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(&load_config(dir)?)?;

    let configuration = client
        .configuration()
        .await
        .context("TMDB configuration request failed")?;

    let images = &configuration.images;
    tracing::info!(
        "Secure Base URL: {}",
        images.secure_base_url.as_deref().unwrap_or("-")
    );
    tracing::info!("Base URL: {}", images.base_url.as_deref().unwrap_or("-"));
    tracing::info!("Poster Sizes: {}", images.poster_sizes.join(", "));
    tracing::info!("Backdrop Sizes: {}", images.backdrop_sizes.join(", "));
    tracing::info!("Profile Sizes: {}", images.profile_sizes.join(", "));

    Ok(())
}

/// Runs the `tmdb search` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tmdb_search(args: &TmdbSearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(&load_config(dir)?)?;

    let response = client
        .search_movies(&args.query, args.page)
        .await
        .context("TMDB search/movie request failed")?;

    log_movie_page(&response);
    Ok(())
}

/// Runs the `tmdb popular` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tmdb_popular(args: &TmdbPageArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(&load_config(dir)?)?;

    let response = client
        .popular_movies(args.page)
        .await
        .context("TMDB movie/popular request failed")?;

    log_movie_page(&response);
    Ok(())
}

/// Logs the full detail view of one movie.
fn log_movie_details(movie: &Movie) {
    tracing::info!("ID: {}", movie.id);
    tracing::info!("Title: {}", movie.title);
    tracing::info!("Original Title: {}", movie.original_title);
    if let Some(tagline) = movie.tagline.as_deref().filter(|t| !t.is_empty()) {
        tracing::info!("Tagline: {tagline}");
    }
    tracing::info!(
        "Release Date: {}",
        movie
            .parsed_release_date()
            .map_or_else(|| String::from("-"), |d| d.to_string())
    );
    if let Some(runtime) = movie.runtime {
        tracing::info!("Runtime: {runtime} min");
    }
    tracing::info!(
        "Genres: {}",
        movie
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    tracing::info!(
        "Rating: {:.1} ({} votes)",
        movie.vote_average,
        movie.vote_count
    );
    tracing::info!("Status: {}", movie.status.as_deref().unwrap_or("-"));
    tracing::info!("Overview: {}", movie.overview);
}

/// Runs the `tmdb details` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tmdb_details(args: &TmdbDetailsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(&load_config(dir)?)?;

    let movie = client
        .movie_details(args.id)
        .await
        .context("TMDB movie details request failed")?;

    log_movie_details(&movie);
    Ok(())
}

/// Runs the `tmdb image-url` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the configuration
/// request fails.
#[instrument(skip_all)]
async fn run_tmdb_image_url(args: &TmdbImageUrlArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(&load_config(dir)?)?;

    let configuration = client
        .configuration()
        .await
        .context("TMDB configuration request failed")?;

    if !configuration.supports_poster_size(&args.size) {
        tracing::warn!(size = %args.size, "size is not an advertised poster size");
    }
    match configuration.image_url(Some(&args.path), &args.size) {
        Some(url) => tracing::info!("{url}"),
        None => tracing::info!("No image URL available"),
    }

    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the terminal UI fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    tracing::info!("starting movie browser");
    moviedeck_tui::run_movie_browser(Arc::new(client), &config.display.poster_size).await
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists without `--force` or cannot be written.
fn run_config_init(args: &ConfigInitArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir)?;
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let mut config = AppConfig::default();
    config.tmdb.api_key.clone_from(&args.api_key);
    config.save(&config_path)?;

    tracing::info!("Wrote {}", config_path.display());
    Ok(())
}

/// Picks where log output goes: a file in `log_dir` when set, else stdout.
fn log_writer(log_dir: Option<&Path>) -> Result<(BoxMakeWriter, bool)> {
    let Some(dir) = log_dir else {
        return Ok((BoxMakeWriter::new(std::io::stdout), true));
    };
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)
        .with_context(|| format!("failed to open log file in {}", dir.display()))?;
    Ok((BoxMakeWriter::new(appender), false))
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
fn init_tracing(log_dir: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (writer, ansi) = log_writer(log_dir)?;

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal screen owns stdout, so its logs go to a file.
    let log_dir = match cli.command {
        Commands::Browse => Some(resolve_config_dir(cli.dir.as_ref())?),
        _ => None,
    };
    init_tracing(log_dir.as_deref())?;

    match cli.command {
        Commands::Tmdb(tmdb) => match tmdb.command {
            TmdbSubcommands::Configuration => run_tmdb_configuration(cli.dir.as_ref()).await,
            TmdbSubcommands::Search(args) => run_tmdb_search(&args, cli.dir.as_ref()).await,
            TmdbSubcommands::Popular(args) => run_tmdb_popular(&args, cli.dir.as_ref()).await,
            TmdbSubcommands::Details(args) => run_tmdb_details(&args, cli.dir.as_ref()).await,
            TmdbSubcommands::ImageUrl(args) => run_tmdb_image_url(&args, cli.dir.as_ref()).await,
        },
        Commands::Browse => run_browse(cli.dir.as_ref()).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Init(args) => run_config_init(&args, cli.dir.as_ref()),
        },
    }
}
