//! Movie browser screen state.
//!
//! The screen tracks two independent loads: the image configuration and
//! the movie list (popular or search). Each load is started with a
//! `begin_*` call that hands out a `RequestTicket` and completed with the
//! matching `finish_*` call. Only the most recent ticket of a slot is
//! applied, so a slow stale response never overwrites newer state.

use std::collections::HashSet;

use moviedeck_api::tmdb::{ClientError, Configuration, Movie, SearchResult, resolve_image_url};

/// Number of entries kept from each fetched page.
pub const MAX_LISTED_MOVIES: usize = 10;

/// Lifecycle of one load slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Never requested.
    Idle,
    /// Request in flight.
    Loading,
    /// Last request succeeded.
    Succeeded,
    /// Last request failed.
    Failed,
}

/// Input mode for the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search query editing mode.
    Search,
}

/// Where the current list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListSource {
    /// `movie/popular`.
    Popular,
    /// `search/movie` with the given query.
    Search(String),
}

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational.
    Info,
    /// Error.
    Error,
}

/// Transient dialog shown above the screen until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Dialog title.
    pub title: String,
    /// Dialog body.
    pub message: String,
}

impl Notice {
    fn info(title: &str, message: &str) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: String::from(title),
            message: String::from(message),
        }
    }

    fn error(title: &str, message: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: String::from(title),
            message: String::from(message),
        }
    }
}

/// Identifies one issued request within its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// State for the movie browser screen.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct MovieScreen {
    /// Image configuration, once loaded.
    pub configuration: Option<Configuration>,
    /// Movies currently listed (at most `MAX_LISTED_MOVIES`).
    pub movies: Vec<Movie>,
    /// Search query text.
    pub query: String,
    /// Source of the current list.
    pub list_source: ListSource,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Transient notice, if any.
    pub notice: Option<Notice>,
    /// Whether a refresh is in progress.
    pub refreshing: bool,
    cursor: usize,
    configuration_phase: LoadPhase,
    list_phase: LoadPhase,
    configuration_error: Option<String>,
    list_error: Option<String>,
    poster_size: String,
    pending_query: String,
    latest_configuration: u64,
    latest_list: u64,
}

/// Advances a slot counter and returns the new ticket.
const fn issue(counter: &mut u64) -> RequestTicket {
    *counter = counter.wrapping_add(1);
    RequestTicket(*counter)
}

/// Keeps the first occurrence of each movie ID, up to `MAX_LISTED_MOVIES`.
fn leading_unique(results: Vec<Movie>) -> Vec<Movie> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|m| seen.insert(m.id))
        .take(MAX_LISTED_MOVIES)
        .collect()
}

impl MovieScreen {
    /// Creates an idle screen that renders posters at `poster_size`.
    #[must_use]
    pub fn new(poster_size: impl Into<String>) -> Self {
        Self {
            configuration: None,
            movies: Vec::new(),
            query: String::new(),
            list_source: ListSource::Popular,
            input_mode: InputMode::Normal,
            notice: None,
            refreshing: false,
            cursor: 0,
            configuration_phase: LoadPhase::Idle,
            list_phase: LoadPhase::Idle,
            configuration_error: None,
            list_error: None,
            poster_size: poster_size.into(),
            pending_query: String::new(),
            latest_configuration: 0,
            latest_list: 0,
        }
    }

    // --- Configuration slot ---

    /// Marks the configuration load as started.
    pub fn begin_configuration(&mut self) -> RequestTicket {
        self.configuration_phase = LoadPhase::Loading;
        self.configuration_error = None;
        issue(&mut self.latest_configuration)
    }

    /// Applies a configuration response.
    pub fn finish_configuration(
        &mut self,
        ticket: RequestTicket,
        result: Result<Configuration, ClientError>,
    ) {
        if ticket != RequestTicket(self.latest_configuration) {
            tracing::debug!(?ticket, "discarding stale configuration response");
            return;
        }
        match result {
            Ok(configuration) => {
                self.configuration = Some(configuration);
                self.configuration_phase = LoadPhase::Succeeded;
            }
            Err(err) => {
                tracing::warn!(error = %err, kind = ?err.kind(), "failed to load configuration");
                self.configuration_error = Some(format!("Configuration error: {err}"));
                self.configuration_phase = LoadPhase::Failed;
            }
        }
    }

    // --- List slot ---

    /// Marks a popular-list load as started.
    pub fn begin_popular(&mut self) -> RequestTicket {
        self.list_phase = LoadPhase::Loading;
        self.list_error = None;
        issue(&mut self.latest_list)
    }

    /// Applies a popular-list response.
    pub fn finish_popular(&mut self, ticket: RequestTicket, result: Result<SearchResult, ClientError>) {
        if ticket != RequestTicket(self.latest_list) {
            tracing::debug!(?ticket, "discarding stale popular list response");
            return;
        }
        match result {
            Ok(page) => {
                self.replace_movies(page.results);
                self.list_source = ListSource::Popular;
                self.list_phase = LoadPhase::Succeeded;
            }
            Err(err) => {
                tracing::warn!(error = %err, kind = ?err.kind(), "failed to load popular movies");
                self.list_error = Some(format!("Failed to load movies: {err}"));
                self.list_phase = LoadPhase::Failed;
            }
        }
    }

    /// Validates the query and marks a search as started.
    ///
    /// Returns `None` and raises a notice when the trimmed query is empty;
    /// no request should be issued in that case.
    pub fn submit_search(&mut self) -> Option<RequestTicket> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            self.notice = Some(Notice::error("Error", "Please enter a search term"));
            return None;
        }
        self.pending_query = String::from(trimmed);
        self.input_mode = InputMode::Normal;
        self.list_phase = LoadPhase::Loading;
        self.list_error = None;
        self.configuration_error = None;
        Some(issue(&mut self.latest_list))
    }

    /// Applies a search response.
    ///
    /// Failures surface as a notice rather than in the banner.
    pub fn finish_search(&mut self, ticket: RequestTicket, result: Result<SearchResult, ClientError>) {
        if ticket != RequestTicket(self.latest_list) {
            tracing::debug!(?ticket, "discarding stale search response");
            return;
        }
        match result {
            Ok(page) => {
                if page.results.is_empty() {
                    self.notice = Some(Notice::info(
                        "No results",
                        "No movies matched that search term",
                    ));
                }
                self.replace_movies(page.results);
                self.list_source = ListSource::Search(self.pending_query.clone());
                self.list_phase = LoadPhase::Succeeded;
            }
            Err(err) => {
                tracing::warn!(error = %err, kind = ?err.kind(), "movie search failed");
                self.notice = Some(Notice::error("Search error", err.message()));
                self.list_phase = LoadPhase::Failed;
            }
        }
    }

    fn replace_movies(&mut self, results: Vec<Movie>) {
        self.movies = leading_unique(results);
        self.cursor = 0;
    }

    // --- Refresh ---

    /// Starts a refresh of both slots.
    ///
    /// Returns `None` while a refresh is already running.
    pub fn begin_refresh(&mut self) -> Option<(RequestTicket, RequestTicket)> {
        if self.refreshing {
            return None;
        }
        self.refreshing = true;
        Some((self.begin_configuration(), self.begin_popular()))
    }

    /// Clears the refreshing flag.
    pub const fn finish_refresh(&mut self) {
        self.refreshing = false;
    }

    // --- Queries ---

    /// Whether a list request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.list_phase == LoadPhase::Loading
    }

    /// Phase of the configuration slot.
    #[must_use]
    pub const fn configuration_phase(&self) -> LoadPhase {
        self.configuration_phase
    }

    /// Phase of the list slot.
    #[must_use]
    pub const fn list_phase(&self) -> LoadPhase {
        self.list_phase
    }

    /// Messages for the inline error banner (configuration first).
    #[must_use]
    pub fn banner_messages(&self) -> Vec<&str> {
        [self.configuration_error.as_deref(), self.list_error.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Whether the empty-state indicator should be shown.
    #[must_use]
    pub fn shows_empty_state(&self) -> bool {
        self.movies.is_empty() && !self.is_loading()
    }

    /// Absolute poster URL for a movie, or `None` for a placeholder.
    #[must_use]
    pub fn poster_url(&self, movie: &Movie) -> Option<String> {
        resolve_image_url(
            self.configuration.as_ref(),
            movie.poster_path.as_deref(),
            &self.poster_size,
        )
    }

    /// Title of the list pane.
    #[must_use]
    pub fn list_title(&self) -> String {
        match &self.list_source {
            ListSource::Popular => String::from("Popular Movies"),
            ListSource::Search(query) => format!("Results for \"{query}\""),
        }
    }

    /// Cursor position in the list.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Movie under the cursor.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&Movie> {
        self.movies.get(self.cursor)
    }

    // --- Input ---

    /// Moves the cursor up.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Moves the cursor down.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.movies.len() {
            self.cursor += 1;
        }
    }

    /// Enters search input mode.
    pub const fn start_search_input(&mut self) {
        self.input_mode = InputMode::Search;
    }

    /// Leaves search input mode, keeping the typed text.
    pub const fn cancel_search_input(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Appends a character to the query.
    pub fn push_query_char(&mut self, ch: char) {
        self.query.push(ch);
    }

    /// Removes the last character from the query.
    pub fn pop_query_char(&mut self) {
        self.query.pop();
    }

    /// Closes the current notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
