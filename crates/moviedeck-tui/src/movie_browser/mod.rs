//! Movie browser TUI main loop.
//!
//! Terminal input is read on a blocking task and network requests run on
//! spawned tasks; both feed the loop through channels so drawing is never
//! held up by a slow request.

/// Screen state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use moviedeck_api::tmdb::{ClientError, Configuration, SearchResult, TmdbApi};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedSender};

use self::state::{InputMode, MovieScreen, RequestTicket};

/// Public movie page on the TMDB website.
const TMDB_MOVIE_PAGE: &str = "https://www.themoviedb.org/movie";

/// Input poll interval for the key reader.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Result of a background request.
#[derive(Debug)]
enum Completion {
    Configuration(RequestTicket, Result<Configuration, ClientError>),
    Popular(RequestTicket, Result<SearchResult, ClientError>),
    Search(RequestTicket, Result<SearchResult, ClientError>),
    RefreshDone,
}

/// What the loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Continue,
    Quit,
    Search(RequestTicket, String),
    Refresh(RequestTicket, RequestTicket),
    Open(u64),
}

/// Runs the movie browser until the user quits.
///
/// The configuration and the popular list are requested concurrently as
/// soon as the screen opens; neither waits on the other.
///
/// # Errors
///
/// Returns an error if terminal setup, drawing, or input handling fails.
/// API failures are shown on screen instead.
pub async fn run_movie_browser<A>(api: Arc<A>, poster_size: &str) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut screen = MovieScreen::new(poster_size);

    let result = run_event_loop(&mut terminal, &mut screen, &api).await;

    // Both cleanup steps run even if one fails; the first error wins.
    let raw_mode = disable_raw_mode().context("failed to disable raw mode");
    let alternate_screen = crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen");

    first_error(result, [raw_mode, alternate_screen])
}

/// Returns the loop result unless it succeeded and a cleanup step failed.
fn first_error<const N: usize>(result: Result<()>, cleanup: [Result<()>; N]) -> Result<()> {
    result?;
    cleanup.into_iter().collect()
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    screen: &mut MovieScreen,
    api: &Arc<A>,
) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
{
    let (key_tx, mut key_rx) = mpsc::unbounded_channel();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    spawn_key_reader(key_tx);
    start_mount(screen, api, &done_tx);

    loop {
        terminal
            .draw(|frame| ui::draw(frame, screen))
            .context("failed to draw TUI")?;

        tokio::select! {
            key = key_rx.recv() => {
                let Some(key) = key else {
                    bail!("terminal input reader stopped");
                };
                if dispatch(api, &done_tx, handle_key(screen, key)) {
                    return Ok(());
                }
            }
            Some(completion) = done_rx.recv() => apply_completion(screen, completion),
        }
    }
}

/// Forwards key presses from a blocking reader until the receiver closes.
fn spawn_key_reader(tx: UnboundedSender<KeyEvent>) {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(false) => {}
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.send(key).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read terminal event");
                        break;
                    }
                },
                Err(e) => {
                    tracing::warn!(error = %e, "failed to poll terminal events");
                    break;
                }
            }
        }
    });
}

/// Requests the configuration and the popular list concurrently.
fn start_mount<A>(screen: &mut MovieScreen, api: &Arc<A>, tx: &UnboundedSender<Completion>)
where
    A: TmdbApi + Send + Sync + 'static,
{
    let configuration_ticket = screen.begin_configuration();
    spawn_configuration(api, tx, configuration_ticket);
    let list_ticket = screen.begin_popular();
    spawn_popular(api, tx, list_ticket);
}

/// Starts the side effect of an action. Returns `true` on quit.
fn dispatch<A>(api: &Arc<A>, tx: &UnboundedSender<Completion>, action: Action) -> bool
where
    A: TmdbApi + Send + Sync + 'static,
{
    match action {
        Action::Continue => {}
        Action::Quit => return true,
        Action::Search(ticket, query) => spawn_search(api, tx, ticket, query),
        Action::Refresh(configuration_ticket, list_ticket) => {
            spawn_refresh(api, tx, configuration_ticket, list_ticket);
        }
        Action::Open(movie_id) => open_movie_page(movie_id),
    }
    false
}

fn spawn_configuration<A>(
    api: &Arc<A>,
    tx: &UnboundedSender<Completion>,
    ticket: RequestTicket,
) where
    A: TmdbApi + Send + Sync + 'static,
{
    let api = Arc::clone(api);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api.configuration().await;
        let _ = tx.send(Completion::Configuration(ticket, result));
    });
}

fn spawn_popular<A>(api: &Arc<A>, tx: &UnboundedSender<Completion>, ticket: RequestTicket)
where
    A: TmdbApi + Send + Sync + 'static,
{
    let api = Arc::clone(api);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api.popular_movies(1).await;
        let _ = tx.send(Completion::Popular(ticket, result));
    });
}

fn spawn_search<A>(
    api: &Arc<A>,
    tx: &UnboundedSender<Completion>,
    ticket: RequestTicket,
    query: String,
) where
    A: TmdbApi + Send + Sync + 'static,
{
    let api = Arc::clone(api);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api.search_movies(&query, 1).await;
        let _ = tx.send(Completion::Search(ticket, result));
    });
}

/// Reloads configuration then the popular list, in that order.
fn spawn_refresh<A>(
    api: &Arc<A>,
    tx: &UnboundedSender<Completion>,
    configuration_ticket: RequestTicket,
    list_ticket: RequestTicket,
) where
    A: TmdbApi + Send + Sync + 'static,
{
    let api = Arc::clone(api);
    let tx = tx.clone();
    tokio::spawn(async move {
        let configuration = api.configuration().await;
        let _ = tx.send(Completion::Configuration(configuration_ticket, configuration));
        let popular = api.popular_movies(1).await;
        let _ = tx.send(Completion::Popular(list_ticket, popular));
        let _ = tx.send(Completion::RefreshDone);
    });
}

fn apply_completion(screen: &mut MovieScreen, completion: Completion) {
    match completion {
        Completion::Configuration(ticket, result) => screen.finish_configuration(ticket, result),
        Completion::Popular(ticket, result) => screen.finish_popular(ticket, result),
        Completion::Search(ticket, result) => screen.finish_search(ticket, result),
        Completion::RefreshDone => screen.finish_refresh(),
    }
}

fn open_movie_page(movie_id: u64) {
    let url = format!("{TMDB_MOVIE_PAGE}/{movie_id}");
    if let Err(e) = open::that(&url) {
        tracing::warn!(error = %e, url = %url, "failed to open browser");
    }
}

/// Maps a key press to a state change and an action for the loop.
fn handle_key(screen: &mut MovieScreen, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if screen.notice.is_some() {
        screen.dismiss_notice();
        return Action::Continue;
    }

    match screen.input_mode {
        InputMode::Search => match key.code {
            KeyCode::Esc => screen.cancel_search_input(),
            KeyCode::Enter => {
                if let Some(ticket) = screen.submit_search() {
                    return Action::Search(ticket, String::from(screen.query.trim()));
                }
            }
            KeyCode::Backspace => screen.pop_query_char(),
            KeyCode::Char(c) => screen.push_query_char(c),
            _ => {}
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('/' | 's') => screen.start_search_input(),
            KeyCode::Char('r') => {
                if let Some((configuration_ticket, list_ticket)) = screen.begin_refresh() {
                    return Action::Refresh(configuration_ticket, list_ticket);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => screen.move_up(),
            KeyCode::Down | KeyCode::Char('j') => screen.move_down(),
            KeyCode::Char('o') => {
                if let Some(movie) = screen.selected_movie() {
                    return Action::Open(movie.id);
                }
            }
            _ => {}
        },
    }
    Action::Continue
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::sync::Mutex;

    use anyhow::anyhow;
    use moviedeck_api::tmdb::{Movie, TmdbClient};
    use tokio::sync::mpsc::UnboundedReceiver;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::state::LoadPhase;
    use super::*;

    const CONFIGURATION_JSON: &str = include_str!("../../../../fixtures/tmdb/configuration.json");
    const POPULAR_JSON: &str = include_str!("../../../../fixtures/tmdb/popular_movies.json");
    const EMPTY_JSON: &str = include_str!("../../../../fixtures/tmdb/search_movie_empty.json");
    const DETAILS_JSON: &str = include_str!("../../../../fixtures/tmdb/movie_details_268.json");

    /// Serves fixture data and records the order of calls.
    struct RecordingApi {
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingApi {
        const fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl TmdbApi for RecordingApi {
        async fn configuration(&self) -> moviedeck_api::tmdb::Result<Configuration> {
            self.record("configuration");
            Ok(serde_json::from_str(CONFIGURATION_JSON).unwrap())
        }

        async fn search_movies(
            &self,
            _query: &str,
            _page: u32,
        ) -> moviedeck_api::tmdb::Result<SearchResult> {
            self.record("search");
            Ok(serde_json::from_str(EMPTY_JSON).unwrap())
        }

        async fn popular_movies(&self, _page: u32) -> moviedeck_api::tmdb::Result<SearchResult> {
            self.record("popular");
            Ok(serde_json::from_str(POPULAR_JSON).unwrap())
        }

        async fn movie_details(&self, _movie_id: u64) -> moviedeck_api::tmdb::Result<Movie> {
            self.record("details");
            Ok(serde_json::from_str(DETAILS_JSON).unwrap())
        }
    }

    fn test_client(server: &MockServer) -> Arc<TmdbClient> {
        let base_url = format!("{}/3/", server.uri());
        Arc::new(
            TmdbClient::builder()
                .base_url(base_url.parse().unwrap())
                .api_key("test-key")
                .user_agent("test/0.0.0")
                .build()
                .unwrap(),
        )
    }

    async fn mount_json(server: &MockServer, endpoint: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/3/{endpoint}")))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }

    const fn completion_name(completion: &Completion) -> &'static str {
        match completion {
            Completion::Configuration(..) => "configuration",
            Completion::Popular(..) => "popular",
            Completion::Search(..) => "search",
            Completion::RefreshDone => "refresh done",
        }
    }

    /// Applies the next `count` completions and returns their names in arrival order.
    async fn apply_next(
        screen: &mut MovieScreen,
        rx: &mut UnboundedReceiver<Completion>,
        count: usize,
    ) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(count);
        for _ in 0..count {
            let completion = rx.recv().await.unwrap();
            names.push(completion_name(&completion));
            apply_completion(screen, completion);
        }
        names
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_query(screen: &mut MovieScreen, text: &str) {
        for ch in text.chars() {
            handle_key(screen, press(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn test_quit_keys() {
        // Arrange
        let mut screen = MovieScreen::new("w300");

        // Act & Assert
        assert_eq!(handle_key(&mut screen, press(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(
            handle_key(
                &mut screen,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Action::Quit
        );
    }

    #[test]
    fn test_search_flow_issues_trimmed_query() {
        // Arrange
        let mut screen = MovieScreen::new("w300");

        // Act
        handle_key(&mut screen, press(KeyCode::Char('/')));
        type_query(&mut screen, " batman ");
        let action = handle_key(&mut screen, press(KeyCode::Enter));

        // Assert
        assert!(matches!(action, Action::Search(_, ref q) if q == "batman"));
        assert_eq!(screen.input_mode, InputMode::Normal);
        assert!(screen.is_loading());
    }

    #[test]
    fn test_q_is_typed_in_search_mode() {
        // Arrange
        let mut screen = MovieScreen::new("w300");
        handle_key(&mut screen, press(KeyCode::Char('s')));

        // Act
        let action = handle_key(&mut screen, press(KeyCode::Char('q')));

        // Assert
        assert_eq!(action, Action::Continue);
        assert_eq!(screen.query, "q");
    }

    #[test]
    fn test_empty_search_shows_notice_and_next_key_dismisses() {
        // Arrange
        let mut screen = MovieScreen::new("w300");
        handle_key(&mut screen, press(KeyCode::Char('/')));

        // Act
        let action = handle_key(&mut screen, press(KeyCode::Enter));

        // Assert
        assert_eq!(action, Action::Continue);
        assert!(screen.notice.is_some());
        assert_eq!(handle_key(&mut screen, press(KeyCode::Char('q'))), Action::Continue);
        assert!(screen.notice.is_none());
    }

    #[test]
    fn test_refresh_key_is_ignored_while_refreshing() {
        // Arrange
        let mut screen = MovieScreen::new("w300");

        // Act
        let first = handle_key(&mut screen, press(KeyCode::Char('r')));
        let second = handle_key(&mut screen, press(KeyCode::Char('r')));

        // Assert
        assert!(matches!(first, Action::Refresh(_, _)));
        assert_eq!(second, Action::Continue);
        assert!(screen.refreshing);
    }

    #[test]
    fn test_refresh_done_clears_flag() {
        // Arrange
        let mut screen = MovieScreen::new("w300");
        let _ = screen.begin_refresh();

        // Act
        apply_completion(&mut screen, Completion::RefreshDone);

        // Assert
        assert!(!screen.refreshing);
    }

    #[test]
    fn test_open_requires_selection() {
        // Arrange
        let mut screen = MovieScreen::new("w300");

        // Act
        let action = handle_key(&mut screen, press(KeyCode::Char('o')));

        // Assert
        assert_eq!(action, Action::Continue);
    }

    #[tokio::test]
    async fn test_mount_keeps_first_ten_popular_movies() {
        // Arrange
        let server = MockServer::start().await;
        mount_json(&server, "configuration", 200, CONFIGURATION_JSON).await;
        mount_json(&server, "movie/popular", 200, POPULAR_JSON).await;
        let api = test_client(&server);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut screen = MovieScreen::new("w300");
        let fixture: SearchResult = serde_json::from_str(POPULAR_JSON).unwrap();
        let expected: Vec<u64> = fixture.results.iter().take(10).map(|m| m.id).collect();

        // Act
        start_mount(&mut screen, &api, &tx);
        assert!(screen.is_loading());
        let mut names = apply_next(&mut screen, &mut rx, 2).await;

        // Assert
        names.sort_unstable();
        assert_eq!(names, vec!["configuration", "popular"]);
        let ids: Vec<u64> = screen.movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, expected);
        assert!(!screen.is_loading());
        assert_eq!(screen.configuration_phase(), LoadPhase::Succeeded);
        assert!(screen.banner_messages().is_empty());
    }

    #[tokio::test]
    async fn test_mount_configuration_failure_keeps_popular_list() {
        // Arrange
        let server = MockServer::start().await;
        mount_json(&server, "configuration", 503, r#"{"status_message":"down"}"#).await;
        mount_json(&server, "movie/popular", 200, POPULAR_JSON).await;
        let api = test_client(&server);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut screen = MovieScreen::new("w300");

        // Act
        start_mount(&mut screen, &api, &tx);
        apply_next(&mut screen, &mut rx, 2).await;

        // Assert
        let banner = screen.banner_messages();
        assert_eq!(banner.len(), 1);
        assert!(banner[0].starts_with("Configuration error"));
        assert_eq!(screen.movies.len(), 10);
        assert_eq!(screen.list_phase(), LoadPhase::Succeeded);
    }

    #[tokio::test]
    async fn test_mount_popular_failure_keeps_configuration() {
        // Arrange
        let server = MockServer::start().await;
        mount_json(&server, "configuration", 200, CONFIGURATION_JSON).await;
        mount_json(&server, "movie/popular", 500, "").await;
        let api = test_client(&server);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut screen = MovieScreen::new("w300");

        // Act
        start_mount(&mut screen, &api, &tx);
        apply_next(&mut screen, &mut rx, 2).await;

        // Assert
        let banner = screen.banner_messages();
        assert_eq!(banner.len(), 1);
        assert!(banner[0].starts_with("Failed to load movies"));
        assert_eq!(screen.configuration_phase(), LoadPhase::Succeeded);
        assert!(screen.shows_empty_state());
    }

    #[tokio::test]
    async fn test_search_without_results_clears_banner() {
        // Arrange
        let server = MockServer::start().await;
        mount_json(&server, "configuration", 503, r#"{"status_message":"down"}"#).await;
        mount_json(&server, "movie/popular", 200, POPULAR_JSON).await;
        Mock::given(method("GET"))
            .and(path("/3/search/movie"))
            .and(query_param("query", "batman"))
            .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_JSON))
            .expect(1)
            .mount(&server)
            .await;
        let api = test_client(&server);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut screen = MovieScreen::new("w300");
        start_mount(&mut screen, &api, &tx);
        apply_next(&mut screen, &mut rx, 2).await;
        assert_eq!(screen.banner_messages().len(), 1);

        // Act
        handle_key(&mut screen, press(KeyCode::Char('/')));
        type_query(&mut screen, "batman");
        let action = handle_key(&mut screen, press(KeyCode::Enter));
        assert!(!dispatch(&api, &tx, action));
        let names = apply_next(&mut screen, &mut rx, 1).await;

        // Assert
        assert_eq!(names, vec!["search"]);
        assert!(screen.banner_messages().is_empty());
        assert!(screen.shows_empty_state());
        assert_eq!(screen.list_title(), "Results for \"batman\"");
        assert_eq!(screen.notice.as_ref().unwrap().title, "No results");
    }

    #[tokio::test]
    async fn test_blank_search_issues_no_request() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/search/movie"))
            .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_JSON))
            .expect(0)
            .mount(&server)
            .await;
        let api = test_client(&server);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut screen = MovieScreen::new("w300");

        // Act
        handle_key(&mut screen, press(KeyCode::Char('/')));
        type_query(&mut screen, "   ");
        let action = handle_key(&mut screen, press(KeyCode::Enter));
        let quit = dispatch(&api, &tx, action);

        // Assert
        assert!(!quit);
        assert!(rx.try_recv().is_err());
        assert_eq!(
            screen.notice.as_ref().unwrap().message,
            "Please enter a search term"
        );
    }

    #[tokio::test]
    async fn test_refresh_reloads_configuration_then_popular() {
        // Arrange
        let api = Arc::new(RecordingApi::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut screen = MovieScreen::new("w300");

        // Act
        let action = handle_key(&mut screen, press(KeyCode::Char('r')));
        assert!(screen.refreshing);
        assert!(!dispatch(&api, &tx, action));
        let names = apply_next(&mut screen, &mut rx, 3).await;

        // Assert
        assert_eq!(names, vec!["configuration", "popular", "refresh done"]);
        assert_eq!(*api.calls.lock().unwrap(), vec!["configuration", "popular"]);
        assert!(!screen.refreshing);
        assert!(!screen.is_loading());
        assert_eq!(screen.configuration_phase(), LoadPhase::Succeeded);
        assert_eq!(screen.movies.len(), 10);
        assert!(screen.poster_url(&screen.movies[0]).is_some());
    }

    #[tokio::test]
    async fn test_refresh_clears_flag_on_failure() {
        // Arrange
        let server = MockServer::start().await;
        mount_json(&server, "configuration", 500, "").await;
        mount_json(&server, "movie/popular", 500, "").await;
        let api = test_client(&server);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut screen = MovieScreen::new("w300");

        // Act
        let action = handle_key(&mut screen, press(KeyCode::Char('r')));
        dispatch(&api, &tx, action);
        let names = apply_next(&mut screen, &mut rx, 3).await;

        // Assert
        assert_eq!(names.last(), Some(&"refresh done"));
        assert!(!screen.refreshing);
        assert_eq!(screen.banner_messages().len(), 2);
    }

    #[test]
    fn test_dispatch_quit_stops_loop() {
        // Arrange
        let api = Arc::new(RecordingApi::new());
        let (tx, _rx) = mpsc::unbounded_channel();

        // Act & Assert
        assert!(dispatch(&api, &tx, Action::Quit));
        assert!(!dispatch(&api, &tx, Action::Continue));
        assert!(api.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_first_error_prefers_loop_error() {
        // Arrange
        let cleanup = [Err(anyhow!("raw mode")), Err(anyhow!("alternate screen"))];

        // Act
        let err = first_error(Err(anyhow!("draw")), cleanup).unwrap_err();

        // Assert
        assert_eq!(err.to_string(), "draw");
    }

    #[test]
    fn test_first_error_reports_first_failed_cleanup_step() {
        // Arrange
        let cleanup = [Ok(()), Err(anyhow!("alternate screen"))];

        // Act
        let err = first_error(Ok(()), cleanup).unwrap_err();

        // Assert
        assert_eq!(err.to_string(), "alternate screen");
        assert!(first_error(Ok(()), [Err(anyhow!("raw mode")), Err(anyhow!("x"))])
            .unwrap_err()
            .to_string()
            .contains("raw mode"));
        assert!(first_error(Ok(()), [Ok(()), Ok(())]).is_ok());
    }
}
