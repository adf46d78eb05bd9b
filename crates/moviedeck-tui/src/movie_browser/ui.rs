//! TUI rendering logic for the movie browser.

use chrono::Datelike;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use moviedeck_api::tmdb::Movie;

use super::state::{InputMode, MovieScreen, NoticeLevel};

/// Placeholder shown instead of a poster URL.
const NO_IMAGE: &str = "[no image]";

/// Draws the movie browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, screen: &MovieScreen) {
    let banner = screen.banner_messages();
    let banner_height = if banner.is_empty() {
        0
    } else {
        u16::try_from(banner.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // header + search
            Constraint::Length(banner_height), // error banner
            Constraint::Min(5),                // main content
            Constraint::Length(3),             // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], screen);
    if !banner.is_empty() {
        draw_banner(frame, chunks[1], &banner);
    }
    draw_main(frame, chunks[2], screen);
    draw_footer(frame, chunks[3], screen);

    if screen.notice.is_some() {
        draw_notice(frame, screen);
    }
}

/// Draws the search input and the status box.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, screen: &MovieScreen) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let search_style = if screen.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(screen.query.as_str())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[0]);

    let status = if screen.refreshing {
        String::from("Refreshing...")
    } else if screen.is_loading() {
        String::from("Loading...")
    } else {
        format!("{} movies", screen.movies.len())
    };
    let status = Paragraph::new(status).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" The Movie Database "),
    );
    frame.render_widget(status, header_chunks[1]);
}

/// Draws the inline error banner.
fn draw_banner(frame: &mut Frame, area: Rect, messages: &[&str]) {
    let lines: Vec<Line> = messages
        .iter()
        .map(|m| Line::from(Span::raw(String::from(*m))))
        .collect();
    let banner = Paragraph::new(lines)
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        );
    frame.render_widget(banner, area);
}

/// Draws the list pane and the detail pane.
#[allow(clippy::indexing_slicing)]
fn draw_main(frame: &mut Frame, area: Rect, screen: &MovieScreen) {
    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_list_pane(frame, pane_chunks[0], screen);
    draw_detail_pane(frame, pane_chunks[1], screen);
}

fn release_year(movie: &Movie) -> String {
    movie
        .parsed_release_date()
        .map_or_else(|| String::from("----"), |d| d.year().to_string())
}

/// Draws the movie list (left pane).
fn draw_list_pane(frame: &mut Frame, area: Rect, screen: &MovieScreen) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", screen.list_title()));

    if screen.movies.is_empty() {
        let text = if screen.is_loading() {
            "Loading..."
        } else {
            "No movies to show"
        };
        let placeholder = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = screen
        .movies
        .iter()
        .enumerate()
        .map(|(i, movie)| {
            let is_cursor = i == screen.cursor();
            let marker = if is_cursor { "\u{25b8} " } else { "  " };
            let style = if is_cursor {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let image_marker = if screen.poster_url(movie).is_some() {
                " "
            } else {
                "\u{25a1}"
            };

            ListItem::new(Line::from(vec![
                Span::raw(String::from(marker)),
                Span::raw(String::from(image_marker)),
                Span::styled(
                    format!(" {} ({})", movie.title, release_year(movie)),
                    style,
                ),
                Span::styled(
                    format!("  \u{2605}{:.1}", movie.vote_average),
                    Style::default().fg(Color::Yellow),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Draws the detail view of the movie under the cursor (right pane).
fn draw_detail_pane(frame: &mut Frame, area: Rect, screen: &MovieScreen) {
    let block = Block::default().borders(Borders::ALL).title(" Details ");

    let Some(movie) = screen.selected_movie() else {
        frame.render_widget(block, area);
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let release = movie.parsed_release_date().map_or_else(
        || String::from("Release date unavailable"),
        |d| d.format("%Y-%m-%d").to_string(),
    );
    let poster = screen
        .poster_url(movie)
        .unwrap_or_else(|| String::from(NO_IMAGE));

    let lines = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Original:   ", label),
            Span::raw(movie.original_title.clone()),
        ]),
        Line::from(vec![
            Span::styled("Released:   ", label),
            Span::raw(release),
        ]),
        Line::from(vec![
            Span::styled("Rating:     ", label),
            Span::raw(format!(
                "{:.1}/10 ({} votes)",
                movie.vote_average, movie.vote_count
            )),
        ]),
        Line::from(vec![
            Span::styled("Popularity: ", label),
            Span::raw(format!("{:.1}", movie.popularity)),
        ]),
        Line::from(vec![
            Span::styled("Poster:     ", label),
            Span::raw(poster),
        ]),
        Line::default(),
        Line::from(movie.overview.clone()),
    ];

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(detail, area);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, screen: &MovieScreen) {
    let help_text = if screen.input_mode == InputMode::Search {
        "Type a title | Enter: search | Esc: cancel"
    } else {
        "\u{2191}\u{2193}/j/k: move  /: search  r: refresh  o: open in browser  q: quit"
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Draws the notice dialog centered over the screen.
#[allow(clippy::indexing_slicing)]
fn draw_notice(frame: &mut Frame, screen: &MovieScreen) {
    let Some(notice) = screen.notice.as_ref() else {
        return;
    };

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(5),
            Constraint::Fill(1),
        ])
        .split(frame.area());
    let area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Percentage(50),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1];

    let color = match notice.level {
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Error => Color::Red,
    };
    let dialog = Paragraph::new(vec![
        Line::from(notice.message.clone()),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", notice.title)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use moviedeck_api::tmdb::SearchResult;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn render(screen: &MovieScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| draw(frame, screen)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn loaded_screen() -> MovieScreen {
        let page: SearchResult = serde_json::from_str(include_str!(
            "../../../../fixtures/tmdb/search_movie_batman.json"
        ))
        .unwrap();
        let mut screen = MovieScreen::new("w300");
        let ticket = screen.begin_popular();
        screen.finish_popular(ticket, Ok(page));
        screen
    }

    #[test]
    fn test_draw_lists_movies_with_placeholder_poster() {
        // Arrange
        let screen = loaded_screen();

        // Act
        let output = render(&screen);

        // Assert
        assert!(output.contains("Popular Movies"));
        assert!(output.contains("Batman (1989)"));
        assert!(output.contains(NO_IMAGE));
    }

    #[test]
    fn test_draw_empty_state() {
        // Arrange
        let mut screen = MovieScreen::new("w300");
        let ticket = screen.begin_popular();
        screen.finish_popular(
            ticket,
            Ok(SearchResult {
                page: 1,
                results: Vec::new(),
                total_pages: 0,
                total_results: 0,
            }),
        );

        // Act
        let output = render(&screen);

        // Assert
        assert!(output.contains("No movies to show"));
    }

    #[test]
    fn test_draw_notice_popup() {
        // Arrange
        let mut screen = loaded_screen();
        screen.query = String::from(" ");
        let _ = screen.submit_search();

        // Act
        let output = render(&screen);

        // Assert
        assert!(output.contains("Please enter a search term"));
    }
}
