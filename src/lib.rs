//! # multiply-pets
//!
//! A terminal times-table quiz. Pick a number, answer its twelve
//! multiplication questions and earn a random animal picture for every
//! correct answer.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use multiply_pets::{Game, GameError, HttpFetcher, PrefetchConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), GameError> {
//!     let fetcher = HttpFetcher::new()?;
//!     let game = Game::new(fetcher, PrefetchConfig::default(), None);
//!
//!     // Takes over the terminal until the player quits
//!     game.run().await
//! }
//! ```

mod app;
pub mod media;
mod models;
pub mod quiz;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tokio::task::JoinHandle;

pub use app::{App, HomeState, HomeStatus, Screen, HOME_COLUMNS};
pub use media::{FetchMedia, HttpFetcher, JoinPolicy, PrefetchConfig, PrefetchError};
pub use models::{generate_questions, MediaItem, MediaKind, Question, QuestionOrder};
pub use quiz::{AnswerInput, AnswerStatus, GameMode, Progress, QuizSession, SessionSummary};

/// How long to wait for a key before checking on the prefetch again.
const TICK: Duration = Duration::from_millis(50);

/// Error type for running the game.
#[derive(Debug)]
pub enum GameError {
    /// Terminal IO failed.
    Io(io::Error),
    /// The HTTP client could not be set up.
    Http(reqwest::Error),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::Io(e) => write!(f, "IO error: {}", e),
            GameError::Http(e) => write!(f, "HTTP client error: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            GameError::Http(e) => Some(e),
        }
    }
}

impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        GameError::Io(err)
    }
}

impl From<reqwest::Error> for GameError {
    fn from(err: reqwest::Error) -> Self {
        GameError::Http(err)
    }
}

type PrefetchTask = JoinHandle<Result<Vec<MediaItem>, PrefetchError>>;

/// The in-flight prefetch, if any. Dropping it aborts the task, so an early
/// return from the event loop never leaves fetches running.
#[derive(Default)]
struct PendingPrefetch(Option<PrefetchTask>);

impl PendingPrefetch {
    fn start(&mut self, task: PrefetchTask) {
        if let Some(old) = self.0.replace(task) {
            old.abort();
        }
    }

    fn take_finished(&mut self) -> Option<PrefetchTask> {
        self.0.take_if(|task| task.is_finished())
    }
}

impl Drop for PendingPrefetch {
    fn drop(&mut self) {
        if let Some(task) = self.0.take() {
            task.abort();
        }
    }
}

/// A game that can be run in the terminal.
pub struct Game<F: FetchMedia> {
    app: App,
    fetcher: Arc<F>,
    config: PrefetchConfig,
}

impl<F: FetchMedia> Game<F> {
    pub fn new(fetcher: F, config: PrefetchConfig, seed: Option<u64>) -> Self {
        Self {
            app: App::new(seed),
            fetcher: Arc::new(fetcher),
            config,
        }
    }

    /// Run the game in the terminal.
    ///
    /// This takes over the terminal and returns when the player quits.
    /// Must be called from within a multi-threaded tokio runtime.
    pub async fn run(mut self) -> Result<(), GameError> {
        let mut term = terminal::TerminalSession::enter()?;
        let result = self.event_loop(&mut term).await;
        term.leave()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    async fn event_loop(&mut self, term: &mut terminal::TerminalSession) -> Result<(), GameError> {
        let mut pending = PendingPrefetch::default();

        loop {
            if let Some(task) = pending.take_finished() {
                match task.await {
                    Ok(result) => self.app.finish_prefetch(result),
                    Err(e) => self.app.fail_loading(e.to_string()),
                }
            }

            term.draw(|frame| ui::render(frame, &self.app))?;

            if !event::poll(TICK)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match handle_input(&mut self.app, key.code) {
                Action::None => {}
                Action::Quit => break,
                Action::Prefetch(number) => {
                    log::debug!("spawning prefetch for {}", number);
                    pending.start(self.spawn_prefetch());
                }
            }
        }

        Ok(())
    }

    fn spawn_prefetch(&self) -> PrefetchTask {
        let fetcher = Arc::clone(&self.fetcher);
        let config = self.config.clone();
        tokio::spawn(async move { media::prefetch(fetcher.as_ref(), &config).await })
    }
}

/// What the runner should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// Fetch rewards for this number.
    Prefetch(u32),
}

/// Routes a key press to the current screen.
pub fn handle_input(app: &mut App, key: KeyCode) -> Action {
    if key == KeyCode::Esc {
        return Action::Quit;
    }

    match app.screen {
        Screen::Home(_) => handle_home_input(app, key),
        Screen::OrderSelect { .. } | Screen::GameModeSelect { .. } => {
            handle_selection_input(app, key)
        }
        Screen::Quiz(_) => handle_quiz_input(app, key),
    }
}

fn handle_home_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Action::Quit,
        _ if app.is_loading() => {}
        KeyCode::Left | KeyCode::Char('h') => app.move_home_cursor(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_home_cursor(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_home_cursor(-(HOME_COLUMNS as i32)),
        KeyCode::Down | KeyCode::Char('j') => app.move_home_cursor(HOME_COLUMNS as i32),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(number) = app.choose_number() {
                return Action::Prefetch(number);
            }
        }
        _ => {}
    }
    Action::None
}

fn handle_selection_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('1') => app.select(0),
        KeyCode::Char('2') => app.select(1),
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm_selection(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Action::Quit,
        _ => {}
    }
    Action::None
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> Action {
    let Some(status) = app.quiz().map(QuizSession::status) else {
        return Action::None;
    };

    if status == AnswerStatus::Correct {
        match key {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') => {
                app.advance();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return Action::Quit,
            _ => {}
        }
        return Action::None;
    }

    let Some(session) = app.quiz_mut() else {
        return Action::None;
    };
    match session.mode() {
        GameMode::MultipleChoice => match key {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                session.select_previous_choice()
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                session.select_next_choice()
            }
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                session.pick_choice(index);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                session.submit_input();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return Action::Quit,
            _ => {}
        },
        GameMode::Typed => match key {
            KeyCode::Char(c) => session.input_push(c),
            KeyCode::Backspace => session.input_pop(),
            KeyCode::Enter => {
                session.submit_input();
            }
            _ => {}
        },
    }
    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stalled_task() -> PrefetchTask {
        tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        })
    }

    #[tokio::test]
    async fn test_dropping_pending_prefetch_aborts_it() {
        let task = stalled_task();
        let handle = task.abort_handle();

        let mut pending = PendingPrefetch::default();
        pending.start(task);
        drop(pending);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_restarting_prefetch_aborts_the_old_one() {
        let first = stalled_task();
        let first_handle = first.abort_handle();

        let mut pending = PendingPrefetch::default();
        pending.start(first);
        pending.start(stalled_task());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(first_handle.is_finished());
        assert!(pending.take_finished().is_none());
    }
}
