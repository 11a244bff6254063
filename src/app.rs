use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::media::PrefetchError;
use crate::models::{MediaItem, QuestionOrder, MAX_MULTIPLIER};
use crate::quiz::{GameMode, Progress, QuizSession, SessionSummary};

/// Numbers on the home grid per row.
pub const HOME_COLUMNS: u32 = 4;

/// What the home screen is doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeStatus {
    Idle,
    /// Rewards are being fetched; the grid does not react.
    Loading { number: u32 },
    /// The last prefetch failed. Choosing a number again retries.
    Failed { number: u32, message: String },
}

#[derive(Debug, Clone)]
pub struct HomeState {
    /// Highlighted number, 1..=12.
    pub cursor: u32,
    pub status: HomeStatus,
    /// Set after a session finishes.
    pub last_summary: Option<SessionSummary>,
}

impl HomeState {
    fn new(cursor: u32) -> Self {
        Self {
            cursor,
            status: HomeStatus::Idle,
            last_summary: None,
        }
    }
}

/// The screen currently shown. Only moves forward, then back to `Home`.
#[derive(Debug, Clone)]
pub enum Screen {
    Home(HomeState),
    OrderSelect {
        number: u32,
        media: Arc<[MediaItem]>,
        selected: usize,
    },
    GameModeSelect {
        number: u32,
        media: Arc<[MediaItem]>,
        order: QuestionOrder,
        selected: usize,
    },
    Quiz(QuizSession),
}

pub struct App {
    pub screen: Screen,
    rng: StdRng,
}

impl App {
    /// `seed` makes question order and answer choices reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            screen: Screen::Home(HomeState::new(1)),
            rng,
        }
    }

    pub fn home(&self) -> Option<&HomeState> {
        match &self.screen {
            Screen::Home(home) => Some(home),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.home(),
            Some(HomeState {
                status: HomeStatus::Loading { .. },
                ..
            })
        )
    }

    /// Moves the home cursor by `delta`, wrapping around the grid.
    pub fn move_home_cursor(&mut self, delta: i32) {
        if self.is_loading() {
            return;
        }
        if let Screen::Home(home) = &mut self.screen {
            let count = MAX_MULTIPLIER as i32;
            let index = (home.cursor as i32 - 1 + delta).rem_euclid(count);
            home.cursor = index as u32 + 1;
        }
    }

    /// Starts loading rewards for the highlighted number.
    ///
    /// Returns the number to prefetch for, or `None` if nothing should start.
    pub fn choose_number(&mut self) -> Option<u32> {
        let Screen::Home(home) = &mut self.screen else {
            return None;
        };
        if matches!(home.status, HomeStatus::Loading { .. }) {
            return None;
        }

        let number = home.cursor;
        home.status = HomeStatus::Loading { number };
        home.last_summary = None;
        log::info!("practising {}", number);
        Some(number)
    }

    /// Hands the prefetch result to the waiting home screen.
    pub fn finish_prefetch(&mut self, result: Result<Vec<MediaItem>, PrefetchError>) {
        let Screen::Home(home) = &mut self.screen else {
            return;
        };
        let HomeStatus::Loading { number } = home.status else {
            return;
        };

        match result {
            Ok(media) => {
                self.screen = Screen::OrderSelect {
                    number,
                    media: media.into(),
                    selected: 0,
                };
            }
            Err(e) => {
                log::warn!("prefetch for {} failed: {}", number, e);
                home.status = HomeStatus::Failed {
                    number,
                    message: e.to_string(),
                };
            }
        }
    }

    /// Used when the prefetch task itself died.
    pub fn fail_loading(&mut self, message: String) {
        if let Screen::Home(home) = &mut self.screen {
            if let HomeStatus::Loading { number } = home.status {
                log::warn!("prefetch for {} stopped: {}", number, message);
                home.status = HomeStatus::Failed { number, message };
            }
        }
    }

    pub fn select_next(&mut self) {
        if let Screen::OrderSelect { selected, .. } | Screen::GameModeSelect { selected, .. } =
            &mut self.screen
        {
            *selected = (*selected + 1) % 2;
        }
    }

    pub fn select_previous(&mut self) {
        // Both selection screens offer two options.
        self.select_next();
    }

    /// Jumps straight to option `index` on a selection screen.
    pub fn select(&mut self, index: usize) {
        if let Screen::OrderSelect { selected, .. } | Screen::GameModeSelect { selected, .. } =
            &mut self.screen
        {
            if index < 2 {
                *selected = index;
            }
        }
    }

    /// Confirms the highlighted option and moves to the next screen.
    pub fn confirm_selection(&mut self) {
        let next = match &self.screen {
            Screen::OrderSelect {
                number,
                media,
                selected,
            } => Screen::GameModeSelect {
                number: *number,
                media: Arc::clone(media),
                order: QuestionOrder::ALL[*selected],
                selected: 0,
            },
            Screen::GameModeSelect {
                number,
                media,
                order,
                selected,
            } => {
                let mode = GameMode::ALL[*selected];
                match QuizSession::new(*number, *order, mode, Arc::clone(media), &mut self.rng) {
                    Ok(session) => {
                        log::info!("starting {:?} quiz for {} in {:?} order", mode, number, order);
                        Screen::Quiz(session)
                    }
                    Err(e) => Screen::Home(HomeState {
                        cursor: *number,
                        status: HomeStatus::Failed {
                            number: *number,
                            message: e.to_string(),
                        },
                        last_summary: None,
                    }),
                }
            }
            _ => return,
        };

        self.screen = next;
    }

    pub fn quiz(&self) -> Option<&QuizSession> {
        match &self.screen {
            Screen::Quiz(session) => Some(session),
            _ => None,
        }
    }

    pub fn quiz_mut(&mut self) -> Option<&mut QuizSession> {
        match &mut self.screen {
            Screen::Quiz(session) => Some(session),
            _ => None,
        }
    }

    /// Moves past a correctly answered question. After the last one the
    /// session is dropped and the home screen shows its summary.
    pub fn advance(&mut self) -> Progress {
        let Screen::Quiz(session) = &mut self.screen else {
            return Progress::NotReady;
        };

        let progress = session.advance(&mut self.rng);
        if let Progress::Finished(summary) = &progress {
            log::info!(
                "finished {} with {} wrong attempts",
                summary.number,
                summary.wrong_attempts
            );
            self.screen = Screen::Home(HomeState {
                cursor: summary.number,
                status: HomeStatus::Idle,
                last_summary: Some(summary.clone()),
            });
        }
        progress
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaKind, QUESTIONS_PER_SESSION};

    fn rewards() -> Vec<MediaItem> {
        (0..QUESTIONS_PER_SESSION)
            .map(|i| MediaItem::new(format!("https://pets.test/{}.gif", i), MediaKind::Gif, "Dog"))
            .collect()
    }

    #[test]
    fn test_home_cursor_wraps() {
        let mut app = App::new(Some(1));
        app.move_home_cursor(-1);
        assert_eq!(app.home().map(|h| h.cursor), Some(12));
        app.move_home_cursor(HOME_COLUMNS as i32);
        assert_eq!(app.home().map(|h| h.cursor), Some(4));
    }

    #[test]
    fn test_home_blocked_while_loading() {
        let mut app = App::new(Some(1));
        assert_eq!(app.choose_number(), Some(1));
        assert!(app.is_loading());

        assert_eq!(app.choose_number(), None);
        app.move_home_cursor(1);
        assert_eq!(app.home().map(|h| h.cursor), Some(1));
    }

    #[test]
    fn test_failed_prefetch_can_be_retried() {
        let mut app = App::new(Some(1));
        app.choose_number();
        app.finish_prefetch(Err(PrefetchError::AllSourcesDown));

        let home = app.home().expect("home");
        assert!(matches!(home.status, HomeStatus::Failed { number: 1, .. }));

        assert_eq!(app.choose_number(), Some(1));
        assert!(app.is_loading());
    }

    #[test]
    fn test_prefetch_result_without_loading_is_ignored() {
        let mut app = App::new(Some(1));
        app.finish_prefetch(Ok(rewards()));
        assert!(matches!(
            app.home().map(|h| &h.status),
            Some(HomeStatus::Idle)
        ));
    }

    #[test]
    fn test_short_prefetch_returns_home() {
        let mut app = App::new(Some(1));
        app.choose_number();
        app.finish_prefetch(Ok(rewards()[..5].to_vec()));
        app.confirm_selection();
        app.confirm_selection();

        assert!(matches!(
            app.home().map(|h| &h.status),
            Some(HomeStatus::Failed { .. })
        ));
    }

    #[test]
    fn test_fail_loading() {
        let mut app = App::new(Some(1));
        app.choose_number();
        app.fail_loading("task panicked".to_string());

        assert!(matches!(
            app.home().map(|h| &h.status),
            Some(HomeStatus::Failed { message, .. }) if message == "task panicked"
        ));
    }

    #[test]
    fn test_selection_screens() {
        let mut app = App::new(Some(1));
        app.move_home_cursor(6);
        assert_eq!(app.choose_number(), Some(7));
        app.finish_prefetch(Ok(rewards()));
        assert!(matches!(app.screen, Screen::OrderSelect { number: 7, .. }));

        app.select(1);
        app.confirm_selection();
        assert!(matches!(
            app.screen,
            Screen::GameModeSelect {
                order: QuestionOrder::Random,
                ..
            }
        ));

        app.select_next();
        app.confirm_selection();

        let session = app.quiz().expect("quiz");
        assert_eq!(session.number(), 7);
        assert_eq!(session.order(), QuestionOrder::Random);
        assert_eq!(session.mode(), GameMode::Typed);
    }
}
