use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossterm::event::KeyCode;
use multiply_pets::media::{prefetch, FetchError};
use multiply_pets::{
    handle_input, Action, AnswerInput, AnswerStatus, App, FetchMedia, GameMode, HomeStatus,
    MediaItem, MediaKind, PrefetchConfig, QuestionOrder, Screen,
};

struct CountingFetcher {
    calls: AtomicUsize,
}

impl FetchMedia for CountingFetcher {
    fn fetch(&self) -> impl Future<Output = Result<MediaItem, FetchError>> + Send {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        async move {
            Ok(MediaItem::new(
                format!("https://pets.test/{}.mp4", call),
                MediaKind::Video,
                "Dog",
            ))
        }
    }

    fn warm(&self, _item: &MediaItem) {}
}

async fn start_session(number: u32, order_key: char, mode_key: char) -> App {
    let mut app = App::new(Some(2024));
    for _ in 1..number {
        handle_input(&mut app, KeyCode::Right);
    }
    assert_eq!(handle_input(&mut app, KeyCode::Enter), Action::Prefetch(number));
    assert!(app.is_loading());

    let fetcher = CountingFetcher {
        calls: AtomicUsize::new(0),
    };
    let media = prefetch(&fetcher, &PrefetchConfig::default()).await;
    app.finish_prefetch(media);

    handle_input(&mut app, KeyCode::Char(order_key));
    handle_input(&mut app, KeyCode::Enter);
    handle_input(&mut app, KeyCode::Char(mode_key));
    handle_input(&mut app, KeyCode::Enter);
    app
}

fn press_correct_choice(app: &mut App) {
    let session = app.quiz().expect("quiz");
    let product = session.current_question().product;
    let AnswerInput::MultipleChoice { choices, .. } = session.input() else {
        panic!("expected choices");
    };
    let index = choices.iter().position(|&c| c == product).expect("product offered");
    let key = char::from_digit(index as u32 + 1, 10).expect("digit");
    handle_input(app, KeyCode::Char(key));
}

#[tokio::test]
async fn typed_session_runs_back_to_home() {
    let mut app = start_session(7, '1', '2').await;

    let session = app.quiz().expect("quiz");
    assert_eq!(session.mode(), GameMode::Typed);
    assert_eq!(session.order(), QuestionOrder::Sequential);

    for index in 0..12 {
        let session = app.quiz().expect("quiz still running");
        assert_eq!(session.current_index(), index);
        let product = session.current_question().product;
        assert_eq!(product, 7 * (index as u32 + 1));

        handle_input(&mut app, KeyCode::Char('x'));
        handle_input(&mut app, KeyCode::Enter);
        assert_eq!(app.quiz().map(|s| s.status()), Some(AnswerStatus::Wrong));
        assert!(app.quiz().and_then(|s| s.revealed_media()).is_none());

        handle_input(&mut app, KeyCode::Backspace);
        for c in product.to_string().chars() {
            handle_input(&mut app, KeyCode::Char(c));
        }
        handle_input(&mut app, KeyCode::Enter);

        let reward = app.quiz().and_then(|s| s.revealed_media()).expect("reward");
        assert_eq!(reward.locator, format!("https://pets.test/{}.mp4", index));

        handle_input(&mut app, KeyCode::Enter);
    }

    let home = app.home().expect("back home");
    assert_eq!(home.status, HomeStatus::Idle);
    assert_eq!(home.cursor, 7);
    let summary = home.last_summary.as_ref().expect("summary");
    assert_eq!(summary.number, 7);
    assert_eq!(summary.wrong_attempts, 12);
}

#[tokio::test]
async fn random_multiple_choice_session() {
    let mut app = start_session(3, '2', '1').await;

    let session = app.quiz().expect("quiz");
    assert_eq!(session.mode(), GameMode::MultipleChoice);
    let mut products: Vec<u32> = session.questions().iter().map(|q| q.product).collect();
    products.sort_unstable();
    assert_eq!(products, (1..=12).map(|m| 3 * m).collect::<Vec<_>>());

    for _ in 0..12 {
        press_correct_choice(&mut app);
        assert_eq!(app.quiz().map(|s| s.status()), Some(AnswerStatus::Correct));
        handle_input(&mut app, KeyCode::Char('n'));
    }

    assert!(matches!(app.screen, Screen::Home(_)));
    assert_eq!(handle_input(&mut app, KeyCode::Enter), Action::Prefetch(3));
}

#[tokio::test]
async fn advancing_needs_a_correct_answer() {
    let mut app = start_session(5, '1', '2').await;

    handle_input(&mut app, KeyCode::Enter);
    handle_input(&mut app, KeyCode::Enter);
    assert_eq!(app.quiz().map(|s| s.current_index()), Some(0));
}

#[test]
fn escape_quits_from_anywhere() {
    let mut app = App::new(None);
    assert_eq!(handle_input(&mut app, KeyCode::Esc), Action::Quit);
    assert_eq!(handle_input(&mut app, KeyCode::Char('q')), Action::Quit);
}

#[test]
fn loading_home_ignores_input() {
    let mut app = App::new(None);
    assert_eq!(handle_input(&mut app, KeyCode::Enter), Action::Prefetch(1));
    assert_eq!(handle_input(&mut app, KeyCode::Enter), Action::None);
    handle_input(&mut app, KeyCode::Right);
    assert_eq!(app.home().map(|h| h.cursor), Some(1));
}
