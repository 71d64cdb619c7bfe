//! Front-end controller: key actions to game operations and rendered frames.

mod common;

use common::michigan;
use geo_quiz::app::{App, Screen, FAST_STEP};
use geo_quiz::core::{MemoryStore, QuizGame, ScriptedRng};
use geo_quiz::term::{FrameBuffer, QuizView, Viewport};
use geo_quiz::types::{Direction, ModeKey, QuizAction, RoundPhase, MAP_BOUNDS, MAP_CENTER};

const STEP: (f64, f64) = (0.1, 0.1);

fn app_with(store: MemoryStore) -> App<MemoryStore, ScriptedRng> {
    App::new(QuizGame::new(michigan(), store, ScriptedRng::new(vec![0])))
}

fn app() -> App<MemoryStore, ScriptedRng> {
    app_with(MemoryStore::new())
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect()
}

#[test]
fn selecting_a_mode_starts_playing() {
    let mut app = app();
    assert_eq!(app.screen(), Screen::ModeSelect);

    app.handle(QuizAction::SelectMode(ModeKey::Cities), STEP);
    assert_eq!(app.screen(), Screen::Playing);
    assert_eq!(app.game().phase(), RoundPhase::AwaitingGuess);
    assert_eq!(app.cursor(), MAP_CENTER);
}

#[test]
fn empty_mode_stays_on_menu_with_notice() {
    let mut app = app();
    app.handle(QuizAction::SelectMode(ModeKey::Districts), STEP);
    assert_eq!(app.screen(), Screen::ModeSelect);
    assert_eq!(app.notice(), Some("No districts data loaded"));

    // Any later action clears it.
    app.handle(QuizAction::ToggleCounties, STEP);
    assert_eq!(app.notice(), None);
}

#[test]
fn cursor_moves_and_stays_on_the_map() {
    let mut app = app();
    app.handle(QuizAction::SelectMode(ModeKey::Cities), STEP);

    app.handle(QuizAction::Move(Direction::North), STEP);
    assert!((app.cursor().lat - (MAP_CENTER.lat + 0.1)).abs() < 1e-9);
    app.handle(QuizAction::MoveFast(Direction::West), STEP);
    assert!((app.cursor().lng - (MAP_CENTER.lng - 0.1 * FAST_STEP)).abs() < 1e-9);

    for _ in 0..200 {
        app.handle(QuizAction::MoveFast(Direction::South), STEP);
    }
    assert_eq!(app.cursor().lat, MAP_BOUNDS.south);
}

#[test]
fn guess_then_next_round() {
    let mut app = app();
    app.handle(QuizAction::SelectMode(ModeKey::Cities), STEP);
    app.handle(QuizAction::Guess, STEP);
    assert_eq!(app.game().phase(), RoundPhase::Resolved);

    // The cursor is frozen once the round is resolved.
    let before = app.cursor();
    app.handle(QuizAction::Move(Direction::East), STEP);
    assert_eq!(app.cursor(), before);

    app.handle(QuizAction::Next, STEP);
    assert_eq!(app.game().phase(), RoundPhase::AwaitingGuess);
    assert_eq!(app.game().snapshot().round_number, 2);
}

#[test]
fn retry_before_guess_shows_notice() {
    let mut app = app();
    app.handle(QuizAction::SelectMode(ModeKey::Parks), STEP);
    app.handle(QuizAction::Retry, STEP);
    assert_eq!(app.notice(), Some("Make a guess first"));
}

#[test]
fn change_mode_goes_back_to_menu() {
    let mut app = app();
    app.handle(QuizAction::SelectMode(ModeKey::Counties), STEP);
    app.handle(QuizAction::ChangeMode, STEP);
    assert_eq!(app.screen(), Screen::ModeSelect);
    assert_eq!(app.game().phase(), RoundPhase::Idle);
}

#[test]
fn enter_on_menu_resumes_last_mode() {
    let mut app = app_with(MemoryStore::with_values([("lastMode", "parks")]));
    assert!(app.menu_entries()[3].last_played);

    app.handle(QuizAction::Guess, STEP);
    assert_eq!(app.screen(), Screen::Playing);
    assert_eq!(app.game().active_mode(), Some(ModeKey::Parks));
}

#[test]
fn enter_on_menu_without_history_asks_for_a_mode() {
    let mut app = app();
    app.handle(QuizAction::Guess, STEP);
    assert_eq!(app.screen(), Screen::ModeSelect);
    assert!(app.notice().is_some());
}

#[test]
fn preferences_toggle_from_any_screen() {
    let mut app = app();
    app.handle(QuizAction::ToggleCounties, STEP);
    assert!(app.game().session().counties_layer_visible);

    app.handle(QuizAction::CyclePoolSize, STEP);
    assert_eq!(app.game().session().cities_pool_size.as_raw(), 50);
}

#[test]
fn menu_and_play_screens_render() {
    let view = QuizView::default();
    let vp = Viewport::new(100, 30);
    let mut fb = FrameBuffer::new(0, 0);

    let mut app = app();
    app.render_into(&view, vp, &mut fb);
    let menu = screen_text(&fb);
    assert!(menu.contains("1  Major Cities  (4 targets)"));
    assert!(menu.contains("5  Congressional Districts  (no data)"));

    app.handle(QuizAction::SelectMode(ModeKey::Cities), STEP);
    app.render_into(&view, vp, &mut fb);
    let play = screen_text(&fb);
    assert!(play.contains("Major Cities"));
    assert!(play.contains("Detroit"));
    assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('┌'));
}
