//! Front-end controller: applies [`QuizAction`]s to a [`QuizGame`] and
//! tracks the bits of UI state the engine does not own (screen, cursor,
//! one-line notice).

use crate::core::{KeyValueStore, QuizError, QuizGame, RandomSource};
use crate::term::{FrameBuffer, MenuEntry, PlayFrame, QuizView, Viewport};
use crate::types::{Direction, ModeKey, Point, QuizAction, RoundPhase, MAP_BOUNDS, MAP_CENTER};

/// Cells moved per fast cursor step.
pub const FAST_STEP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    ModeSelect,
    Playing,
}

pub struct App<S, R> {
    game: QuizGame<S, R>,
    screen: Screen,
    cursor: Point,
    notice: Option<String>,
}

impl<S: KeyValueStore, R: RandomSource> App<S, R> {
    pub fn new(game: QuizGame<S, R>) -> Self {
        Self {
            game,
            screen: Screen::ModeSelect,
            cursor: MAP_CENTER,
            notice: None,
        }
    }

    pub fn game(&self) -> &QuizGame<S, R> {
        &self.game
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Apply one action. `step` is one map cell in degrees, `(lat, lng)`.
    pub fn handle(&mut self, action: QuizAction, step: (f64, f64)) {
        self.notice = None;
        match (self.screen, action) {
            (Screen::ModeSelect, QuizAction::SelectMode(mode)) => self.start(mode),
            (Screen::ModeSelect, QuizAction::Guess) => match self.game.resume_mode() {
                Some(mode) => self.start(mode),
                None => self.set_notice("Pick a mode with 1-5"),
            },

            (Screen::Playing, QuizAction::Move(dir)) => self.move_cursor(dir, step, 1.0),
            (Screen::Playing, QuizAction::MoveFast(dir)) => self.move_cursor(dir, step, FAST_STEP),
            (Screen::Playing, QuizAction::Guess) => {
                if let Err(e) = self.game.submit_guess(self.cursor) {
                    self.report(e);
                }
            }
            (Screen::Playing, QuizAction::Retry) => {
                if let Some(e) = self.game.retry().err() {
                    self.report(e);
                }
            }
            (Screen::Playing, QuizAction::Next) => match self.game.next_round().map(|_| ()) {
                Ok(_) => self.cursor = MAP_CENTER,
                Err(e) => self.report(e),
            },
            (Screen::Playing, QuizAction::ChangeMode) => {
                self.game.change_mode();
                self.screen = Screen::ModeSelect;
            }

            (_, QuizAction::ToggleCounties) => {
                let visible = self.game.session().counties_layer_visible;
                self.game.set_counties_visible(!visible);
            }
            (_, QuizAction::CyclePoolSize) => {
                let next = self.game.session().cities_pool_size.cycle();
                if let Err(e) = self.game.set_pool_size(next.as_raw()) {
                    self.report(e);
                }
            }

            _ => {}
        }
    }

    fn start(&mut self, mode: ModeKey) {
        match self.game.start_mode(mode).map(|_| ()) {
            Ok(_) => {
                self.screen = Screen::Playing;
                self.cursor = MAP_CENTER;
            }
            Err(e) => self.report(e),
        }
    }

    fn move_cursor(&mut self, dir: Direction, (dlat, dlng): (f64, f64), cells: f64) {
        if self.game.phase() != RoundPhase::AwaitingGuess {
            return;
        }
        let (lat, lng) = match dir {
            Direction::North => (dlat, 0.0),
            Direction::South => (-dlat, 0.0),
            Direction::East => (0.0, dlng),
            Direction::West => (0.0, -dlng),
        };
        let moved = Point::new(self.cursor.lat + lat * cells, self.cursor.lng + lng * cells);
        self.cursor = MAP_BOUNDS.clamp(moved);
    }

    fn report(&mut self, e: QuizError) {
        let text = match &e {
            QuizError::EmptyPool(mode) => format!("No {} data loaded", mode.as_str()),
            QuizError::RoundNotResolved => "Make a guess first".to_string(),
            other => other.to_string(),
        };
        self.notice = Some(text);
    }

    /// Rows of the mode menu, in catalog order.
    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        let last = self.game.resume_mode();
        crate::core::ModeCatalog::all()
            .iter()
            .map(|def| MenuEntry {
                key: def.key,
                label: def.label,
                available: self.game.pool_len(def.key),
                last_played: last == Some(def.key),
            })
            .collect()
    }

    /// Render the current screen into `fb`.
    pub fn render_into(&self, view: &QuizView, viewport: Viewport, fb: &mut FrameBuffer) {
        let snap = self.game.snapshot();
        match self.screen {
            Screen::ModeSelect => {
                view.render_menu_into(&self.menu_entries(), &snap, self.notice(), viewport, fb)
            }
            Screen::Playing => {
                let frame = PlayFrame {
                    snap: &snap,
                    cursor: self.cursor,
                    counties: &self.game.datasets().counties,
                    notice: self.notice(),
                };
                view.render_play_into(&frame, viewport, fb);
            }
        }
    }
}
