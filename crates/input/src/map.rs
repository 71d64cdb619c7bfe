//! Key mapping from terminal events to quiz actions.

use crate::types::{Direction, ModeKey, QuizAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to quiz actions.
///
/// Shift (or the upper-case vi key) moves the cursor in large steps.
pub fn handle_key_event(key: KeyEvent) -> Option<QuizAction> {
    let fast = key.modifiers.contains(KeyModifiers::SHIFT);
    let step = |dir: Direction, upper: bool| {
        if fast || upper {
            Some(QuizAction::MoveFast(dir))
        } else {
            Some(QuizAction::Move(dir))
        }
    };

    match key.code {
        // Cursor
        KeyCode::Up => step(Direction::North, false),
        KeyCode::Down => step(Direction::South, false),
        KeyCode::Left => step(Direction::West, false),
        KeyCode::Right => step(Direction::East, false),
        KeyCode::Char('k') => step(Direction::North, false),
        KeyCode::Char('K') => step(Direction::North, true),
        KeyCode::Char('j') => step(Direction::South, false),
        KeyCode::Char('J') => step(Direction::South, true),
        KeyCode::Char('h') => step(Direction::West, false),
        KeyCode::Char('H') => step(Direction::West, true),
        KeyCode::Char('l') => step(Direction::East, false),
        KeyCode::Char('L') => step(Direction::East, true),

        // Round
        KeyCode::Enter | KeyCode::Char(' ') => Some(QuizAction::Guess),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(QuizAction::Retry),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Tab => Some(QuizAction::Next),
        KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => Some(QuizAction::ChangeMode),

        // Mode selection
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as u8 - b'1') as usize;
            Some(QuizAction::SelectMode(ModeKey::ALL[idx]))
        }

        // Preferences
        KeyCode::Char('c') | KeyCode::Char('C') => Some(QuizAction::ToggleCounties),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(QuizAction::CyclePoolSize),

        _ => None,
    }
}

/// Check if key should quit the quiz.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
