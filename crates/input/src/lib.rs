//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::QuizAction`]s. The
//! mapping is context-free: the front-end decides which actions apply to the
//! screen it is showing.

pub mod map;

pub use geo_quiz_types as types;

pub use map::{handle_key_event, should_quit};
