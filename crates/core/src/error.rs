use geo_quiz_types::ModeKey;
use thiserror::Error;

/// Errors surfaced by the quiz engine.
///
/// None of these leave the game in a half-updated state: the failing
/// operation is rejected and the previous state is kept.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuizError {
    #[error("unknown mode: {0}")]
    UnknownMode(String),

    #[error("no targets available for mode {}", .0.as_str())]
    EmptyPool(ModeKey),

    #[error("invalid pool size {0}: expected -1 or a positive count")]
    InvalidPoolSize(i64),

    #[error("no round in progress")]
    NoActiveRound,

    #[error("round has not been guessed yet")]
    RoundNotResolved,

    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;
