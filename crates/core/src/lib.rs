//! Core quiz logic - pure, deterministic, and testable
//!
//! This crate contains the scoring engine of the geography quiz: target
//! selection, guess evaluation and session progression. It does no I/O of its
//! own; datasets come in as [`Datasets`], persistence goes out through the
//! [`KeyValueStore`] trait and randomness through [`RandomSource`].
//!
//! - **Deterministic**: a scripted or seeded random source fixes every draw
//! - **Testable**: every rule is a plain function or a small state machine
//! - **Portable**: the same engine drives the terminal front-end and tests
//!
//! # Module Structure
//!
//! - [`geometry`]: haversine distance, ray-casting containment, bounding boxes
//! - [`catalog`]: the static table of quiz modes
//! - [`pool`]: datasets and per-mode target pools
//! - [`rng`]: injectable randomness
//! - [`round`]: the per-round state machine and scoring rule
//! - [`session`]: streak, high score and persisted preferences
//! - [`game`]: the facade a front-end drives
//! - [`snapshot`]: read-only frame data for renderers
//!
//! # Rules
//!
//! - **Distance modes** (cities, county seats): a hit is strictly under the
//!   mode's mileage threshold
//! - **Boundary modes** (counties, parks, districts): a hit is inside the
//!   target's outer boundary
//! - **One guess counts**: re-submitting in the same round changes nothing
//! - **Streak**: hits in a row; a miss resets it, the high score never drops
//!
//! # Example
//!
//! ```
//! use geo_quiz_core::{Datasets, MemoryStore, QuizGame, ScriptedRng};
//! use geo_quiz_types::{Category, MessageTier, ModeKey, Point, Target};
//!
//! let detroit = Target {
//!     population: Some(639_111),
//!     ..Target::point("Detroit", Category::City, Point::new(42.3314, -83.0458))
//! };
//! let data = Datasets { cities: vec![detroit], ..Datasets::default() };
//!
//! let mut game = QuizGame::new(data, MemoryStore::new(), ScriptedRng::new(vec![0]));
//! assert_eq!(game.start_mode(ModeKey::Cities).unwrap().name, "Detroit");
//!
//! let outcome = game.submit_guess(Point::new(42.3314, -83.0458)).unwrap();
//! assert_eq!(outcome.distance_miles, 0.0);
//! assert_eq!(outcome.tier, MessageTier::Excellent);
//! assert_eq!(game.session().streak, 1);
//! ```

pub mod catalog;
pub mod error;
pub mod game;
pub mod geometry;
pub mod pool;
pub mod rng;
pub mod round;
pub mod session;
pub mod snapshot;

pub use geo_quiz_types as types;

// Re-export commonly used types for convenience
pub use catalog::ModeCatalog;
pub use error::{QuizError, Result};
pub use game::QuizGame;
pub use geometry::{bbox_center, distance_miles, point_in_polygon};
pub use pool::{Datasets, TargetPool};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use round::{RoundEngine, RoundState};
pub use session::{KeyValueStore, MemoryStore, SessionState, SessionTracker};
pub use snapshot::{GameSnapshot, TargetDetails};
