//! Data module - loading quiz datasets and persisting the session
//!
//! This crate is the I/O side of the quiz. It turns data files into the
//! normalized [`Target`](geo_quiz_types::Target) records the core consumes and
//! provides a file-backed [`KeyValueStore`](geo_quiz_core::KeyValueStore).
//!
//! # Data Directory
//!
//! | File | Content |
//! |------|---------|
//! | `cities.json` | array of city objects, or a FeatureCollection of points |
//! | `counties.geojson` | FeatureCollection of county polygons |
//! | `parks.geojson` | FeatureCollection of state park polygons |
//! | `districts.geojson` | FeatureCollection of congressional district polygons |
//!
//! Property names are normalized across exporters, so `Name`, `name` and
//! `NAME` all work, as do `funFact`, `fun_fact` and `description`.
//!
//! # Failure Model
//!
//! Loading never fails as a whole. A missing or malformed file leaves its
//! source empty and is reported in [`LoadReport::failures`]; modes built on
//! that source then refuse to start with an empty-pool error.
//!
//! # Configuration
//!
//! See [`QuizConfig::from_env`] for the environment variables.

pub mod config;
pub mod error;
pub mod loader;
pub mod records;
pub mod store;

pub use config::QuizConfig;
pub use error::DataLoadError;
pub use loader::{file_name, load_all, load_dataset, LoadReport};
pub use records::{parse_areas, parse_cities};
pub use store::JsonFileStore;
