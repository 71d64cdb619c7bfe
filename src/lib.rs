//! Michigan geography quiz (workspace facade crate).
//!
//! The engine, data loading, input mapping and terminal rendering live in
//! dedicated crates under `crates/`; this package re-exports them as
//! `geo_quiz::{core,data,input,term,types}` and adds the [`app`] controller
//! the binary drives.

pub mod app;

pub use geo_quiz_core as core;
pub use geo_quiz_data as data;
pub use geo_quiz_input as input;
pub use geo_quiz_term as term;
pub use geo_quiz_types as types;
