//! Terminal front-end rendering.
//!
//! A small renderer in the style of a game loop: views draw into a plain
//! framebuffer, and [`TerminalRenderer`] flushes only what changed. No
//! widget toolkit is involved.
//!
//! - [`fb`]: cells, styles and the framebuffer
//! - [`projection`]: lat/lng to character-grid mapping
//! - [`quiz_view`]: the map, markers, side panel and mode menu
//! - [`renderer`]: crossterm output

pub mod fb;
pub mod projection;
pub mod quiz_view;
pub mod renderer;

pub use geo_quiz_core as core;
pub use geo_quiz_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use projection::MapProjection;
pub use quiz_view::{MenuEntry, PlayFrame, QuizView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
