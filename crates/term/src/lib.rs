//! Terminal rendering.
//!
//! A small, game-oriented rendering layer: snapshots are drawn into a plain
//! framebuffer, which is then flushed to the terminal with crossterm. No
//! widget toolkit is involved, so cell aspect ratio (2 columns per board
//! cell by default) stays under our control.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{BoardOrigin, GameView, Viewport};
pub use renderer::{encode_full_into, encode_rows_into, TerminalRenderer};
