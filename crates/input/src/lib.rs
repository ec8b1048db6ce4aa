//! Terminal input mapping.
//!
//! Translates `crossterm` key events into [`crate::types::Command`] values one
//! to one, plus the navigation keys of the menu screens. Holds no state: key
//! repeat comes from the terminal.

pub mod map;

pub use blockfall_types as types;

pub use map::{command_for_key, handle_key_event, menu_action, should_quit, MenuAction};
