//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates as `blockfall::{types,core,input,term}` and
//! hosts the thin collaborators the terminal binary wires around a session:
//! settings, diagnostics logging, the event journal and audio.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod audio;
pub mod event_log;
pub mod logging;
pub mod settings;
