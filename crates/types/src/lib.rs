//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine and its
//! collaborators. All types are plain data with no I/O, so they can be used by the
//! core logic, the terminal renderer and the input mapper alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn position**: (3, 0), the top-left corner of the piece's bounding box
//!
//! # Fall Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_FALL_MS` | 800 | Gravity interval at session start |
//! | `MIN_FALL_MS` | 400 | Gravity never gets faster than this |
//! | `FALL_REDUCTION_MS` | 100 | Interval reduction per speed-up step |
//! | `SPEEDUP_STEP_MS` | 15000 | Wall-clock time between speed-ups |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_char('t'), Some(PieceKind::T));
//! assert_eq!(PieceKind::from_char('.'), None);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn column of a new piece's bounding box
pub const SPAWN_X: i8 = 3;

/// Spawn row of a new piece's bounding box
pub const SPAWN_Y: i8 = 0;

/// Gravity interval at the start of a session
pub const INITIAL_FALL_MS: u64 = 800;

/// Fastest gravity interval a session can reach
pub const MIN_FALL_MS: u64 = 400;

/// Amount the gravity interval shrinks on each speed-up
pub const FALL_REDUCTION_MS: u64 = 100;

/// Wall-clock time between two speed-ups
pub const SPEEDUP_STEP_MS: u64 = 15_000;

/// Frame period of the terminal runner (~60 FPS)
pub const FRAME_MS: u64 = 16;

/// Points awarded per clear event, indexed by lines cleared.
///
/// Multi-line clears are rewarded non-linearly: four lines are worth 800, twice four singles.
pub const LINE_SCORES: [u32; 5] = [0, 100, 200, 400, 800];

/// 24-bit color used by renderers.
pub type Rgb = (u8, u8, u8);

/// Ghost piece color (drawn dimmed).
pub const GHOST_RGB: Rgb = (0, 0, 0);

/// The seven tetromino piece kinds
///
/// The kind doubles as the color identity of a locked cell, so a frozen
/// cell remembers which piece it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    S,
    Z,
    L,
    J,
    T,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];

    /// Parse a single grid character (`'I'`, `'o'`, ...).
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'i' => Some(PieceKind::I),
            'o' => Some(PieceKind::O),
            's' => Some(PieceKind::S),
            'z' => Some(PieceKind::Z),
            'l' => Some(PieceKind::L),
            'j' => Some(PieceKind::J),
            't' => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Canonical display color of this piece.
    pub fn rgb(&self) -> Rgb {
        match self {
            PieceKind::I => (0, 233, 233),
            PieceKind::O => (200, 200, 0),
            PieceKind::S => (0, 150, 0),
            PieceKind::Z => (200, 0, 0),
            PieceKind::L => (255, 120, 0),
            PieceKind::J => (6, 78, 211),
            PieceKind::T => (100, 0, 100),
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Occupied, colored as the piece that was frozen there
pub type Cell = Option<PieceKind>;

/// Discrete player commands accepted by a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it lands
    SoftDrop,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
}

/// Lifecycle of a play session. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    #[default]
    Active,
    GameOver,
}

/// Events emitted by a session, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum GameEvent {
    /// A new active piece entered the grid.
    PieceSpawned(PieceKind),
    /// One lock cleared this many rows (1..=4).
    LinesCleared(u8),
    /// The running score changed to this value.
    ScoreChanged(u32),
    /// The session ended with this final score.
    GameOver(u32),
}
