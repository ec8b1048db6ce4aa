//! Read-only session view for renderers.
//!
//! A snapshot is `Copy` and can be refilled in place every frame with
//! [`GameSession::snapshot_into`](crate::session::GameSession::snapshot_into).

use serde::{Deserialize, Serialize};

use crate::catalog::{PieceCatalog, Shape};
use crate::ghost::GhostPiece;
use crate::grid::GridMatrix;
use crate::piece::ActivePiece;
use crate::types::{PieceKind, SessionState, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X, SPAWN_Y};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl PieceSnapshot {
    /// Board coordinates of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape.cells().map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl From<ActivePiece> for PieceSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl PieceSnapshot {
    pub fn ghost_of(kind: PieceKind, ghost: GhostPiece) -> Self {
        Self {
            kind,
            shape: ghost.shape,
            x: ghost.x,
            y: ghost.y,
        }
    }
}

/// Read model handed to renderers after every tick or command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: GridMatrix,
    pub active: PieceSnapshot,
    pub ghost: PieceSnapshot,
    pub next: PieceKind,
    pub score: u32,
    pub lines: u32,
    pub fall_interval_ms: u64,
    pub pieces_spawned: u32,
    pub state: SessionState,
}

impl GameSnapshot {
    /// Spawn-orientation shape of the lookahead piece, for previews.
    pub fn next_shape(&self) -> Shape {
        PieceCatalog::template(self.next).shape
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let piece = PieceSnapshot::from(ActivePiece::new(PieceKind::I, SPAWN_X, SPAWN_Y));
        Self {
            grid: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: piece,
            ghost: piece,
            next: PieceKind::I,
            score: 0,
            lines: 0,
            fall_interval_ms: 0,
            pieces_spawned: 0,
            state: SessionState::Active,
        }
    }
}
