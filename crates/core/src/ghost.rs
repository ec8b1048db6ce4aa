//! Ghost projection - where the active piece would land if dropped now.

use serde::{Deserialize, Serialize};

use crate::catalog::Shape;
use crate::grid::Grid;
use crate::piece::{rests_on, ActivePiece};

/// Read-only landing preview. Never written to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GhostPiece {
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

/// Walk the active piece's shape down from its current row until it rests.
///
/// Terminates because the floor always satisfies the resting test.
pub fn project(grid: &Grid, active: &ActivePiece) -> GhostPiece {
    let mut y = active.y;
    while !rests_on(grid, &active.shape, active.x, y) {
        y += 1;
    }
    GhostPiece {
        shape: active.shape,
        x: active.x,
        y,
    }
}
