//! Active piece - movement, rotation and landing checks against a grid
//!
//! The active piece owns a copy of its template's shape (rotation replaces it)
//! and the board position of the shape's bounding box. Every commit is checked:
//! a filled cell may never sit on an occupied grid cell, outside columns
//! `0..BOARD_WIDTH`, or below the last row. Cells above row 0 are allowed.

use serde::{Deserialize, Serialize};

use crate::catalog::{Piece, PieceCatalog, Shape};
use crate::grid::Grid;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

/// Whether `shape` placed at (x, y) is a legal resting place on `grid`.
pub fn fits(grid: &Grid, shape: &Shape, x: i8, y: i8) -> bool {
    shape.cells().all(|(dx, dy)| {
        let cx = x + dx;
        let cy = y + dy;
        (0..BOARD_WIDTH as i8).contains(&cx) && cy < BOARD_HEIGHT as i8 && !grid.is_occupied(cx, cy)
    })
}

/// Whether `shape` at (x, y) rests on the floor or on a frozen cell.
pub fn rests_on(grid: &Grid, shape: &Shape, x: i8, y: i8) -> bool {
    shape.cells().any(|(dx, dy)| {
        let below = y + dy + 1;
        below >= BOARD_HEIGHT as i8 || grid.is_occupied(x + dx, below)
    })
}

impl ActivePiece {
    /// Place a template at the given spawn position.
    pub fn spawn(piece: Piece, x: i8, y: i8) -> Self {
        Self {
            kind: piece.kind,
            shape: piece.shape,
            x,
            y,
        }
    }

    /// Spawn-orientation piece of `kind` at (x, y).
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self::spawn(PieceCatalog::template(kind), x, y)
    }

    /// Board coordinates of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape.cells().map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Move by (dx, dy) if the destination fits; otherwise leave the piece unchanged.
    pub fn move_delta(&mut self, grid: &Grid, dx: i8, dy: i8) -> bool {
        let nx = self.x + dx;
        let ny = self.y + dy;
        if !fits(grid, &self.shape, nx, ny) {
            return false;
        }
        self.x = nx;
        self.y = ny;
        true
    }

    /// Rotate 90° clockwise with a horizontal kick search.
    ///
    /// Offsets `0, d, 2d, ..., w*d` are tried in order, where `w` is the rotated
    /// shape's width and `d` is `-1` when the piece sits right of column 0 and
    /// `+1` otherwise. The first offset where the rotated shape fits is committed.
    /// If none fits, the piece is left exactly as it was.
    pub fn rotate_cw(&mut self, grid: &Grid) -> bool {
        let rotated = self.shape.rotated_cw();
        let step: i8 = if self.x > 0 { -1 } else { 1 };
        let bound = rotated.width() as i8;

        for magnitude in 0..=bound {
            let offset = magnitude * step;
            if fits(grid, &rotated, self.x + offset, self.y) {
                self.shape = rotated;
                self.x += offset;
                return true;
            }
        }

        log::trace!(
            "rotation of {:?} at ({}, {}) rejected",
            self.kind,
            self.x,
            self.y
        );
        false
    }

    /// True iff some filled cell has the floor or a frozen cell directly below it.
    ///
    /// This is the only test for "has landed".
    pub fn is_at_bottom(&self, grid: &Grid) -> bool {
        rests_on(grid, &self.shape, self.x, self.y)
    }

    /// True iff some filled cell is not an empty grid cell: it overlaps a
    /// frozen cell, pokes above row 0, or lies outside the walls or floor.
    pub fn is_blocked_at_spawn(&self, grid: &Grid) -> bool {
        self.cells().any(|(x, y)| grid.get(x, y) != Some(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_copies_template() {
        let piece = ActivePiece::new(PieceKind::T, 3, 0);
        assert_eq!(piece.kind, PieceKind::T);
        assert_eq!(piece.shape, PieceCatalog::template(PieceKind::T).shape);
        assert_eq!((piece.x, piece.y), (3, 0));
    }

    #[test]
    fn test_cells_are_offset_by_position() {
        let piece = ActivePiece::new(PieceKind::O, 4, 10);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(4, 10), (5, 10), (4, 11), (5, 11)]);
    }

    #[test]
    fn test_move_blocked_by_left_wall() {
        let grid = Grid::new();
        let mut piece = ActivePiece::new(PieceKind::O, 0, 0);
        assert!(!piece.move_delta(&grid, -1, 0));
        assert_eq!(piece.x, 0);
    }

    #[test]
    fn test_empty_columns_may_hang_past_the_wall() {
        // A vertical I only fills column 2 of its box, so the box itself can
        // start at x = -2.
        let grid = Grid::new();
        let mut piece = ActivePiece::new(PieceKind::I, 0, 0);
        piece.shape = piece.shape.rotated_cw();
        assert!(piece.move_delta(&grid, -1, 0));
        assert!(piece.move_delta(&grid, -1, 0));
        assert!(!piece.move_delta(&grid, -1, 0));
        assert_eq!(piece.x, -2);
    }

    #[test]
    fn test_move_blocked_by_floor() {
        let grid = Grid::new();
        let mut piece = ActivePiece::new(PieceKind::O, 4, 18);
        assert!(piece.is_at_bottom(&grid));
        assert!(!piece.move_delta(&grid, 0, 1));
        assert_eq!(piece.y, 18);
    }

    #[test]
    fn test_is_at_bottom_on_frozen_cell() {
        let grid = Grid::from_rows(&["....I....."]);
        let piece = ActivePiece::new(PieceKind::O, 4, 17);
        assert!(piece.is_at_bottom(&grid));
        let piece = ActivePiece::new(PieceKind::O, 6, 17);
        assert!(!piece.is_at_bottom(&grid));
    }

    #[test]
    fn test_rotate_in_open_space_keeps_x() {
        let grid = Grid::new();
        let mut piece = ActivePiece::new(PieceKind::T, 3, 5);
        assert!(piece.rotate_cw(&grid));
        assert_eq!(piece.x, 3);
        assert_eq!(piece.shape, Shape::from_rows(&[".#.", ".##", ".#."]));
    }

    #[test]
    fn test_rotate_kicks_left_off_right_wall() {
        let grid = Grid::new();
        // Vertical I in column 9 (box x = 7, filled column 2).
        let mut piece = ActivePiece::new(PieceKind::I, 7, 5);
        piece.shape = piece.shape.rotated_cw();
        // Rotating back to horizontal in row 2 of the box needs columns x..x+3 free.
        assert!(piece.rotate_cw(&grid));
        assert_eq!(piece.x, 6);
        assert!(piece.cells().all(|(x, _)| (0..10).contains(&x)));
    }

    #[test]
    fn test_rotate_kicks_right_off_left_wall() {
        let grid = Grid::new();
        let mut piece = ActivePiece::new(PieceKind::I, 0, 5);
        piece.shape = piece.shape.rotated_cw();
        assert!(piece.move_delta(&grid, -2, 0));
        assert_eq!(piece.x, -2);
        // x <= 0 so the search moves right.
        assert!(piece.rotate_cw(&grid));
        assert_eq!(piece.x, 0);
    }

    #[test]
    fn test_rotate_rejected_leaves_piece_unchanged() {
        // Walls of frozen cells on both sides leave no room for a horizontal I.
        let grid = Grid::from_rows(&[
            "III.IIIIII",
            "III.IIIIII",
            "III.IIIIII",
            "III.IIIIII",
            "III.IIIIII",
            "III.IIIIII",
        ]);
        let mut piece = ActivePiece::new(PieceKind::I, 1, 14);
        piece.shape = piece.shape.rotated_cw();
        assert!(fits(&grid, &piece.shape, piece.x, piece.y));
        let before = piece;
        assert!(!piece.rotate_cw(&grid));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_rotate_rejected_below_floor() {
        let grid = Grid::new();
        // Horizontal I in the box's row 1 on the floor row; a clockwise turn
        // would hang two cells below the grid at every offset.
        let mut piece = ActivePiece::new(PieceKind::I, 3, 18);
        assert!(fits(&grid, &piece.shape, 3, 18));
        let before = piece;
        assert!(!piece.rotate_cw(&grid));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_blocked_at_spawn() {
        let grid = Grid::from_rows(&["....O....."]);
        let piece = ActivePiece::new(PieceKind::O, 4, 18);
        assert!(piece.is_blocked_at_spawn(&grid));
        let piece = ActivePiece::new(PieceKind::O, 4, -1);
        assert!(piece.is_blocked_at_spawn(&Grid::new()));
        let piece = ActivePiece::new(PieceKind::O, 4, 0);
        assert!(!piece.is_blocked_at_spawn(&Grid::new()));
    }

    #[test]
    fn test_out_of_bounds_spawn_is_blocked() {
        let grid = Grid::new();
        assert!(ActivePiece::new(PieceKind::I, 9, 0).is_blocked_at_spawn(&grid));
        assert!(ActivePiece::new(PieceKind::O, -1, 0).is_blocked_at_spawn(&grid));
        assert!(ActivePiece::new(PieceKind::O, 4, 19).is_blocked_at_spawn(&grid));
        assert!(!ActivePiece::new(PieceKind::I, 6, 0).is_blocked_at_spawn(&grid));
    }
}
