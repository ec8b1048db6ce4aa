//! Catalog module - the seven piece templates and their shape matrices
//!
//! Each template stores its shape as a square boolean matrix sized to the
//! piece's canonical bounding box: 4×4 for I, 2×2 for O and 3×3 for the rest.
//! Because the box is square, a clockwise rotation is always a same-size
//! transform and never changes where the box sits on the grid.

use serde::{Deserialize, Serialize};

use crate::rng::SimpleRng;
use crate::types::PieceKind;

/// Largest bounding box of any piece.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square occupancy matrix of a piece. Only the top-left `size × size` block is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of `'#'` (filled) and `'.'` (empty).
    ///
    /// Panics if the rows do not form a square of side 1..=4; templates are
    /// compile-time constants so a bad literal is a programming error.
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        assert!(
            (1..=MAX_SHAPE_SIZE).contains(&size),
            "shape must be 1..=4 rows, got {}",
            size
        );
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.chars().count(), size, "shape must be square");
            for (col, ch) in line.chars().enumerate() {
                cells[row][col] = ch == '#';
            }
        }
        Self {
            size: size as u8,
            cells,
        }
    }

    /// Side length of the bounding box.
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Width used to bound the rotation kick search (the box is square).
    pub fn width(&self) -> usize {
        self.size()
    }

    /// Whether the cell at (`col`, `row`) inside the box is filled.
    pub fn get(&self, col: usize, row: usize) -> bool {
        col < self.size() && row < self.size() && self.cells[row][col]
    }

    /// Iterate the `(col, row)` offsets of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let size = self.size();
        (0..size).flat_map(move |row| {
            (0..size)
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (col as i8, row as i8))
        })
    }

    /// Number of filled cells (4 for every tetromino).
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// A new shape rotated 90° clockwise: `new[row][col] = old[N-1-col][row]`.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row, out_row) in cells.iter_mut().enumerate().take(n) {
            for (col, out) in out_row.iter_mut().enumerate().take(n) {
                *out = self.cells[n - 1 - col][row];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }
}

/// A `{Shape, ColorId}` template. The kind is the color identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
}

/// The fixed set of seven templates.
pub struct PieceCatalog;

impl PieceCatalog {
    /// Spawn-orientation template for a kind.
    pub fn template(kind: PieceKind) -> Piece {
        let shape = match kind {
            PieceKind::I => Shape::from_rows(&["....", "####", "....", "...."]),
            PieceKind::O => Shape::from_rows(&["##", "##"]),
            PieceKind::Z => Shape::from_rows(&["##.", ".##", "..."]),
            PieceKind::S => Shape::from_rows(&[".##", "##.", "..."]),
            PieceKind::J => Shape::from_rows(&["#..", "###", "..."]),
            PieceKind::L => Shape::from_rows(&["..#", "###", "..."]),
            PieceKind::T => Shape::from_rows(&[".#.", "###", "..."]),
        };
        Piece { kind, shape }
    }

    /// All seven templates in catalog order.
    pub fn all() -> [Piece; 7] {
        PieceKind::ALL.map(Self::template)
    }

    /// Uniformly chosen kind, each with probability 1/7, independent of prior draws.
    pub fn generate_random(rng: &mut SimpleRng) -> PieceKind {
        PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}
