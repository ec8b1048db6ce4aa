//! Grid module - the fixed 10×20 occupancy matrix
//!
//! Each cell is either empty or occupied by the color (piece kind) that was
//! frozen there. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).

use arrayvec::ArrayVec;

use crate::catalog::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row-major matrix handed to renderers.
pub type GridMatrix = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Build a grid from text rows, bottom-aligned.
    ///
    /// `'.'` is empty and a piece letter (`I`, `O`, `S`, `Z`, `L`, `J`, `T`) is an
    /// occupied cell of that color; any other character is treated as `I`.
    /// Fewer than 20 rows fill the bottom of the grid, which keeps test fixtures short.
    ///
    /// ```
    /// use blockfall_core::Grid;
    ///
    /// let grid = Grid::from_rows(&["IIIIIIIII."]);
    /// assert!(grid.is_occupied(0, 19));
    /// assert!(!grid.is_occupied(9, 19));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut grid = Self::new();
        let height = BOARD_HEIGHT as usize;
        let skip = rows.len().saturating_sub(height);
        let top = height - (rows.len() - skip);
        for (i, line) in rows.iter().skip(skip).enumerate() {
            let y = (top + i) as i8;
            for (x, ch) in line.chars().take(BOARD_WIDTH as usize).enumerate() {
                if ch != '.' {
                    let kind = PieceKind::from_char(ch).unwrap_or(PieceKind::I);
                    grid.set(x as i8, y, Some(kind));
                }
            }
        }
        grid
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the grid
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the grid
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True iff (x, y) is inside the grid and occupied.
    ///
    /// Out-of-range coordinates report `false`; walls and the floor are the
    /// caller's concern.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Write every filled cell of `shape` placed at (x, y) as `Some(kind)`.
    ///
    /// Performs no validation: the caller has already checked for overlap.
    /// Cells that fall outside the grid (e.g. above row 0) are dropped.
    pub fn freeze(&mut self, shape: &Shape, kind: PieceKind, x: i8, y: i8) {
        for (dx, dy) in shape.cells() {
            self.set(x + dx, y + dy, Some(kind));
        }
    }

    /// Remove every full row, shifting the rows above down, and return the
    /// indices that were full (top to bottom, as scanned).
    ///
    /// Uses a two-pointer pass from the bottom with zero allocation. At most
    /// four rows can be full at once since only one piece locks at a time.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                // A corrupted grid could hold more than four full rows; drop the
                // extras from the report but still clear them.
                let _ = cleared_rows.try_push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Fresh empty rows on top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows.reverse();
        cleared_rows
    }

    /// Number of occupied cells on the whole grid
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Copy into a row-major matrix without allocating.
    pub fn write_matrix(&self, out: &mut GridMatrix) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
