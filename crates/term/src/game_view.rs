//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, PieceSnapshot, Shape};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, GHOST_RGB};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the board frame sits inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardOrigin {
    pub x: u16,
    pub y: u16,
}

/// Terminal renderer for the board, side panel and menu screens.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Outer size of the bordered board in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Top-left corner of the board frame, centered in the viewport.
    pub fn board_origin(&self, viewport: Viewport) -> BoardOrigin {
        let (frame_w, frame_h) = self.frame_size();
        BoardOrigin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
        }
    }

    /// Terminal position of the top-left character of board cell (x, y).
    pub fn cell_origin(&self, origin: BoardOrigin, x: u16, y: u16) -> (u16, u16) {
        (
            origin.x + 1 + x * self.cell_w,
            origin.y + 1 + y * self.cell_h,
        )
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Draw order: locked cells, ghost, active piece, side panel, then the
    /// game-over overlay. Callers reuse one framebuffer across frames.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let origin = self.board_origin(viewport);
        let (frame_w, frame_h) = self.frame_size();

        fb.fill_rect(
            origin.x + 1,
            origin.y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::plain(Rgb::new(80, 80, 90), BOARD_BG),
        );
        draw_border(
            fb,
            origin.x,
            origin.y,
            frame_w,
            frame_h,
            CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG),
        );

        for (y, row) in snap.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_piece_cell(fb, origin, x as u16, y as u16, *kind),
                    None => self.draw_empty_cell(fb, origin, x as u16, y as u16),
                }
            }
        }

        let ghost_style = CellStyle {
            fg: Rgb::new(140, 140, 140),
            bg: Rgb::from(GHOST_RGB),
            bold: false,
            dim: true,
        };
        for (x, y) in visible_cells(&snap.ghost) {
            let (px, py) = self.cell_origin(origin, x, y);
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '░', ghost_style);
        }

        for (x, y) in visible_cells(&snap.active) {
            self.draw_piece_cell(fb, origin, x, y, snap.active.kind);
        }

        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        if snap.is_game_over() {
            let style = CellStyle {
                fg: Rgb::new(255, 255, 255),
                bg: SCREEN_BG,
                bold: true,
                dim: false,
            };
            let mid = origin.y + frame_h / 2;
            put_centered_in(fb, origin.x, frame_w, mid, "GAME OVER", style);
            put_centered_in(fb, origin.x, frame_w, mid + 1, "r restart  m menu", style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Title screen.
    pub fn render_menu(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let title = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::from(PieceKind::I.rgb()), SCREEN_BG)
        };
        let text = CellStyle::default();
        let top = viewport.height.saturating_sub(6) / 2;
        fb.put_centered(top, "BLOCKFALL", title);
        fb.put_centered(top + 2, "Enter  start", text);
        fb.put_centered(top + 3, "i      instructions", text);
        fb.put_centered(top + 4, "q      quit", text);
    }

    /// Controls and rules screen.
    pub fn render_instructions(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let heading = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let text = CellStyle::default();
        let lines = [
            "Left / Right   move",
            "Up             rotate",
            "Down           soft drop",
            "Space          hard drop",
            "",
            "Clearing 1 / 2 / 3 / 4 rows scores 100 / 200 / 400 / 800.",
            "Pieces fall faster every 15 seconds.",
            "",
            "Enter  start    m  menu    q  quit",
        ];
        let top = viewport.height.saturating_sub(lines.len() as u16 + 2) / 2;
        fb.put_centered(top, "HOW TO PLAY", heading);
        for (i, line) in lines.iter().enumerate() {
            fb.put_centered(top + 2 + i as u16, line, text);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, origin: BoardOrigin, x: u16, y: u16) {
        let style = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: BOARD_BG,
            bold: false,
            dim: true,
        };
        let (px, py) = self.cell_origin(origin, x, y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '·', style);
    }

    fn draw_piece_cell(
        &self,
        fb: &mut FrameBuffer,
        origin: BoardOrigin,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle {
            fg: Rgb::from(kind.rgb()),
            bg: BOARD_BG,
            bold: true,
            dim: false,
        };
        let (px, py) = self.cell_origin(origin, x, y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        origin: BoardOrigin,
        frame_w: u16,
    ) {
        let panel_x = origin.x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = origin.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y += 3;

        fb.put_str(panel_x, y, "SPEED", label);
        let digits = fb.put_u32(panel_x, y + 1, snap.fall_interval_ms as u32, value);
        fb.put_str(panel_x + digits, y + 1, "ms", value);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_preview(fb, panel_x, y + 1, &snap.next_shape(), snap.next);
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: &Shape, kind: PieceKind) {
        let style = CellStyle::plain(Rgb::from(kind.rgb()), SCREEN_BG);
        for (col, row) in shape.cells() {
            let px = x + (col as u16) * self.cell_w;
            let py = y + (row as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }
}

/// On-board cells of a piece; rows above the grid are skipped.
fn visible_cells(piece: &PieceSnapshot) -> impl Iterator<Item = (u16, u16)> + '_ {
    piece.cells().filter_map(|(x, y)| {
        let on_board = (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y);
        on_board.then_some((x as u16, y as u16))
    })
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn put_centered_in(
    fb: &mut FrameBuffer,
    left: u16,
    width: u16,
    y: u16,
    text: &str,
    style: CellStyle,
) {
    let len = text.chars().count() as u16;
    fb.put_str(left + width.saturating_sub(len) / 2, y, text, style);
}
