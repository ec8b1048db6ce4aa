use blockfall::core::{ghost, ActivePiece, Grid, PieceCatalog, Shape};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn assert_in_bounds(piece: &ActivePiece) {
    for (x, y) in piece.cells() {
        assert!((0..BOARD_WIDTH as i8).contains(&x), "x = {x}");
        assert!(y < BOARD_HEIGHT as i8, "y = {y}");
    }
}

#[test]
fn test_templates_match_catalog() {
    let expected: [(PieceKind, &[&str]); 7] = [
        (PieceKind::I, &["....", "####", "....", "...."]),
        (PieceKind::O, &["##", "##"]),
        (PieceKind::Z, &["##.", ".##", "..."]),
        (PieceKind::S, &[".##", "##.", "..."]),
        (PieceKind::J, &["#..", "###", "..."]),
        (PieceKind::L, &["..#", "###", "..."]),
        (PieceKind::T, &[".#.", "###", "..."]),
    ];
    for (kind, rows) in expected {
        assert_eq!(PieceCatalog::template(kind).shape, Shape::from_rows(rows), "{kind:?}");
    }
}

#[test]
fn test_four_rotations_restore_shape() {
    for piece in PieceCatalog::all() {
        let mut shape = piece.shape;
        for _ in 0..4 {
            shape = shape.rotated_cw();
            assert_eq!(shape.cell_count(), 4);
        }
        assert_eq!(shape, piece.shape, "{:?}", piece.kind);
    }
}

#[test]
fn test_t_rotates_clockwise() {
    let t = PieceCatalog::template(PieceKind::T).shape.rotated_cw();
    assert_eq!(t, Shape::from_rows(&[".#.", ".##", ".#."]));
}

#[test]
fn test_walls_block_movement() {
    let grid = Grid::new();
    let mut piece = ActivePiece::new(PieceKind::O, 0, 5);
    assert!(!piece.move_delta(&grid, -1, 0));
    assert_eq!(piece.x, 0);

    let mut piece = ActivePiece::new(PieceKind::O, 8, 5);
    assert!(!piece.move_delta(&grid, 1, 0));
    assert_eq!(piece.x, 8);
}

#[test]
fn test_stack_blocks_movement() {
    let grid = Grid::from_rows(&["..Z.......", "..Z.......", "..Z......."]);
    let mut piece = ActivePiece::new(PieceKind::O, 3, 18);
    assert!(!piece.move_delta(&grid, -1, 0));
    assert!(piece.is_at_bottom(&grid));
}

#[test]
fn test_rotation_kicks_off_right_wall() {
    let grid = Grid::new();
    // Vertical I in column 9: rotating back to horizontal needs a kick left.
    let mut piece = ActivePiece::new(PieceKind::I, 3, 5);
    assert!(piece.rotate_cw(&grid));
    while piece.move_delta(&grid, 1, 0) {}
    assert_eq!(piece.cells().map(|(x, _)| x).max(), Some(9));

    assert!(piece.rotate_cw(&grid));
    assert_in_bounds(&piece);
    assert_eq!(piece.cells().map(|(x, _)| x).max(), Some(9));
}

#[test]
fn test_rotation_kicks_off_left_wall() {
    let grid = Grid::new();
    let mut piece = ActivePiece::new(PieceKind::I, 3, 5);
    assert!(piece.rotate_cw(&grid));
    while piece.move_delta(&grid, -1, 0) {}
    assert_eq!(piece.cells().map(|(x, _)| x).min(), Some(0));

    assert!(piece.rotate_cw(&grid));
    assert_in_bounds(&piece);
}

#[test]
fn test_blocked_rotation_leaves_piece_unchanged() {
    // A one-column well: the vertical I fits, the horizontal I cannot.
    let grid = Grid::from_rows(&[
        "JJJJ.JJJJJ",
        "JJJJ.JJJJJ",
        "JJJJ.JJJJJ",
        "JJJJ.JJJJJ",
        "JJJJ.JJJJJ",
    ]);
    let vertical = PieceCatalog::template(PieceKind::I).shape.rotated_cw();
    let column = vertical.cells().next().map(|(c, _)| c).unwrap();
    let mut piece = ActivePiece {
        kind: PieceKind::I,
        shape: vertical,
        x: 4 - column,
        y: 16,
    };
    assert!(piece.is_at_bottom(&grid));

    let before = piece;
    assert!(!piece.rotate_cw(&grid));
    assert_eq!(piece, before);
}

#[test]
fn test_ghost_rests_on_stack() {
    let grid = Grid::from_rows(&["IIII......", ".........."]);
    let piece = ActivePiece::new(PieceKind::O, 0, 0);
    let g = ghost::project(&grid, &piece);
    // Stack top at row 18, O occupies rows 16..=17.
    assert_eq!(g.y, 16);
    assert_eq!(g.x, piece.x);
    assert_eq!(g.shape, piece.shape);
}

#[test]
fn test_ghost_never_overlaps_and_is_below_piece() {
    let grid = Grid::from_rows(&["...T......", "..TTT....Z", "OO.....ZZZ"]);
    for kind in PieceKind::ALL {
        for x in 0..8 {
            let piece = ActivePiece::new(kind, x, 0);
            if piece.cells().any(|(cx, _)| !(0..10).contains(&cx)) {
                continue;
            }
            let g = ghost::project(&grid, &piece);
            assert!(g.y >= piece.y);
            for (dx, dy) in g.shape.cells() {
                assert!(!grid.is_occupied(g.x + dx, g.y + dy));
                assert!(g.y + dy < BOARD_HEIGHT as i8);
            }
        }
    }
}
