//! Board tests - grid queries, collision, placement, and line clears

use srs_tetris::core::board::is_grounded;
use srs_tetris::core::line_clear::{collapse, detect, is_empty};
use srs_tetris::core::{collides, hard_drop_position, place, Board, Shape, Tetromino};
use srs_tetris::types::{CellState, GameConfig, PieceKind, Position, Rotation};

fn piece(kind: PieceKind, rotation: Rotation, x: i32, y: i32) -> Tetromino {
    Tetromino {
        kind,
        rotation,
        position: Position::new(x, y),
        lock_delay_remaining: 500,
    }
}

#[test]
fn test_board_new_empty() {
    let config = GameConfig::default();
    let board = Board::from_config(&config);
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), config.total_height());

    for y in 0..board.height() as i32 {
        for x in 0..board.width() as i32 {
            assert_eq!(board.get(x, y), Some(CellState::Empty), "cell ({}, {})", x, y);
        }
    }
    assert!(board.is_empty());
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(10, 24);
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(10, 0), None);
    assert_eq!(board.get(0, 24), None);
    assert!(board.is_blocked(-1, 0));
    assert!(board.is_blocked(0, 24));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new(10, 24);
    assert!(board.set(5, 10, CellState::Filled(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(CellState::Filled(PieceKind::T)));
    assert!(board.is_blocked(5, 10));

    assert!(board.set(5, 10, CellState::Empty));
    assert!(!board.is_blocked(5, 10));

    assert!(!board.set(-1, 0, CellState::Filled(PieceKind::T)));
    assert!(!board.set(10, 0, CellState::Filled(PieceKind::T)));
}

#[test]
fn test_any_non_empty_cell_blocks() {
    let mut board = Board::new(4, 4);
    board.set(0, 0, CellState::Ghost);
    board.set(1, 0, CellState::Active);
    assert!(board.is_blocked(0, 0));
    assert!(board.is_blocked(1, 0));
}

#[test]
fn test_collides_matches_cellwise_definition() {
    let board = Board::from_ascii(&[
        "....#",
        ".....",
        "..#..",
        ".....",
        ".....",
    ]);
    // Every shape at every position: collision iff some mino is out of bounds or on a filled cell
    for kind in PieceKind::ALL {
        for rotation in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
            let shape = Shape::of(kind, rotation);
            for y in -3..7 {
                for x in -3..7 {
                    let position = Position::new(x, y);
                    let expected = shape
                        .cells_at(position)
                        .any(|cell| board.get(cell.x, cell.y) != Some(CellState::Empty));
                    assert_eq!(
                        collides(&board, shape, position),
                        expected,
                        "{:?} {:?} at ({}, {})",
                        kind,
                        rotation,
                        x,
                        y
                    );
                }
            }
        }
    }
}

#[test]
fn test_hard_drop_lands_on_stack() {
    let board = Board::from_ascii(&[
        "..........",
        "..........",
        "..........",
        "..........",
        "....#.....",
        "##########",
    ]);
    // T spawn shape covers columns 3..=5 on its lower row
    let t = piece(PieceKind::T, Rotation::North, 3, 0);
    assert_eq!(hard_drop_position(&board, &t), Position::new(3, 2));

    let i = piece(PieceKind::I, Rotation::North, 5, 0);
    assert_eq!(hard_drop_position(&board, &i), Position::new(5, 3));
}

#[test]
fn test_hard_drop_when_already_grounded() {
    let board = Board::from_ascii(&["....", "....", "####"]);
    let o = piece(PieceKind::O, Rotation::North, 0, 0);
    assert!(is_grounded(&board, &o));
    assert_eq!(hard_drop_position(&board, &o), o.position);
}

#[test]
fn test_place_fills_piece_cells_only() {
    let board = Board::new(10, 24);
    let t = piece(PieceKind::T, Rotation::North, 3, 20);
    let placed = place(&board, &t);

    assert_eq!(placed.get(4, 20), Some(CellState::Filled(PieceKind::T)));
    for x in 3..6 {
        assert_eq!(placed.get(x, 21), Some(CellState::Filled(PieceKind::T)));
    }
    let filled = placed.cells().iter().filter(|c| c.is_occupied()).count();
    assert_eq!(filled, 4);
    // Source board untouched
    assert!(board.is_empty());
}

#[test]
fn test_detect_full_rows_ascending() {
    let board = Board::from_ascii(&[
        "....",
        "####",
        "#.##",
        "ijlo",
    ]);
    assert_eq!(detect(&board), vec![1, 3]);
    assert!(detect(&Board::new(4, 4)).is_empty());
}

#[test]
fn test_collapse_keeps_relative_order() {
    let board = Board::from_ascii(&["iiii", "t...", "oooo", ".s.."]);
    let rows = detect(&board);
    assert_eq!(rows, vec![0, 2]);

    let collapsed = collapse(&board, &rows);
    assert_eq!(collapsed, Board::from_ascii(&["....", "....", "t...", ".s.."]));
}

#[test]
fn test_collapse_everything_gives_empty_board() {
    let board = Board::from_ascii(&["....", "....", "####", "####"]);
    let collapsed = collapse(&board, &detect(&board));
    assert!(is_empty(&collapsed));
    assert_eq!(collapsed.height(), 4);
}
