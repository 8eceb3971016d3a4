//! Board module - the playfield grid plus collision and placement
//!
//! The board is a `width x height` grid whose top `buffer_height` rows are the
//! hidden spawn area. Cells live in a flat row-major vector for cache locality.
//! Coordinates: `(x, y)` with `x` growing right and `y` growing down from the
//! top of the buffer.

use crate::pieces::{Shape, Tetromino};
use crate::types::{CellState, GameConfig, PieceKind, Position};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<CellState>,
}

impl Board {
    /// Create an empty board; both dimensions are clamped to at least 1
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![CellState::Empty; width * height],
        }
    }

    /// Empty board sized by `config` (visible rows plus buffer)
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.board_width, config.total_height())
    }

    /// Build a board from text rows, top row first
    ///
    /// `.` or space is empty, `#` is a filled garbage cell, and a piece letter
    /// (`I O T S Z J L`, any case) fills with that kind. The width is the
    /// longest row; shorter rows are padded with empty cells.
    ///
    /// ```
    /// use srs_tetris_core::Board;
    /// use srs_tetris_types::{CellState, PieceKind};
    ///
    /// let board = Board::from_ascii(&["....", "#..t"]);
    /// assert_eq!(board.width(), 4);
    /// assert_eq!(board.get(3, 1), Some(CellState::Filled(PieceKind::T)));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(1);
        let mut board = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' | ' ' => CellState::Empty,
                    '#' => CellState::Filled(PieceKind::I),
                    other => match PieceKind::from_str(&other.to_string()) {
                        Some(kind) => CellState::Filled(kind),
                        None => CellState::Filled(PieceKind::I),
                    },
                };
                board.set(x as i32, y as i32, cell);
            }
        }
        board
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `(x, y)`, `None` when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<CellState> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set the cell at `(x, y)`; returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: CellState) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Out of bounds or any non-empty cell
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        !matches!(self.get(x, y), Some(CellState::Empty))
    }

    pub fn row(&self, y: usize) -> &[CellState] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells.chunks(self.width)
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [CellState] {
        &mut self.cells
    }

    /// True iff every cell is empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(CellState::is_empty)
    }

    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Whether `shape` with its box at `position` leaves the board or overlaps a filled cell
pub fn collides(board: &Board, shape: &Shape, position: Position) -> bool {
    shape
        .cells_at(position)
        .any(|cell| board.is_blocked(cell.x, cell.y))
}

/// Lowest non-colliding position straight below the piece
///
/// A piece that already collides is returned at its own position.
pub fn hard_drop_position(board: &Board, piece: &Tetromino) -> Position {
    let shape = piece.shape();
    let mut position = piece.position;
    while !collides(board, shape, position.offset(0, 1)) {
        position = position.offset(0, 1);
    }
    position
}

/// Copy of `board` with the piece merged in as `Filled(kind)`
///
/// Does not clear lines. Cells outside the board are skipped; callers check
/// `collides` first.
pub fn place(board: &Board, piece: &Tetromino) -> Board {
    let mut next = board.clone();
    for cell in piece.cells() {
        next.set(cell.x, cell.y, CellState::Filled(piece.kind));
    }
    next
}

/// Whether the piece cannot move one row further down
pub fn is_grounded(board: &Board, piece: &Tetromino) -> bool {
    collides(board, piece.shape(), piece.position.offset(0, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    fn piece(kind: PieceKind, x: i32, y: i32) -> Tetromino {
        Tetromino {
            kind,
            rotation: Rotation::North,
            position: Position::new(x, y),
            lock_delay_remaining: 0,
        }
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 24);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 23), Some(239));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 24), None);
    }

    #[test]
    fn test_out_of_bounds_is_blocked() {
        let board = Board::new(4, 4);
        assert!(!board.is_blocked(0, 0));
        assert!(board.is_blocked(-1, 0));
        assert!(board.is_blocked(0, 4));
        assert!(board.is_blocked(4, 3));
    }

    #[test]
    fn test_ghost_and_active_cells_block() {
        let mut board = Board::new(4, 4);
        board.set(1, 1, CellState::Ghost);
        board.set(2, 2, CellState::Active);
        assert!(board.is_blocked(1, 1));
        assert!(board.is_blocked(2, 2));
    }

    #[test]
    fn test_collides_against_walls_and_cells() {
        let board = Board::from_ascii(&["....", "....", "....", "#..."]);
        let o = Shape::of(PieceKind::O, Rotation::North);
        // O occupies box columns 1-2, rows 0-1
        assert!(!collides(&board, o, Position::new(0, 0)));
        assert!(!collides(&board, o, Position::new(1, 2)));
        assert!(collides(&board, o, Position::new(2, 0)));
        assert!(collides(&board, o, Position::new(0, 3)));

        let blocked = Board::from_ascii(&["....", "....", ".#..", "...."]);
        assert!(collides(&blocked, o, Position::new(0, 1)));
    }

    #[test]
    fn test_hard_drop_lands_on_stack() {
        let board = Board::from_ascii(&["....", "....", "....", "....", "....", "##.#"]);
        let o = piece(PieceKind::O, 0, 0);
        assert_eq!(hard_drop_position(&board, &o), Position::new(0, 3));

        let i = piece(PieceKind::I, 0, 0);
        // I north occupies box row 1; stack top is row 5
        assert_eq!(hard_drop_position(&board, &i), Position::new(0, 3));
    }

    #[test]
    fn test_place_returns_new_board() {
        let board = Board::new(4, 4);
        let placed = place(&board, &piece(PieceKind::O, 0, 2));
        assert!(board.is_empty());
        assert_eq!(placed.get(1, 2), Some(CellState::Filled(PieceKind::O)));
        assert_eq!(placed.get(2, 3), Some(CellState::Filled(PieceKind::O)));
        assert_eq!(placed.cells().iter().filter(|c| c.is_occupied()).count(), 4);
    }

    #[test]
    fn test_is_grounded() {
        let board = Board::new(4, 4);
        assert!(!is_grounded(&board, &piece(PieceKind::O, 0, 1)));
        assert!(is_grounded(&board, &piece(PieceKind::O, 0, 2)));
    }
}
