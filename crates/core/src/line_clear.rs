//! Line-clear engine - detects full rows and collapses the board

use crate::board::Board;
use crate::types::CellState;

/// Indices of every full row, ascending
pub fn detect(board: &Board) -> Vec<usize> {
    (0..board.height())
        .filter(|&y| board.row(y).iter().all(CellState::is_occupied))
        .collect()
}

/// Copy of `board` with `rows` removed and empty rows prepended at the top
///
/// Retained rows keep their relative order. Indices out of range are ignored.
pub fn collapse(board: &Board, rows: &[usize]) -> Board {
    let mut next = board.clone();
    let width = next.width();
    let height = next.height();
    let cells = next.cells_mut();

    // Two pointers from the bottom: copy kept rows down over removed ones
    let mut write_y = height;
    for read_y in (0..height).rev() {
        if rows.contains(&read_y) {
            continue;
        }
        write_y -= 1;
        if write_y != read_y {
            let src = read_y * width;
            cells.copy_within(src..src + width, write_y * width);
        }
    }
    cells[..write_y * width].fill(CellState::Empty);
    next
}

/// True iff every cell is empty (perfect clear check, run after collapse)
pub fn is_empty(board: &Board) -> bool {
    board.is_empty()
}
