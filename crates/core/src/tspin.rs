//! T-Spin classifier
//!
//! Corner test around the center of the T's 3x3 box. The "front" pair is the
//! two corners on the side the T points to, the "back" pair the other two.

use crate::board::Board;
use crate::pieces::Tetromino;
use crate::types::{PieceKind, Rotation, TSpinClass, TSpinRule};

/// Kick test index that upgrades a Mini under the guideline rule
const TST_KICK_INDEX: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Corners {
    top_left: bool,
    top_right: bool,
    bottom_left: bool,
    bottom_right: bool,
}

impl Corners {
    fn around(board: &Board, piece: &Tetromino) -> Self {
        let cx = piece.position.x + 1;
        let cy = piece.position.y + 1;
        Self {
            top_left: board.is_blocked(cx - 1, cy - 1),
            top_right: board.is_blocked(cx + 1, cy - 1),
            bottom_left: board.is_blocked(cx - 1, cy + 1),
            bottom_right: board.is_blocked(cx + 1, cy + 1),
        }
    }

    /// `(front, back)` blocked counts for the given facing
    fn split(&self, rotation: Rotation) -> (usize, usize) {
        let (front, back) = match rotation {
            Rotation::North => (
                [self.top_left, self.top_right],
                [self.bottom_left, self.bottom_right],
            ),
            Rotation::East => (
                [self.top_right, self.bottom_right],
                [self.top_left, self.bottom_left],
            ),
            Rotation::South => (
                [self.bottom_left, self.bottom_right],
                [self.top_left, self.top_right],
            ),
            Rotation::West => (
                [self.top_left, self.bottom_left],
                [self.top_right, self.bottom_right],
            ),
        };
        let count = |pair: [bool; 2]| pair.iter().filter(|&&b| b).count();
        (count(front), count(back))
    }
}

/// Classify a T placement with the plain corner test
///
/// Anything that is not a T, or was not last moved by a rotation, is `None`.
pub fn classify(board: &Board, piece: &Tetromino, last_move_was_rotation: bool) -> TSpinClass {
    if piece.kind != PieceKind::T || !last_move_was_rotation {
        return TSpinClass::None;
    }

    let (front, back) = Corners::around(board, piece).split(piece.rotation);
    if front + back < 3 {
        TSpinClass::None
    } else if front == 2 && back >= 1 {
        TSpinClass::Regular
    } else {
        // One front and both back corners, and any other 3+ layout
        TSpinClass::Mini
    }
}

/// Classify using `rule`, given the kick index of the rotation that was the
/// piece's last move (`None` if the last move was not a rotation)
pub fn classify_with_rule(
    board: &Board,
    piece: &Tetromino,
    last_kick: Option<usize>,
    rule: TSpinRule,
) -> TSpinClass {
    let class = classify(board, piece, last_kick.is_some());
    match (rule, class, last_kick) {
        (TSpinRule::Guideline, TSpinClass::Mini, Some(TST_KICK_INDEX)) => TSpinClass::Regular,
        _ => class,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn t_at(rotation: Rotation, x: i32, y: i32) -> Tetromino {
        Tetromino {
            kind: PieceKind::T,
            rotation,
            position: Position::new(x, y),
            lock_delay_remaining: 0,
        }
    }

    #[test]
    fn requires_rotation_and_t_piece() {
        let board = Board::from_ascii(&["#.#", "...", "#.#"]);
        let t = t_at(Rotation::South, 0, 0);
        assert_eq!(classify(&board, &t, false), TSpinClass::None);

        let mut s = t;
        s.kind = PieceKind::S;
        assert_eq!(classify(&board, &s, true), TSpinClass::None);
    }

    #[test]
    fn tsd_slot_is_regular() {
        // T pointing down into a slot: both bottom (front) corners and one top corner
        let board = Board::from_ascii(&["#....", "...##", "#.###"]);
        let t = t_at(Rotation::South, 0, 0);
        assert_eq!(classify(&board, &t, true), TSpinClass::Regular);
    }

    #[test]
    fn one_front_two_back_is_mini() {
        // South-facing T with both top (back) corners and only one bottom corner
        let board = Board::from_ascii(&["#.#", "...", "#.."]);
        let t = t_at(Rotation::South, 0, 0);
        assert_eq!(classify(&board, &t, true), TSpinClass::Mini);
    }

    #[test]
    fn two_corners_is_none() {
        let board = Board::from_ascii(&["...", "...", "#.#", "..."]);
        let t = t_at(Rotation::North, 0, 0);
        assert_eq!(classify(&board, &t, true), TSpinClass::None);
    }

    #[test]
    fn walls_count_as_blocked() {
        // East-facing T against the left wall: both left (back) corners are walls
        let board = Board::from_ascii(&["...", "...", ".#."]);
        let t = t_at(Rotation::East, -1, 0);
        assert_eq!(classify(&board, &t, true), TSpinClass::Mini);
    }

    #[test]
    fn guideline_promotes_last_kick_mini() {
        let board = Board::from_ascii(&["#.#", "...", "#.."]);
        let t = t_at(Rotation::South, 0, 0);
        assert_eq!(
            classify_with_rule(&board, &t, Some(4), TSpinRule::Guideline),
            TSpinClass::Regular
        );
        assert_eq!(
            classify_with_rule(&board, &t, Some(4), TSpinRule::Corners),
            TSpinClass::Mini
        );
        assert_eq!(
            classify_with_rule(&board, &t, Some(3), TSpinRule::Guideline),
            TSpinClass::Mini
        );
        assert_eq!(
            classify_with_rule(&board, &t, None, TSpinRule::Guideline),
            TSpinClass::None
        );
    }
}
