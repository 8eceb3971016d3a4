//! SRS rotation resolver
//!
//! Tries the unrotated position first, then each kick of the transition in
//! table order; the first legal candidate wins.

use crate::board::{collides, Board};
use crate::pieces::{kick_offsets, Shape, Tetromino};
use crate::types::{Position, Rotation};

/// Accepted rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationResult {
    pub shape: &'static Shape,
    pub position: Position,
    pub rotation: Rotation,
    /// Kick offset as listed in the table (`dy` positive upward)
    pub kick: (i32, i32),
    /// Index of the kick test that succeeded (0 = base position)
    pub kick_index: usize,
}

/// Resolve a quarter turn of `piece` on `board`; `None` if every test collides
pub fn rotate(piece: &Tetromino, clockwise: bool, board: &Board) -> Option<RotationResult> {
    let rotation = if clockwise {
        piece.rotation.rotate_cw()
    } else {
        piece.rotation.rotate_ccw()
    };
    let shape = Shape::of(piece.kind, rotation);

    if !collides(board, shape, piece.position) {
        return Some(RotationResult {
            shape,
            position: piece.position,
            rotation,
            kick: (0, 0),
            kick_index: 0,
        });
    }

    let kicks = kick_offsets(piece.kind, piece.rotation, rotation)?;
    kicks
        .iter()
        .enumerate()
        .skip(1)
        .find_map(|(kick_index, &(dx, dy))| {
            // Table y points up, board y points down
            let position = piece.position.offset(dx, -dy);
            (!collides(board, shape, position)).then_some(RotationResult {
                shape,
                position,
                rotation,
                kick: (dx, dy),
                kick_index,
            })
        })
}
