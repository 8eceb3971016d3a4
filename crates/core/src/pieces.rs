//! Pieces module - tetromino shapes and SRS kick tables
//!
//! Shapes are 4x4 occupancy matrices derived once from mino offset tables.
//! Kick offsets follow the SRS convention where positive `y` points up;
//! the rotation resolver converts them to board coordinates.
//! Reference: https://tetris.wiki/SRS

use serde::{Deserialize, Serialize};

use crate::types::{GameConfig, PieceKind, Position, Rotation};

/// Offset of a single mino inside the 4x4 box
pub type MinoOffset = (i32, i32);

/// Immutable 4x4 occupancy pattern for one `(kind, rotation)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: [[bool; 4]; 4],
}

impl Shape {
    const fn from_minos(minos: [MinoOffset; 4]) -> Self {
        let mut rows = [[false; 4]; 4];
        let mut i = 0;
        while i < 4 {
            let (x, y) = minos[i];
            rows[y as usize][x as usize] = true;
            i += 1;
        }
        Self { rows }
    }

    /// Shape for a piece kind and rotation
    pub fn of(kind: PieceKind, rotation: Rotation) -> &'static Shape {
        &SHAPES[kind.index()][rotation.index()]
    }

    /// Whether the cell at `(x, y)` of the 4x4 box is occupied
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < 4 && y < 4 && self.rows[y][x]
    }

    pub fn rows(&self) -> &[[bool; 4]; 4] {
        &self.rows
    }

    /// Occupied cells in row-major order
    pub fn minos(&self) -> impl Iterator<Item = MinoOffset> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(x, _)| (x as i32, y as i32))
        })
    }

    /// Absolute board cells covered when the box's top-left sits at `position`
    pub fn cells_at(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        self.minos().map(move |(dx, dy)| position.offset(dx, dy))
    }
}

/// Mino offsets per kind (in `PieceKind::ALL` order), per rotation N/E/S/W
const MINOS: [[[MinoOffset; 4]; 4]; 7] = [
    // I: horizontal on row 1, vertical on column 2, horizontal on row 2, vertical on column 1
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

const fn build_shapes() -> [[Shape; 4]; 7] {
    let mut shapes = [[Shape {
        rows: [[false; 4]; 4],
    }; 4]; 7];
    let mut kind = 0;
    while kind < 7 {
        let mut rot = 0;
        while rot < 4 {
            shapes[kind][rot] = Shape::from_minos(MINOS[kind][rot]);
            rot += 1;
        }
        kind += 1;
    }
    shapes
}

static SHAPES: [[Shape; 4]; 7] = build_shapes();

/// SRS wall kick data, `(dx, dy)` with `dy` positive upward
/// Entry 0 is always the unkicked base test
pub type KickTable = [[(i32, i32); 5]; 8];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // 0->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1->0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->2
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3->0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// I piece kick table
const I_KICKS: KickTable = [
    // 0->1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1->0
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->1
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->2
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 0->3
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Row of a kick table for a transition; `None` for transitions that are not a quarter turn
fn transition_index(from: Rotation, to: Rotation) -> Option<usize> {
    match (from, to) {
        (Rotation::North, Rotation::East) => Some(0),
        (Rotation::East, Rotation::North) => Some(1),
        (Rotation::East, Rotation::South) => Some(2),
        (Rotation::South, Rotation::East) => Some(3),
        (Rotation::South, Rotation::West) => Some(4),
        (Rotation::West, Rotation::South) => Some(5),
        (Rotation::West, Rotation::North) => Some(6),
        (Rotation::North, Rotation::West) => Some(7),
        _ => None,
    }
}

/// Kick offsets to try for a rotation transition
///
/// The O piece has no kicks and returns `None`, as does any pair of
/// rotations that are not one quarter turn apart.
pub fn kick_offsets(
    kind: PieceKind,
    from: Rotation,
    to: Rotation,
) -> Option<&'static [(i32, i32); 5]> {
    let table = match kind {
        PieceKind::O => return None,
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };
    transition_index(from, to).map(|i| &table[i])
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Top-left of the 4x4 box on the board
    pub position: Position,
    /// Lock delay left once grounded (ms)
    pub lock_delay_remaining: u32,
}

impl Tetromino {
    /// Piece in spawn rotation at the configured spawn position
    pub fn spawn(kind: PieceKind, config: &GameConfig) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            position: config.spawn_position(),
            lock_delay_remaining: config.lock_delay_ms,
        }
    }

    pub fn shape(&self) -> &'static Shape {
        Shape::of(self.kind, self.rotation)
    }

    /// Absolute board cells covered by this piece
    pub fn cells(&self) -> impl Iterator<Item = Position> + 'static {
        let position = self.position;
        self.shape().cells_at(position)
    }

    /// Same piece shifted by `(dx, dy)`
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_has_four_minos() {
        for kind in PieceKind::ALL {
            for rot in 0..4 {
                let shape = Shape::of(kind, Rotation::from_index(rot));
                assert_eq!(shape.minos().count(), 4, "{:?} rotation {}", kind, rot);
            }
        }
    }

    #[test]
    fn o_shape_is_rotation_invariant() {
        let north = Shape::of(PieceKind::O, Rotation::North);
        for rot in [Rotation::East, Rotation::South, Rotation::West] {
            assert_eq!(Shape::of(PieceKind::O, rot), north);
        }
    }

    #[test]
    fn t_north_points_up() {
        let shape = Shape::of(PieceKind::T, Rotation::North);
        assert!(shape.is_filled(1, 0));
        assert!(shape.is_filled(0, 1));
        assert!(shape.is_filled(1, 1));
        assert!(shape.is_filled(2, 1));
        assert!(!shape.is_filled(1, 2));
        assert!(!shape.is_filled(4, 0));
    }

    #[test]
    fn kick_tables_start_with_base_test() {
        for kind in [PieceKind::I, PieceKind::T, PieceKind::J] {
            for from in 0..4 {
                let from = Rotation::from_index(from);
                for to in [from.rotate_cw(), from.rotate_ccw()] {
                    let kicks = kick_offsets(kind, from, to).unwrap();
                    assert_eq!(kicks[0], (0, 0));
                }
            }
        }
    }

    #[test]
    fn kick_offsets_reject_o_and_half_turns() {
        assert!(kick_offsets(PieceKind::O, Rotation::North, Rotation::East).is_none());
        assert!(kick_offsets(PieceKind::T, Rotation::North, Rotation::South).is_none());
        assert!(kick_offsets(PieceKind::T, Rotation::East, Rotation::East).is_none());
    }

    #[test]
    fn opposite_transitions_are_mirrored() {
        // Every SRS kick for a->b is the negation of b->a
        for kind in [PieceKind::I, PieceKind::S] {
            for from in 0..4 {
                let from = Rotation::from_index(from);
                let to = from.rotate_cw();
                let forward = kick_offsets(kind, from, to).unwrap();
                let back = kick_offsets(kind, to, from).unwrap();
                for (a, b) in forward.iter().zip(back.iter()) {
                    assert_eq!((a.0, a.1), (-b.0, -b.1));
                }
            }
        }
    }

    #[test]
    fn spawn_uses_config() {
        let config = GameConfig::default();
        let piece = Tetromino::spawn(PieceKind::L, &config);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!(piece.position, Position::new(3, 2));
        assert_eq!(piece.lock_delay_remaining, 500);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells.len(), 4);
        assert!(cells.contains(&Position::new(5, 2)));
    }
}
