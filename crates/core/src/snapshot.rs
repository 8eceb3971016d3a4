//! Read-only views of the engine handed to renderers and other collaborators

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::pieces::{Shape, Tetromino};
use crate::scoring::ScoreState;
use crate::types::{
    CellState, GameMode, GameStatus, PieceKind, Position, Rotation, MAX_PREVIEW_COUNT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub position: Position,
    pub lock_delay_remaining: u32,
}

impl ActiveSnapshot {
    pub fn cells(&self) -> impl Iterator<Item = Position> + 'static {
        Shape::of(self.kind, self.rotation).cells_at(self.position)
    }
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            position: value.position,
            lock_delay_remaining: value.lock_delay_remaining,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Hidden rows at the top of `board`
    pub buffer_height: usize,
    /// Locked cells only, top row first
    pub board: Vec<Vec<CellState>>,
    pub active: Option<ActiveSnapshot>,
    /// Hard drop landing position of the active piece
    pub ghost: Option<Position>,
    pub hold: Option<PieceKind>,
    pub next_queue: ArrayVec<PieceKind, MAX_PREVIEW_COUNT>,
    pub can_hold: bool,
    pub score: ScoreState,
    pub status: GameStatus,
    pub mode: GameMode,
    pub elapsed_ms: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board.clear();
        self.width = 0;
        self.height = 0;
        self.buffer_height = 0;
        self.active = None;
        self.ghost = None;
        self.hold = None;
        self.next_queue.clear();
        self.can_hold = true;
        self.score = ScoreState::default();
        self.status = GameStatus::Ready;
        self.mode = GameMode::Classic;
        self.elapsed_ms = 0;
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Rows below the spawn buffer
    pub fn visible_rows(&self) -> &[Vec<CellState>] {
        &self.board[self.buffer_height.min(self.board.len())..]
    }

    /// Board rows with the ghost and then the active piece drawn on top
    pub fn composited_rows(&self) -> Vec<Vec<CellState>> {
        let mut rows = self.board.clone();
        let mut paint = |cell: Position, state: CellState| {
            if cell.x < 0 || cell.y < 0 {
                return;
            }
            if let Some(slot) = rows
                .get_mut(cell.y as usize)
                .and_then(|row| row.get_mut(cell.x as usize))
            {
                *slot = state;
            }
        };

        if let Some(active) = self.active {
            if let Some(ghost) = self.ghost {
                let shape = Shape::of(active.kind, active.rotation);
                for cell in shape.cells_at(ghost) {
                    paint(cell, CellState::Ghost);
                }
            }
            for cell in active.cells() {
                paint(cell, CellState::Active);
            }
        }
        rows
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            buffer_height: 0,
            board: Vec::new(),
            active: None,
            ghost: None,
            hold: None,
            next_queue: ArrayVec::new(),
            can_hold: true,
            score: ScoreState::default(),
            status: GameStatus::Ready,
            mode: GameMode::Classic,
            elapsed_ms: 0,
        }
    }
}
