//! Game state module - the state machine that sequences every engine component
//!
//! `GameState` owns the board, active piece, preview queue, hold slot and score.
//! Commands run to completion and report whether they changed anything; callers
//! observe the result through accessors, `snapshot`, and `take_last_event`.

use log::{debug, error, info};
use serde::Serialize;

use crate::board::{collides, hard_drop_position, is_grounded, place, Board};
use crate::line_clear;
use crate::pieces::Tetromino;
use crate::queue::PieceQueue;
use crate::rng::{RandomSource, Randomizer, SimpleRng};
use crate::rotation::rotate;
use crate::scoring::{calculate_drop_score, gravity_interval_ms, score_event, ScoreEvent, ScoreState};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::tspin::classify_with_rule;
use crate::types::{
    ConfigError, Direction, GameAction, GameConfig, GameMode, GameStatus, ModeGoal, PieceKind,
    Position, TSpinClass, MAX_PREVIEW_COUNT,
};

/// Outcome of the most recent lock, kept until taken
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Cleared row indices on the pre-collapse board, ascending
    pub cleared_rows: Vec<usize>,
    pub tspin: TSpinClass,
    pub perfect_clear: bool,
    pub combo: u32,
    pub back_to_back: bool,
    pub b2b_applied: bool,
    /// Points awarded by the placement, drop points excluded
    pub points: u32,
}

impl LockEvent {
    pub fn lines_cleared(&self) -> u32 {
        self.cleared_rows.len() as u32
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    config: GameConfig,
    mode: GameMode,
    status: GameStatus,
    board: Board,
    active: Option<Tetromino>,
    hold: Option<Tetromino>,
    can_hold: bool,
    queue: PieceQueue<R>,
    score: ScoreState,
    /// Kick index of the rotation that was the active piece's last move
    last_rotation_kick: Option<usize>,
    fall_timer_ms: u32,
    lock_resets: u32,
    lowest_y: i32,
    /// Playing time, frozen while paused
    elapsed_ms: u64,
    last_event: Option<LockEvent>,
}

impl GameState<SimpleRng> {
    /// Create a game with default settings and the given RNG seed
    pub fn new(seed: u32) -> Self {
        let config = GameConfig::default();
        let queue = PieceQueue::new(seed, &config);
        Self::from_parts(config, queue)
    }

    /// Create a game with custom settings
    pub fn with_config(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_randomizer(config, Randomizer::new(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a game drawing pieces from a caller-supplied randomizer
    pub fn with_randomizer(config: GameConfig, randomizer: Randomizer<R>) -> Result<Self, ConfigError> {
        config.validate()?;
        let queue = PieceQueue::with_randomizer(randomizer, &config);
        Ok(Self::from_parts(config, queue))
    }

    fn from_parts(config: GameConfig, queue: PieceQueue<R>) -> Self {
        Self {
            board: Board::from_config(&config),
            mode: GameMode::Classic,
            status: GameStatus::Ready,
            active: None,
            hold: None,
            can_hold: true,
            queue,
            score: ScoreState::default(),
            last_rotation_kick: None,
            fall_timer_ms: 0,
            lock_resets: 0,
            lowest_y: 0,
            elapsed_ms: 0,
            last_event: None,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Kind in the hold slot
    pub fn held(&self) -> Option<PieceKind> {
        self.hold.map(|p| p.kind)
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score_state(&self) -> &ScoreState {
        &self.score
    }

    pub fn score(&self) -> u32 {
        self.score.score
    }

    pub fn level(&self) -> u32 {
        self.score.level
    }

    pub fn lines(&self) -> u32 {
        self.score.lines_cleared
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Upcoming piece kinds, next first
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.preview()
    }

    /// Whether the last successful move of the active piece was a rotation
    pub fn last_move_was_rotation(&self) -> bool {
        self.last_rotation_kick.is_some()
    }

    pub fn last_event(&self) -> Option<&LockEvent> {
        self.last_event.as_ref()
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Landing position of the active piece
    pub fn ghost_position(&self) -> Option<Position> {
        self.active.map(|piece| hard_drop_position(&self.board, &piece))
    }

    /// Current gravity step interval (ms)
    pub fn gravity_interval_ms(&self) -> u32 {
        gravity_interval_ms(self.score.level)
    }

    /// Reset everything and begin playing `mode`
    pub fn start(&mut self, mode: GameMode) -> bool {
        self.clear_session();
        self.mode = mode;
        self.status = GameStatus::Playing;
        info!("[Engine] start mode={}", mode.as_str());
        self.spawn_next();
        true
    }

    /// Return to `Ready` with an empty board
    pub fn reset(&mut self) -> bool {
        self.clear_session();
        self.status = GameStatus::Ready;
        info!("[Engine] reset");
        true
    }

    fn clear_session(&mut self) {
        self.board = Board::from_config(&self.config);
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.queue.reset(&self.config);
        self.score = ScoreState::default();
        self.last_rotation_kick = None;
        self.fall_timer_ms = 0;
        self.lock_resets = 0;
        self.lowest_y = 0;
        self.elapsed_ms = 0;
        self.last_event = None;
    }

    /// Freeze gravity, lock delay and the play clock
    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.status = GameStatus::Paused;
        info!("[Engine] paused at {}ms", self.elapsed_ms);
        true
    }

    /// Continue from the frozen timers
    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Playing;
        info!("[Engine] resumed");
        true
    }

    /// Translate the active piece one cell; moving down scores a soft drop
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let (dx, dy) = direction.delta();
        let moved = piece.moved(dx, dy);
        if collides(&self.board, moved.shape(), moved.position) {
            return false;
        }

        self.active = Some(moved);
        self.last_rotation_kick = None;
        if direction == Direction::Down {
            self.score.score += calculate_drop_score(1, false);
            self.fall_timer_ms = 0;
        }
        self.refresh_lock_delay();
        true
    }

    /// Rotate the active piece through the SRS kick tests
    pub fn rotate_piece(&mut self, clockwise: bool) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };
        let Some(result) = rotate(&piece, clockwise, &self.board) else {
            return false;
        };

        self.active = Some(Tetromino {
            rotation: result.rotation,
            position: result.position,
            ..piece
        });
        self.last_rotation_kick = Some(result.kick_index);
        self.refresh_lock_delay();
        true
    }

    /// Drop to the landing row and lock immediately
    pub fn hard_drop(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let landing = hard_drop_position(&self.board, &piece);
        let distance = (landing.y - piece.position.y).max(0) as u32;
        self.score.score += calculate_drop_score(distance, true);
        if distance > 0 {
            self.last_rotation_kick = None;
        }
        self.active = Some(Tetromino {
            position: landing,
            ..piece
        });
        self.lock_active();
        true
    }

    /// Swap the active piece with the hold slot, once per lock
    pub fn hold_piece(&mut self) -> bool {
        if self.status != GameStatus::Playing || !self.config.hold_enabled || !self.can_hold {
            return false;
        }
        let Some(piece) = self.active.take() else {
            return false;
        };

        let stored = Tetromino::spawn(piece.kind, &self.config);
        let previous = self.hold.replace(stored);
        self.can_hold = false;

        match previous {
            Some(held) => {
                self.spawn(Tetromino::spawn(held.kind, &self.config));
            }
            None => {
                self.spawn_next();
            }
        }
        true
    }

    /// Advance gravity, lock delay and the play clock by `delta_ms`
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }

        self.elapsed_ms += u64::from(delta_ms);
        if let Some(ModeGoal::TimeMs(limit)) = self.mode.goal(&self.config) {
            if self.elapsed_ms >= limit {
                self.complete();
                return true;
            }
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(delta_ms);
        let interval = self.gravity_interval_ms();
        let mut lock_budget = delta_ms;

        while let Some(mut piece) = self.active {
            if is_grounded(&self.board, &piece) {
                self.fall_timer_ms = 0;
                if lock_budget >= piece.lock_delay_remaining {
                    self.lock_active();
                } else {
                    piece.lock_delay_remaining -= lock_budget;
                    self.active = Some(piece);
                }
                break;
            }

            if self.fall_timer_ms < interval {
                break;
            }
            self.fall_timer_ms -= interval;
            self.active = Some(piece.moved(0, 1));
            self.last_rotation_kick = None;
            self.refresh_lock_delay();
            // A piece that just landed starts its lock delay on the next tick
            lock_budget = 0;
        }
        true
    }

    /// Apply a command
    pub fn apply(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start(mode) => self.start(mode),
            GameAction::Reset => self.reset(),
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::Move(direction) => self.move_piece(direction),
            GameAction::Rotate { clockwise } => self.rotate_piece(clockwise),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Hold => self.hold_piece(),
            GameAction::Tick(ms) => self.tick(ms),
        }
    }

    /// Restore or track the lock delay after the active piece moved
    fn refresh_lock_delay(&mut self) {
        let full = self.config.lock_delay_ms;
        let Some(piece) = self.active.as_mut() else {
            return;
        };

        if piece.position.y > self.lowest_y {
            self.lowest_y = piece.position.y;
            self.lock_resets = 0;
            piece.lock_delay_remaining = full;
        } else if piece.lock_delay_remaining < full && self.lock_resets < self.config.lock_reset_limit {
            piece.lock_delay_remaining = full;
            self.lock_resets += 1;
        }
    }

    /// Merge the active piece, clear lines, score, and bring in the next piece
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        // Classify against the board before the piece is merged
        let tspin = classify_with_rule(
            &self.board,
            &piece,
            self.last_rotation_kick,
            self.config.tspin_rule,
        );
        let placed = place(&self.board, &piece);
        let cleared_rows = line_clear::detect(&placed);
        self.board = if cleared_rows.is_empty() {
            placed
        } else {
            line_clear::collapse(&placed, &cleared_rows)
        };
        let perfect_clear = !cleared_rows.is_empty() && line_clear::is_empty(&self.board);

        let event = ScoreEvent {
            lines_cleared: cleared_rows.len() as u32,
            tspin,
            is_perfect_clear: perfect_clear,
        };
        let (score, result) = score_event(&self.score, event, self.config.max_level);
        self.score = score;

        debug!(
            "[Engine] lock kind={} lines={} tspin={} perfect={} combo={} b2b={} points={}",
            piece.kind.as_str(),
            cleared_rows.len(),
            tspin.as_str().unwrap_or("none"),
            perfect_clear,
            score.combo_count,
            score.back_to_back,
            result.total
        );
        self.last_event = Some(LockEvent {
            kind: piece.kind,
            cleared_rows,
            tspin,
            perfect_clear,
            combo: score.combo_count,
            back_to_back: score.back_to_back,
            b2b_applied: result.b2b_applied,
            points: result.total,
        });
        self.last_rotation_kick = None;

        if let Some(ModeGoal::Lines(goal)) = self.mode.goal(&self.config) {
            if self.score.lines_cleared >= goal {
                self.complete();
                return;
            }
        }

        if self.spawn_next() {
            self.can_hold = true;
        }
    }

    /// Draw the next queued piece into play
    fn spawn_next(&mut self) -> bool {
        match self.queue.pop(&self.config) {
            Some(piece) => self.spawn(piece),
            None => {
                error!("[Engine] next queue empty at spawn; ending game");
                self.end_game();
                false
            }
        }
    }

    /// Put `piece` into play, or end the game if its spawn position is blocked
    fn spawn(&mut self, piece: Tetromino) -> bool {
        if collides(&self.board, piece.shape(), piece.position) {
            self.active = None;
            self.end_game();
            return false;
        }
        self.active = Some(piece);
        self.lowest_y = piece.position.y;
        self.lock_resets = 0;
        self.fall_timer_ms = 0;
        self.last_rotation_kick = None;
        true
    }

    fn end_game(&mut self) {
        self.status = GameStatus::GameOver;
        info!(
            "[Engine] game over mode={} score={} lines={}",
            self.mode.as_str(),
            self.score.score,
            self.score.lines_cleared
        );
    }

    fn complete(&mut self) {
        self.status = GameStatus::Completed;
        info!(
            "[Engine] completed mode={} score={} lines={} elapsed={}ms",
            self.mode.as_str(),
            self.score.score,
            self.score.lines_cleared,
            self.elapsed_ms
        );
    }

    /// Write a read-only view into `out`, reusing its allocations
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let height = self.board.height();
        out.width = self.board.width();
        out.height = height;
        out.buffer_height = self.config.buffer_height;

        out.board.truncate(height);
        out.board.resize_with(height, Vec::new);
        for (dst, src) in out.board.iter_mut().zip(self.board.rows()) {
            dst.clear();
            dst.extend_from_slice(src);
        }

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost = self.ghost_position();
        out.hold = self.held();
        out.next_queue.clear();
        out.next_queue.extend(self.queue.preview().take(MAX_PREVIEW_COUNT));
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.status = self.status;
        out.mode = self.mode;
        out.elapsed_ms = self.elapsed_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
