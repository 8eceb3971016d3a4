//! Core rules engine - pure, deterministic, and testable
//!
//! This crate contains every game rule and the state machine that sequences
//! them. It performs no I/O: rendering, input mapping and persistence live in
//! the surrounding application and talk to the engine through commands and
//! read-only snapshots.
//!
//! # Module Structure
//!
//! - [`pieces`]: shape tables, SRS kick tables, and the active [`Tetromino`]
//! - [`rng`]: 7-bag randomizer over an injectable random source
//! - [`queue`]: preview queue refilled from the randomizer
//! - [`board`]: grid of cells plus collision, hard-drop and placement
//! - [`rotation`]: SRS rotation resolver
//! - [`tspin`]: T-Spin corner classifier
//! - [`line_clear`]: row detection and collapse
//! - [`scoring`]: score, level, combo and back-to-back rules
//! - [`game_state`]: the state machine driven by commands and `tick`
//! - [`snapshot`]: read-only views for renderers
//!
//! # Rules
//!
//! - **7-Bag Randomizer**: every window of seven draws from a bag holds each piece once
//! - **SRS Rotation**: base position first, then the kick table in order; first fit wins
//! - **Lock Delay**: 500ms while grounded, refreshed by up to 15 moves or rotations
//! - **Hold**: once per lock
//! - **T-Spin Detection**: corner test, optionally promoted by the fifth kick test
//! - **Scoring**: level-scaled clears with combo, back-to-back and perfect-clear bonuses
//!
//! # Example
//!
//! ```
//! use srs_tetris_core::GameState;
//! use srs_tetris_core::types::{Direction, GameMode, GameStatus};
//!
//! let mut game = GameState::new(12345);
//! game.start(GameMode::Classic);
//!
//! game.move_piece(Direction::Right);
//! game.rotate_piece(true);
//! game.hard_drop();
//!
//! assert_eq!(game.status(), GameStatus::Playing);
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! The host calls [`GameState::tick`](game_state::GameState::tick) with the
//! elapsed milliseconds. Gravity follows the level curve (800ms per row at
//! level 1, 33ms at level 20); pausing freezes every accumulator.

pub mod board;
pub mod game_state;
pub mod line_clear;
pub mod pieces;
pub mod queue;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;
pub mod tspin;

pub use srs_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{collides, hard_drop_position, place, Board};
pub use game_state::{GameState, LockEvent};
pub use pieces::{Shape, Tetromino};
pub use queue::PieceQueue;
pub use rng::{RandomSource, Randomizer, SimpleRng};
pub use rotation::{rotate, RotationResult};
pub use scoring::{ScoreEvent, ScoreResult, ScoreState};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use tspin::{classify, classify_with_rule};
