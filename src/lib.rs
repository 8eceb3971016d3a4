//! SRS Tetris (workspace facade crate).
//!
//! Re-exports the engine crates under `srs_tetris::{core,types}` and adds the
//! pieces a host application needs around them: the persisted high-score
//! table and the headless command runner.

pub use srs_tetris_core as core;
pub use srs_tetris_types as types;

pub mod records;
pub mod runner;
