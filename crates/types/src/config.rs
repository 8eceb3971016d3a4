//! Engine configuration.
//!
//! Every field has a default matching the standard guideline rules, and the
//! whole struct deserializes with `#[serde(default)]` so a JSON file only needs
//! to list the values it overrides.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Position, CHALLENGE_TIME_LIMIT_MS, DEFAULT_BOARD_WIDTH, DEFAULT_BUFFER_HEIGHT,
    DEFAULT_PREVIEW_COUNT, DEFAULT_VISIBLE_HEIGHT, LOCK_DELAY_MS, LOCK_RESET_LIMIT, MAX_LEVEL,
    MAX_PREVIEW_COUNT, SPRINT_TARGET_LINES,
};

/// How a Mini T-Spin is told apart from a Regular one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TSpinRule {
    /// Corner test only
    Corners,
    /// Corner test, plus a Mini becomes Regular when the last rotation used the
    /// fifth (last) kick offset
    #[default]
    Guideline,
}

/// Completion goal of a game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModeGoal {
    /// Complete once this many lines have been cleared
    Lines(u32),
    /// Complete once this much play time has elapsed
    TimeMs(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: usize,
    pub visible_height: usize,
    pub buffer_height: usize,
    pub preview_count: usize,
    pub hold_enabled: bool,
    pub lock_delay_ms: u32,
    pub lock_reset_limit: u32,
    pub max_level: u32,
    pub sprint_lines: u32,
    pub challenge_time_ms: u64,
    pub tspin_rule: TSpinRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            visible_height: DEFAULT_VISIBLE_HEIGHT,
            buffer_height: DEFAULT_BUFFER_HEIGHT,
            preview_count: DEFAULT_PREVIEW_COUNT,
            hold_enabled: true,
            lock_delay_ms: LOCK_DELAY_MS,
            lock_reset_limit: LOCK_RESET_LIMIT,
            max_level: MAX_LEVEL,
            sprint_lines: SPRINT_TARGET_LINES,
            challenge_time_ms: CHALLENGE_TIME_LIMIT_MS,
            tspin_rule: TSpinRule::Guideline,
        }
    }
}

impl GameConfig {
    /// Total board height (buffer plus visible rows)
    pub fn total_height(&self) -> usize {
        self.buffer_height + self.visible_height
    }

    /// Top-left of a freshly spawned piece's 4x4 box
    ///
    /// Horizontally centered; vertically the box starts two rows above the
    /// visible field so spawned minos sit inside the buffer.
    pub fn spawn_position(&self) -> Position {
        let x = (self.board_width.saturating_sub(4) / 2) as i32;
        let y = self.buffer_height.saturating_sub(2) as i32;
        Position::new(x, y)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width < 4 {
            return Err(ConfigError::BoardTooNarrow(self.board_width));
        }
        if self.total_height() < 4 {
            return Err(ConfigError::BoardTooShort(self.total_height()));
        }
        if self.preview_count == 0 || self.preview_count > MAX_PREVIEW_COUNT {
            return Err(ConfigError::PreviewCount(self.preview_count));
        }
        if self.max_level == 0 {
            return Err(ConfigError::MaxLevel);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    BoardTooNarrow(usize),
    BoardTooShort(usize),
    PreviewCount(usize),
    MaxLevel,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardTooNarrow(w) => {
                write!(f, "board width {} is below the minimum of 4", w)
            }
            ConfigError::BoardTooShort(h) => {
                write!(f, "board height {} is below the minimum of 4", h)
            }
            ConfigError::PreviewCount(n) => write!(
                f,
                "preview count {} must be between 1 and {}",
                n, MAX_PREVIEW_COUNT
            ),
            ConfigError::MaxLevel => write!(f, "max level must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
