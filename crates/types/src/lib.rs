//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behavior beyond parsing and small helpers,
//! so they can be shared by the rules engine, the runner binary, and any
//! rendering or input collaborator that consumes snapshots.
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions (overridable through [`GameConfig`]):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Visible height**: 20 rows
//! - **Buffer**: 4 hidden rows above the visible field, where pieces spawn
//!
//! Coordinates are board-relative with the origin at the top-left of the
//! buffer; `y` grows downward.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TARGET_FPS` | 60 | Frame rate the gravity table is expressed in |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a grounded piece locks |
//! | `LOCK_RESET_LIMIT` | 15 | Max lock delay refreshes per lowest row |
//!
//! # Examples
//!
//! ```
//! use srs_tetris_types::{GameAction, GameMode, PieceKind, Rotation};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! let action = GameAction::parse("start sprint").unwrap();
//! assert_eq!(action, GameAction::Start(GameMode::Sprint));
//! ```

use serde::{Deserialize, Serialize};

pub mod config;

pub use config::{ConfigError, GameConfig, ModeGoal, TSpinRule};

/// Default board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default visible playfield height (20 rows)
pub const DEFAULT_VISIBLE_HEIGHT: usize = 20;

/// Hidden spawn rows stacked above the visible playfield
pub const DEFAULT_BUFFER_HEIGHT: usize = 4;

/// Number of upcoming pieces exposed in the preview by default
pub const DEFAULT_PREVIEW_COUNT: usize = 5;

/// Upper bound for the preview length (one full bag)
pub const MAX_PREVIEW_COUNT: usize = 7;

/// Frame rate the gravity table is expressed in
pub const TARGET_FPS: u32 = 60;

/// Lock delay when a piece is grounded (500ms)
pub const LOCK_DELAY_MS: u32 = 500;

/// Maximum number of lock delay refreshes while a piece stays on the same lowest row
pub const LOCK_RESET_LIMIT: u32 = 15;

/// Lines needed per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 20;

/// Frames per gravity step, indexed by `level - 1`
///
/// Level 1 falls one row every 48 frames (800ms), level 20 every 2 frames.
pub const LEVEL_SPEED_FRAMES: [u32; 20] = [
    48, 43, 38, 33, 28, 23, 18, 13, 8, 6, // levels 1-10
    5, 5, 5, 4, 4, 4, 3, 3, 3, 2, // levels 11-20
];

/// Sprint mode target
pub const SPRINT_TARGET_LINES: u32 = 40;

/// Challenge mode time limit (3 minutes of play)
pub const CHALLENGE_TIME_LIMIT_MS: u64 = 180_000;

/// Line clear base points, indexed by number of lines (single, double, triple, tetris)
///
/// Multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Regular T-Spin base points for 0..=3 lines
pub const TSPIN_SCORES: [u32; 4] = [400, 800, 1200, 1600];

/// Mini T-Spin base points for 0..=2 lines
pub const TSPIN_MINI_SCORES: [u32; 3] = [100, 200, 400];

/// Combo scoring base value (50 points per combo step beyond the first clear)
pub const COMBO_BASE: u32 = 50;

/// Back-to-back bonus numerator (3/2 = 1.5x multiplier, floored)
pub const B2B_NUMERATOR: u32 = 3;

/// Back-to-back bonus denominator
pub const B2B_DENOMINATOR: u32 = 2;

/// Flat perfect clear bonus
pub const PERFECT_CLEAR_BASE: u32 = 1000;

/// Perfect clear bonus per cleared line, multiplied by level
pub const PERFECT_CLEAR_LINE_BONUS: u32 = 200;

/// Points per cell for a player soft drop
pub const SOFT_DROP_SCORE: u32 = 1;

/// Points per cell for a hard drop
pub const HARD_DROP_SCORE: u32 = 2;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color tag:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical bag order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North** (0): Spawn orientation
/// - **East** (1): Rotated 90° clockwise
/// - **South** (2): Rotated 180°
/// - **West** (3): Rotated 90° counter-clockwise
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Numeric rotation state (0..=3)
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for a numeric state, taken modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Parse rotation from string
    ///
    /// Accepts full names, single letters, or the numeric state (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" | "0" => Some(Rotation::North),
            "east" | "e" | "1" => Some(Rotation::East),
            "south" | "s" | "2" => Some(Rotation::South),
            "west" | "w" | "3" => Some(Rotation::West),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Board-relative integer position (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by `(dx, dy)`
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// State of a single board cell
///
/// Only `Empty` is free space: gameplay treats every other state as occupied.
/// `Ghost` and `Active` never appear in the engine's own board; they exist for
/// composited views handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Empty,
    Filled(PieceKind),
    Ghost,
    Active,
}

impl CellState {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellState::Empty)
    }

    pub fn is_occupied(&self) -> bool {
        !self.is_empty()
    }
}

/// Player-controlled translation directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Board delta `(dx, dy)` for one step in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// T-Spin classification result
///
/// - **None**: Not a T-Spin
/// - **Mini**: Three corners blocked without both front corners (or the catch-all)
/// - **Regular**: Both front corners and at least one back corner blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TSpinClass {
    #[default]
    None,
    Mini,
    Regular,
}

impl TSpinClass {
    /// Convert to optional string representation
    ///
    /// Returns `None` for `TSpinClass::None`.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            TSpinClass::None => None,
            TSpinClass::Mini => Some("mini"),
            TSpinClass::Regular => Some("regular"),
        }
    }
}

/// Lifecycle of an engine session
///
/// `Ready`, `GameOver` and `Completed` stay put until an explicit start or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    #[default]
    Ready,
    Playing,
    Paused,
    GameOver,
    Completed,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Ready => "ready",
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "gameOver",
            GameStatus::Completed => "completed",
        }
    }

    /// Whether the session has ended (only start/reset leave these states)
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Completed)
    }
}

/// Game modes
///
/// - **Classic**: endless, ends on top-out
/// - **Sprint**: completes once the configured line goal is reached
/// - **Zen**: endless, no goal
/// - **Challenge**: completes when the configured play time runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Classic,
    Sprint,
    Zen,
    Challenge,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Classic,
        GameMode::Sprint,
        GameMode::Zen,
        GameMode::Challenge,
    ];

    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "sprint" => Some(GameMode::Sprint),
            "zen" => Some(GameMode::Zen),
            "challenge" => Some(GameMode::Challenge),
            _ => None,
        }
    }

    /// Lowercase name, also used as the high-score key
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Sprint => "sprint",
            GameMode::Zen => "zen",
            GameMode::Challenge => "challenge",
        }
    }

    /// Completion goal for this mode under `config`, if any
    pub fn goal(&self, config: &GameConfig) -> Option<ModeGoal> {
        match self {
            GameMode::Sprint => Some(ModeGoal::Lines(config.sprint_lines)),
            GameMode::Challenge => Some(ModeGoal::TimeMs(config.challenge_time_ms)),
            GameMode::Classic | GameMode::Zen => None,
        }
    }
}

/// Commands accepted by the engine
///
/// One variant per operation of the command surface, each carrying only the
/// fields it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum GameAction {
    /// Reset everything and begin playing in the given mode
    Start(GameMode),
    /// Return to `Ready` with an empty board
    Reset,
    Pause,
    Resume,
    /// Translate the active piece one cell (down awards soft drop points)
    Move(Direction),
    /// Rotate the active piece using SRS wall kicks
    Rotate { clockwise: bool },
    /// Drop to the landing row and lock immediately
    HardDrop,
    /// Swap the active piece with the hold slot
    Hold,
    /// Advance gravity and lock delay by the given number of milliseconds
    Tick(u32),
}

impl GameAction {
    /// Parse the text form used by the headless runner
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::{Direction, GameAction, GameMode};
    ///
    /// assert_eq!(GameAction::parse("left"), Some(GameAction::Move(Direction::Left)));
    /// assert_eq!(GameAction::parse("ccw"), Some(GameAction::Rotate { clockwise: false }));
    /// assert_eq!(GameAction::parse("tick 16"), Some(GameAction::Tick(16)));
    /// assert_eq!(GameAction::parse("start"), Some(GameAction::Start(GameMode::Classic)));
    /// assert_eq!(GameAction::parse("fly"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let verb = parts.next()?.to_lowercase();
        let arg = parts.next();
        if parts.next().is_some() {
            return None;
        }

        let action = match (verb.as_str(), arg) {
            ("start", None) => GameAction::Start(GameMode::Classic),
            ("start", Some(mode)) => GameAction::Start(GameMode::from_str(mode)?),
            ("tick", Some(ms)) => GameAction::Tick(ms.parse().ok()?),
            (_, Some(_)) => return None,
            ("reset", None) => GameAction::Reset,
            ("pause", None) => GameAction::Pause,
            ("resume", None) => GameAction::Resume,
            ("left" | "moveleft", None) => GameAction::Move(Direction::Left),
            ("right" | "moveright", None) => GameAction::Move(Direction::Right),
            ("down" | "softdrop", None) => GameAction::Move(Direction::Down),
            ("cw" | "rotatecw", None) => GameAction::Rotate { clockwise: true },
            ("ccw" | "rotateccw", None) => GameAction::Rotate { clockwise: false },
            ("drop" | "harddrop", None) => GameAction::HardDrop,
            ("hold", None) => GameAction::Hold,
            _ => return None,
        };
        Some(action)
    }

    /// Canonical camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Start(_) => "start",
            GameAction::Reset => "reset",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::Move(Direction::Left) => "moveLeft",
            GameAction::Move(Direction::Right) => "moveRight",
            GameAction::Move(Direction::Down) => "softDrop",
            GameAction::Rotate { clockwise: true } => "rotateCw",
            GameAction::Rotate { clockwise: false } => "rotateCcw",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
            GameAction::Tick(_) => "tick",
        }
    }
}
