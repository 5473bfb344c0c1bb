//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the arcade.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core rules, input mapping, score reporting).
//!
//! # Grid Dimensions
//!
//! The 2048 grid is a fixed 4x4 square:
//!
//! - **Rows**: indexed 0-3, top to bottom
//! - **Columns**: indexed 0-3, left to right
//! - **Empty cell**: stored as `0`
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRID_SIZE` | 4 | Side length of the grid |
//! | `INITIAL_TILES` | 2 | Tiles spawned at new game |
//! | `SPAWN_FOUR_PROBABILITY` | 0.1 | Chance a spawned tile is a 4 |
//! | `MIN_SWIPE_DISTANCE` | 30.0 | Pixels along the dominant axis |
//! | `RANKING_LIMIT` | 10 | Entries returned by a ranking read |
//! | `MAX_NICKNAME_CHARS` | 20 | Nickname truncation length |
//!
//! # Examples
//!
//! ```
//! use luck_arcade_types::{Direction, GameAction, GRID_SIZE};
//!
//! // Directions know their axis
//! assert!(Direction::Up.is_vertical());
//! assert!(!Direction::Right.is_vertical());
//!
//! // Actions carry directions
//! assert_eq!(GameAction::MoveDown.direction(), Some(Direction::Down));
//!
//! assert_eq!(GRID_SIZE, 4);
//! ```

/// Grid side length in cells (4x4)
pub const GRID_SIZE: usize = 4;

/// Total number of cells on the grid
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Upper bound on merges produced by one move (two per lane)
pub const MAX_MERGES: usize = GRID_SIZE * (GRID_SIZE / 2);

/// Tiles spawned when a new game starts
pub const INITIAL_TILES: usize = 2;

/// Probability that a spawned tile holds 4 instead of 2
pub const SPAWN_FOUR_PROBABILITY: f64 = 0.1;

/// Tile value that counts as a win for result messages
pub const WIN_TILE: u32 = 2048;

/// Minimum swipe displacement (pixels) along the dominant axis
pub const MIN_SWIPE_DISTANCE: f32 = 30.0;

/// Number of entries a ranking read returns
pub const RANKING_LIMIT: usize = 10;

/// Number of entries the score store keeps per game
pub const MAX_STORED_SCORES: usize = 100;

/// Nicknames are truncated to this many characters
pub const MAX_NICKNAME_CHARS: usize = 20;

/// Nickname used when the player did not pick one
pub const DEFAULT_NICKNAME: &str = "Anonymous";

/// A cell value: `0` for empty, otherwise a power of two
pub type Tile = u32;


/// The four slide directions
///
/// - **Up**: tiles move towards row 0
/// - **Down**: tiles move towards the last row
/// - **Left**: tiles move towards column 0
/// - **Right**: tiles move towards the last column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in a stable order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// True when tiles travel along columns
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// True when tiles travel towards the high index end of a lane
    pub fn towards_end(&self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }
}

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Commands the 2048 runner accepts from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide all tiles up
    MoveUp,
    /// Slide all tiles down
    MoveDown,
    /// Slide all tiles left
    MoveLeft,
    /// Slide all tiles right
    MoveRight,
    /// Start a new game
    Restart,
}

impl GameAction {
    /// Map a direction to its move action
    pub fn from_direction(dir: Direction) -> Self {
        match dir {
            Direction::Up => GameAction::MoveUp,
            Direction::Down => GameAction::MoveDown,
            Direction::Left => GameAction::MoveLeft,
            Direction::Right => GameAction::MoveRight,
        }
    }

    /// The slide direction, or `None` for non-move actions
    pub fn direction(&self) -> Option<Direction> {
        match self {
            GameAction::MoveUp => Some(Direction::Up),
            GameAction::MoveDown => Some(Direction::Down),
            GameAction::MoveLeft => Some(Direction::Left),
            GameAction::MoveRight => Some(Direction::Right),
            GameAction::Restart => None,
        }
    }
}

/// One of the two buttons in the luck-streak game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Map a coin flip index (0 or 1) to a side
    pub fn from_index(i: usize) -> Self {
        if i == 0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Game names used as score-board and best-score keys
pub mod game_names {
    pub const TWENTY48: &str = "2048";
    pub const LUCK: &str = "luck";
    pub const TIMER: &str = "timer";
    pub const LOTTO: &str = "lotto";
}
