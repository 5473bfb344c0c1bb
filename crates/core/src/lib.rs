//! Core game logic - pure, deterministic, and testable
//!
//! Everything in this crate is synchronous and free of I/O: no terminal, no
//! network, no filesystem. Randomness is injected, so a seed replays a game.
//!
//! # Module Structure
//!
//! - [`grid`]: 4x4 tile matrix with the shared slide/merge lane routine
//! - [`game_state`]: one 2048 session (score, best, spawning, game over)
//! - [`snapshot`]: renderer-facing copy of a session
//! - [`rng`]: the `RandomSource` trait and a seeded LCG
//! - [`luck`]: luck-streak coin game
//! - [`timer`]: seven-second timer game
//! - [`lotto`]: daily 6/45 lotto
//!
//! # Example
//!
//! ```
//! use luck_arcade_core::GameState;
//! use luck_arcade_types::Direction;
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.grid().count_tiles(), 2);
//!
//! let before = game.score();
//! let result = game.apply_move(Direction::Left);
//! assert_eq!(game.score(), before + result.score_gained);
//! ```

pub mod game_state;
pub mod grid;
pub mod lotto;
pub mod luck;
pub mod rng;
pub mod snapshot;
pub mod timer;

pub use luck_arcade_types as types;

pub use game_state::{GameResult, GameState, MoveResult, ResultTier};
pub use grid::{merge_line, Grid, LineMerge, SlideOutcome};
pub use rng::{RandomSource, SimpleRng};
pub use snapshot::GameSnapshot;
