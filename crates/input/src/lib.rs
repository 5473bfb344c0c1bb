//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and mouse events into [`crate::types::GameAction`] and
//! minigame choices. Swipe classification works on plain pixel deltas, so it
//! can be driven by any pointer source.

pub mod map;
pub mod swipe;

pub use luck_arcade_types as types;

pub use map::{handle_key_event, is_timer_toggle, luck_choice, lotto_digit, should_quit};
pub use swipe::{classify_swipe, SwipeTracker, CELL_HEIGHT_PX, CELL_WIDTH_PX};
