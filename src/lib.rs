//! Luck Arcade (workspace facade crate).
//!
//! Re-exports the workspace crates as `luck_arcade::{core,input,scores,types}`
//! and hosts the terminal runner in [`app`].

pub mod app;

pub use luck_arcade_core as core;
pub use luck_arcade_input as input;
pub use luck_arcade_scores as scores;
pub use luck_arcade_types as types;
