use arrayvec::ArrayVec;

use crate::types::{Position, Tile, GRID_SIZE, MAX_MERGES};

/// Renderer-facing copy of a 2048 session.
///
/// `last_spawn` and `last_merged` describe the most recent accepted move only,
/// so a renderer can give those cells one frame of emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: [[Tile; GRID_SIZE]; GRID_SIZE],
    pub score: u32,
    pub best_score: u32,
    pub max_tile: Tile,
    pub moves: u32,
    pub game_over: bool,
    pub last_spawn: Option<Position>,
    pub last_merged: ArrayVec<Position, MAX_MERGES>,
}

impl GameSnapshot {
    pub fn is_new(&self, pos: Position) -> bool {
        self.last_spawn == Some(pos)
    }

    pub fn is_merged(&self, pos: Position) -> bool {
        self.last_merged.contains(&pos)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[0; GRID_SIZE]; GRID_SIZE],
            score: 0,
            best_score: 0,
            max_tile: 0,
            moves: 0,
            game_over: false,
            last_spawn: None,
            last_merged: ArrayVec::new(),
        }
    }
}
