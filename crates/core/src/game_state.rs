//! Game state module - one 2048 session
//!
//! `GameState` owns the grid, the score, the best score and the random source.
//! It is not reentrant: every mutating call takes `&mut self`, so one session
//! can only be driven from one place at a time.

use arrayvec::ArrayVec;

use crate::grid::{Grid, SlideOutcome};
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Outcome of one directional command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveResult {
    /// True if any cell changed (and a tile was spawned)
    pub moved: bool,
    /// Points earned from merges
    pub score_gained: u32,
    /// Merge destinations
    pub merged: ArrayVec<Position, MAX_MERGES>,
    /// Cell filled by the post-move spawn
    pub spawned: Option<Position>,
    /// Whether this move ended the game
    pub game_over: bool,
}

/// Final numbers of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub score: u32,
    pub max_tile: Tile,
}

impl GameResult {
    /// Coarse tier used for result messages
    pub fn tier(&self) -> ResultTier {
        match self.max_tile {
            t if t >= WIN_TILE => ResultTier::Won,
            t if t >= 1024 => ResultTier::Close,
            t if t >= 512 => ResultTier::Good,
            _ => ResultTier::KeepTrying,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTier {
    Won,
    Close,
    Good,
    KeepTrying,
}

impl ResultTier {
    pub fn title(&self) -> &'static str {
        match self {
            ResultTier::Won => "Congratulations!",
            ResultTier::Close => "So close!",
            ResultTier::Good => "Well played!",
            ResultTier::KeepTrying => "Try again!",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ResultTier::Won => "you reached 2048!",
            ResultTier::Close => "just a little more to 2048!",
            ResultTier::Good => "aim higher next time!",
            ResultTier::KeepTrying => "practice makes perfect!",
        }
    }
}

/// Complete 2048 session state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    grid: Grid,
    score: u32,
    best_score: u32,
    game_over: bool,
    /// Accepted moves this game.
    moves: u32,
    /// Monotonic game id (increments on restart).
    game_id: u32,
    last_spawn: Option<Position>,
    last_merged: ArrayVec<Position, MAX_MERGES>,
    rng: R,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Start a new game on an injected random source.
    pub fn with_rng(rng: R) -> Self {
        let mut state = Self::from_grid(Grid::new(), rng);
        state.spawn_initial_tiles();
        state
    }

    /// Resume from an explicit grid. No tiles are spawned.
    pub fn from_grid(grid: Grid, rng: R) -> Self {
        Self {
            grid,
            score: 0,
            best_score: 0,
            game_over: grid.is_stuck(),
            moves: 0,
            game_id: 0,
            last_spawn: None,
            last_merged: ArrayVec::new(),
            rng,
        }
    }

    /// Seed the in-memory best score (e.g. from a saved profile).
    pub fn with_best_score(mut self, best: u32) -> Self {
        self.best_score = self.best_score.max(best);
        self
    }

    fn spawn_initial_tiles(&mut self) {
        for _ in 0..INITIAL_TILES {
            self.spawn();
        }
        // Initial spawns are not "new" for rendering purposes.
        self.last_spawn = None;
    }

    /// Start over: empty grid, two tiles, score 0. Best score is kept.
    pub fn restart(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.game_over = false;
        self.moves = 0;
        self.game_id = self.game_id.wrapping_add(1);
        self.last_merged.clear();
        self.spawn_initial_tiles();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Terminal flag, set after a move's spawn step leaves no legal move.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn last_spawn(&self) -> Option<Position> {
        self.last_spawn
    }

    pub fn last_merged(&self) -> &[Position] {
        &self.last_merged
    }

    /// Largest tile on the grid (0 only for an empty grid).
    pub fn max_tile(&self) -> Tile {
        self.grid.max_tile()
    }

    /// Evaluate the game-over condition on the current grid.
    pub fn is_game_over(&self) -> bool {
        self.grid.is_stuck()
    }

    /// Slide a copy of the grid without touching the session.
    pub fn simulate(&self, dir: Direction) -> (Grid, SlideOutcome) {
        self.grid.slid(dir)
    }

    pub fn can_move(&self, dir: Direction) -> bool {
        self.grid.can_slide(dir)
    }

    /// Final result, once the game is over.
    pub fn final_result(&self) -> Option<GameResult> {
        self.game_over.then(|| GameResult {
            score: self.score,
            max_tile: self.max_tile(),
        })
    }

    /// Apply one directional command.
    ///
    /// On a change: score the merges, spawn one tile, then evaluate game over.
    /// A no-op move (or any move after game over) leaves the session untouched.
    pub fn apply_move(&mut self, dir: Direction) -> MoveResult {
        if self.game_over {
            return MoveResult {
                game_over: true,
                ..MoveResult::default()
            };
        }

        let outcome = self.grid.slide(dir);
        if !outcome.moved {
            return MoveResult::default();
        }

        self.moves = self.moves.wrapping_add(1);
        self.score = self.score.saturating_add(outcome.gained);
        if self.score > self.best_score {
            self.best_score = self.score;
        }

        let spawned = self.spawn();
        self.last_merged = outcome.merged.clone();
        self.game_over = self.is_game_over();

        MoveResult {
            moved: true,
            score_gained: outcome.gained,
            merged: outcome.merged,
            spawned,
            game_over: self.game_over,
        }
    }

    /// Apply an input action. Returns `None` for actions that are not moves.
    pub fn apply_action(&mut self, action: GameAction) -> Option<MoveResult> {
        match action.direction() {
            Some(dir) => Some(self.apply_move(dir)),
            None => {
                if action == GameAction::Restart {
                    self.restart();
                }
                None
            }
        }
    }

    /// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
    ///
    /// Returns the filled cell, or `None` if the grid is full.
    pub fn spawn(&mut self) -> Option<Position> {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            self.last_spawn = None;
            return None;
        }

        let pos = empty[self.rng.next_index(empty.len())];
        let value = if self.rng.next_unit() < 1.0 - SPAWN_FOUR_PROBABILITY {
            2
        } else {
            4
        };
        self.grid.set(pos, value);
        self.last_spawn = Some(pos);
        Some(pos)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid = *self.grid.rows();
        out.score = self.score;
        out.best_score = self.best_score;
        out.max_tile = self.max_tile();
        out.moves = self.moves;
        out.game_over = self.game_over;
        out.last_spawn = self.last_spawn;
        out.last_merged = self.last_merged.clone();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
