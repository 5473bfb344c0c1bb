//! File-backed ranking store.
//!
//! Each game keeps one pretty-printed JSON array. A missing file is an empty
//! ranking; an unreadable or corrupt file is logged and also read as empty, so
//! the next submission rewrites it. Read-modify-write cycles are serialised by
//! a single async mutex per store.
//!
//! What "best" means depends on the game, see [`RankOrder`].

use std::cmp::Reverse;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::protocol::{score_file_name, validate_game_name, ScoreEntry, ValidScore, ValidationError};
use crate::types::{game_names, MAX_STORED_SCORES, RANKING_LIMIT};

/// How a game's board is ordered. All orders are stable, so ties keep
/// submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Bigger scores first (2048, luck)
    Highest,
    /// Smaller scores first; the timer stores its error in milliseconds
    Lowest,
    /// Prize rank 1 first through 5, then entries without a prize (score 0)
    Prize,
}

impl RankOrder {
    /// `lotto` and its daily boards (`lotto-<yyyymmdd>`) rank by prize.
    pub fn for_game(game: &str) -> Self {
        if game == game_names::TIMER {
            RankOrder::Lowest
        } else if game == game_names::LOTTO || game.starts_with("lotto-") {
            RankOrder::Prize
        } else {
            RankOrder::Highest
        }
    }

    pub fn sort(self, scores: &mut [ScoreEntry]) {
        match self {
            RankOrder::Highest => scores.sort_by_key(|e| Reverse(e.score)),
            RankOrder::Lowest => scores.sort_by_key(|e| e.score),
            RankOrder::Prize => scores.sort_by_key(|e| match e.score {
                0 => u64::MAX,
                rank => rank,
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    InvalidGame(#[from] ValidationError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode scores: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct ScoreStore {
    dir: PathBuf,
    max_stored: usize,
    lock: Mutex<()>,
}

impl ScoreStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_capacity(dir, MAX_STORED_SCORES)
    }

    /// Keep at most `max_stored` entries per game (at least one).
    pub fn with_capacity(dir: impl Into<PathBuf>, max_stored: usize) -> Self {
        Self {
            dir: dir.into(),
            max_stored: max_stored.max(1),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, game: &str) -> Result<PathBuf, StoreError> {
        let game = validate_game_name(game)?;
        Ok(self.dir.join(score_file_name(game)))
    }

    /// Top entries, best first.
    pub async fn top(&self, game: &str, limit: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        let path = self.path_for(game)?;
        let mut scores = {
            let _guard = self.lock.lock().await;
            read_scores(&path).await
        };
        RankOrder::for_game(game).sort(&mut scores);
        scores.truncate(limit);
        Ok(scores)
    }

    /// The public ranking view
    pub async fn ranking(&self, game: &str) -> Result<Vec<ScoreEntry>, StoreError> {
        self.top(game, RANKING_LIMIT).await
    }

    /// Append a validated score, keep the best `max_stored`, write back.
    pub async fn submit(&self, game: &str, score: ValidScore) -> Result<ScoreEntry, StoreError> {
        let path = self.path_for(game)?;
        let entry = score.into_entry(Utc::now());

        let _guard = self.lock.lock().await;
        let mut scores = read_scores(&path).await;
        scores.push(entry.clone());
        RankOrder::for_game(game).sort(&mut scores);
        scores.truncate(self.max_stored);

        let body = serde_json::to_vec_pretty(&scores)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), stored = scores.len(), "scores written");
        Ok(entry)
    }
}

async fn read_scores(path: &Path) -> Vec<ScoreEntry> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read scores");
            return Vec::new();
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(scores) => scores,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt score file, starting empty");
            Vec::new()
        }
    }
}
