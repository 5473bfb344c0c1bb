//! Protocol module - JSON bodies of the score API
//!
//! Field names on the wire are camelCase (`maxTile`, `timeDiff`,
//! `matchCount`); the stored file uses the same shape as the responses. The
//! optional fields belong to one game each: `maxTile` to 2048, `timeDiff` to
//! the timer and `numbers`/`matchCount` to the lotto.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{game_names, MAX_NICKNAME_CHARS};

/// Lotto numbers run from 1 to this value
const MAX_LOTTO_NUMBER: u8 = 45;
/// Picks on one lotto ticket
const LOTTO_PICKS: usize = 6;

/// Longest accepted game name
pub const MAX_GAME_NAME_LEN: usize = 32;

/// One stored ranking row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub nickname: String,
    pub score: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tile: Option<u32>,
    /// Signed seconds off the timer target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_diff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbers: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_count: Option<u8>,
    pub timestamp: DateTime<Utc>,
}

/// POST body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScore {
    #[serde(default)]
    pub nickname: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tile: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_diff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbers: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_count: Option<u8>,
}

impl SubmitScore {
    pub fn new(nickname: impl Into<String>, score: u64) -> Self {
        Self {
            nickname: nickname.into(),
            score: score as f64,
            max_tile: None,
            time_diff: None,
            numbers: None,
            match_count: None,
        }
    }

    pub fn with_max_tile(mut self, max_tile: u32) -> Self {
        self.max_tile = Some(max_tile);
        self
    }

    pub fn with_time_diff(mut self, diff_secs: f64) -> Self {
        self.time_diff = Some(diff_secs);
        self
    }

    /// Attach the lotto ticket and how many of its numbers were drawn.
    pub fn with_ticket(mut self, numbers: &[u8], match_count: u8) -> Self {
        self.numbers = Some(numbers.to_vec());
        self.match_count = Some(match_count);
        self
    }

    /// Check and normalise the submission.
    pub fn validate(&self) -> Result<ValidScore, ValidationError> {
        if !self.score.is_finite() || self.score < 0.0 {
            return Err(ValidationError::InvalidScore);
        }
        if self.time_diff.is_some_and(|d| !d.is_finite()) {
            return Err(ValidationError::InvalidScore);
        }
        if let Some(numbers) = &self.numbers {
            let in_range = numbers.iter().all(|n| (1..=MAX_LOTTO_NUMBER).contains(n));
            if numbers.len() > LOTTO_PICKS || !in_range {
                return Err(ValidationError::InvalidTicket);
            }
        }
        let nickname = clean_nickname(&self.nickname).ok_or(ValidationError::MissingNickname)?;
        Ok(ValidScore {
            nickname,
            score: self.score.floor() as u64,
            max_tile: self.max_tile,
            time_diff: self.time_diff,
            numbers: self.numbers.clone(),
            match_count: self.match_count,
        })
    }
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidScore {
    pub nickname: String,
    pub score: u64,
    pub max_tile: Option<u32>,
    pub time_diff: Option<f64>,
    pub numbers: Option<Vec<u8>>,
    pub match_count: Option<u8>,
}

impl ValidScore {
    pub fn into_entry(self, timestamp: DateTime<Utc>) -> ScoreEntry {
        ScoreEntry {
            nickname: self.nickname,
            score: self.score,
            max_tile: self.max_tile,
            time_diff: self.time_diff,
            numbers: self.numbers,
            match_count: self.match_count,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a nickname is required")]
    MissingNickname,
    #[error("score must be a non-negative number")]
    InvalidScore,
    #[error("lotto numbers must be at most 6 picks from 1 to 45")]
    InvalidTicket,
    #[error("unknown game: {0}")]
    InvalidGame(String),
}

/// `{ "success": true, "message": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}

impl SubmitResponse {
    pub fn saved() -> Self {
        Self {
            success: true,
            message: "score saved".to_string(),
        }
    }
}

/// `{ "error": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Trim, cut to the nickname limit, reject blanks.
pub fn clean_nickname(raw: &str) -> Option<String> {
    let cleaned: String = raw.trim().chars().take(MAX_NICKNAME_CHARS).collect();
    if cleaned.trim().is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// 1 to 32 characters of `[a-z0-9-]`
pub fn validate_game_name(game: &str) -> Result<&str, ValidationError> {
    let ok = !game.is_empty()
        && game.len() <= MAX_GAME_NAME_LEN
        && game
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if ok {
        Ok(game)
    } else {
        Err(ValidationError::InvalidGame(game.to_string()))
    }
}

/// File holding a game's scores. The luck game keeps the historical name.
pub fn score_file_name(game: &str) -> String {
    if game == game_names::LUCK {
        "scores.json".to_string()
    } else {
        format!("scores-{}.json", game)
    }
}

/// Board name for one day of a daily game, e.g. `lotto-20261019`
pub fn daily_game_name(game: &str, day: u32) -> String {
    format!("{}-{}", game, day)
}
