//! Local player profile: nickname, best score per game and today's lotto play.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::clean_nickname;
use crate::types::DEFAULT_NICKNAME;

const DEFAULT_PROFILE_PATH: &str = "luck-arcade-profile.json";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to access profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("profile {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode profile: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("nickname must not be blank")]
    InvalidNickname,
}

/// The one lotto ticket a nickname may play on a given day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LottoPlay {
    /// `yyyymmdd`
    pub day: u32,
    pub nickname: String,
    pub numbers: Vec<u8>,
    /// Prize rank 1-5, 0 without a prize
    pub rank: u8,
    pub matches: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub nickname: String,
    #[serde(default)]
    pub best_scores: BTreeMap<String, u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_lotto: Option<LottoPlay>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            nickname: DEFAULT_NICKNAME.to_string(),
            best_scores: BTreeMap::new(),
            last_lotto: None,
        }
    }
}

impl Profile {
    pub fn set_nickname(&mut self, raw: &str) -> Result<(), ProfileError> {
        self.nickname = clean_nickname(raw).ok_or(ProfileError::InvalidNickname)?;
        Ok(())
    }

    pub fn best(&self, game: &str) -> u64 {
        self.best_scores.get(game).copied().unwrap_or(0)
    }

    /// Raise the stored best. Returns true if `score` is a new record.
    pub fn record_best(&mut self, game: &str, score: u64) -> bool {
        if score <= self.best(game) {
            return false;
        }
        self.best_scores.insert(game.to_string(), score);
        true
    }

    /// The current nickname's ticket for `day`, if it already played.
    pub fn lotto_played(&self, day: u32) -> Option<&LottoPlay> {
        self.last_lotto
            .as_ref()
            .filter(|p| p.day == day && p.nickname == self.nickname)
    }
}

/// Where the profile lives on disk
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `LUCK_ARCADE_PROFILE`, or a file in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var("LUCK_ARCADE_PROFILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file yields the default profile.
    pub fn load(&self) -> Result<Profile, ProfileError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Profile::default()),
            Err(source) => {
                return Err(ProfileError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| ProfileError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, profile: &Profile) -> Result<(), ProfileError> {
        let body = serde_json::to_vec_pretty(profile)?;
        std::fs::write(&self.path, body).map_err(|source| ProfileError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("profile.json"));
        let profile = store.load().unwrap();
        assert_eq!(profile.nickname, DEFAULT_NICKNAME);
        assert_eq!(profile.best("2048"), 0);
    }

    #[test]
    fn test_record_best_only_raises() {
        let mut p = Profile::default();
        assert!(p.record_best("2048", 100));
        assert!(!p.record_best("2048", 50));
        assert!(!p.record_best("2048", 100));
        assert!(p.record_best("2048", 120));
        assert_eq!(p.best("2048"), 120);
        assert_eq!(p.best("luck"), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("profile.json"));
        let mut p = Profile::default();
        p.set_nickname("  amy  ").unwrap();
        p.record_best("luck", 7);
        store.save(&p).unwrap();

        assert_eq!(store.load().unwrap(), p);
    }

    #[test]
    fn test_lotto_play_is_per_day_and_nickname() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("profile.json"));
        let mut p = Profile::default();
        p.set_nickname("amy").unwrap();
        p.last_lotto = Some(LottoPlay {
            day: 20261019,
            nickname: "amy".to_string(),
            numbers: vec![1, 2, 3, 4, 5, 6],
            rank: 3,
            matches: 5,
        });
        store.save(&p).unwrap();

        let p = store.load().unwrap();
        assert_eq!(p.lotto_played(20261019).map(|play| play.rank), Some(3));
        assert!(p.lotto_played(20261020).is_none());

        let mut other = p.clone();
        other.set_nickname("bob").unwrap();
        assert!(other.lotto_played(20261019).is_none());
    }

    #[test]
    fn test_profile_without_lotto_field_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, br#"{"nickname":"amy","best_scores":{"2048":512}}"#).unwrap();
        let p = ProfileStore::new(&path).load().unwrap();
        assert_eq!(p.best("2048"), 512);
        assert_eq!(p.last_lotto, None);
    }

    #[test]
    fn test_blank_nickname_rejected() {
        let mut p = Profile::default();
        assert!(matches!(p.set_nickname("   "), Err(ProfileError::InvalidNickname)));
        assert_eq!(p.nickname, DEFAULT_NICKNAME);
    }

    #[test]
    fn test_corrupt_profile_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, b"[1, 2").unwrap();
        let err = ProfileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ProfileError::Parse { .. }));
    }
}
