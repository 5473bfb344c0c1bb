//! Per-run context shared by all screens: profile, reporter, seed.

use std::time::Duration;

use tracing::{info, warn};

use crate::core::SimpleRng;
use crate::scores::{
    LottoPlay, Profile, ProfileError, ProfileStore, RankingState, ScoreReporter, SubmitScore,
};

const FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

pub struct Session {
    profile: Profile,
    store: ProfileStore,
    reporter: Option<ScoreReporter>,
    seed: Option<u32>,
}

impl Session {
    /// Load the profile; a broken profile file is logged and replaced in memory.
    pub fn new(store: ProfileStore, reporter: Option<ScoreReporter>, seed: Option<u32>) -> Self {
        let profile = match store.load() {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "using a fresh profile");
                Profile::default()
            }
        };
        Self {
            profile,
            store,
            reporter,
            seed,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn nickname(&self) -> &str {
        &self.profile.nickname
    }

    pub fn set_nickname(&mut self, raw: &str) -> Result<(), ProfileError> {
        self.profile.set_nickname(raw)?;
        self.store.save(&self.profile)
    }

    pub fn best(&self, game: &str) -> u64 {
        self.profile.best(game)
    }

    /// Fixed seed if one was given, otherwise fresh entropy.
    pub fn rng(&self) -> SimpleRng {
        self.seed
            .map(SimpleRng::new)
            .unwrap_or_else(SimpleRng::from_entropy)
    }

    pub fn online(&self) -> bool {
        self.reporter.is_some()
    }

    /// Persist `score` as the best for `game` if it beats the stored one.
    pub fn record_best(&mut self, game: &str, score: u64) -> bool {
        let record = self.profile.record_best(game, score);
        if record {
            info!(game, score, "new personal best");
            self.save();
        }
        record
    }

    /// A submission carrying the current nickname
    pub fn submission(&self, score: u64) -> SubmitScore {
        SubmitScore::new(self.profile.nickname.clone(), score)
    }

    /// Send a score to the board in the background; a no-op offline.
    pub fn submit(&mut self, game: &str, submission: SubmitScore) {
        if let Some(reporter) = self.reporter.as_mut() {
            reporter.report(game, submission);
        }
    }

    /// Record a finished run locally and submit it. Returns true on a new best.
    pub fn finish(&mut self, game: &str, score: u64) -> bool {
        let record = self.record_best(game, score);
        let submission = self.submission(score);
        self.submit(game, submission);
        record
    }

    pub fn lotto_played(&self, day: u32) -> Option<&LottoPlay> {
        self.profile.lotto_played(day)
    }

    pub fn record_lotto_play(&mut self, play: LottoPlay) {
        self.profile.last_lotto = Some(play);
        self.save();
    }

    fn save(&self) {
        if let Err(e) = self.store.save(&self.profile) {
            warn!(error = %e, "failed to save profile");
        }
    }

    pub fn request_ranking(&mut self, game: &str) {
        if let Some(reporter) = self.reporter.as_mut() {
            reporter.request_ranking(game);
        }
    }

    /// Current ranking, or `None` when reporting is off.
    pub fn ranking(&mut self) -> Option<RankingState> {
        self.reporter.as_mut().map(|r| r.poll_ranking().clone())
    }

    /// Give in-flight submissions a moment before the runtime goes away.
    pub fn close(mut self) {
        if let Some(reporter) = self.reporter.as_mut() {
            if !reporter.flush(FLUSH_TIMEOUT) {
                warn!("pending score submissions were dropped");
            }
        }
    }
}
