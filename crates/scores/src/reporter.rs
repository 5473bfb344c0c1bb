//! Score reporter - bridges the sync game loop with the async score client.
//!
//! The reporter owns its own tokio runtime. Submissions are fire-and-forget;
//! ranking fetches come back over a channel that the loop polls each frame.
//! Network failures are logged and never reach game state.

use std::time::Duration;

use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::ScoreClient;
use crate::protocol::{ScoreEntry, SubmitScore};

/// Reporter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    pub base_url: String,
    pub disabled: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            disabled: false,
        }
    }
}

impl ReporterConfig {
    pub fn from_env() -> Self {
        use std::env;

        let base_url = env::var("SCORES_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::default().base_url);
        let disabled = env::var("SCORES_DISABLED")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Self { base_url, disabled }
    }
}

fn is_truthy(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// What the renderer shows in the ranking panel
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RankingState {
    #[default]
    Loading,
    Ready(Vec<ScoreEntry>),
    Unavailable,
}

/// Running reporter instance.
pub struct ScoreReporter {
    rt: Runtime,
    client: ScoreClient,
    ranking_tx: mpsc::UnboundedSender<(u64, RankingState)>,
    ranking_rx: mpsc::UnboundedReceiver<(u64, RankingState)>,
    request_id: u64,
    ranking: RankingState,
    pending: Vec<JoinHandle<()>>,
}

impl ScoreReporter {
    pub fn start(config: &ReporterConfig) -> anyhow::Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let client = ScoreClient::new(config.base_url.clone()).context("failed to build HTTP client")?;
        let (ranking_tx, ranking_rx) = mpsc::unbounded_channel();
        Ok(Self {
            rt,
            client,
            ranking_tx,
            ranking_rx,
            request_id: 0,
            ranking: RankingState::Loading,
            pending: Vec::new(),
        })
    }

    /// Start the reporter from environment variables.
    ///
    /// Returns None if `SCORES_DISABLED` is set or startup fails.
    pub fn start_from_env() -> Option<Self> {
        let config = ReporterConfig::from_env();
        if config.disabled {
            info!("score reporting disabled via SCORES_DISABLED");
            return None;
        }
        match Self::start(&config) {
            Ok(r) => Some(r),
            Err(e) => {
                warn!(error = %e, "score reporter unavailable");
                None
            }
        }
    }

    /// Submit in the background.
    pub fn report(&mut self, game: &str, score: SubmitScore) {
        let client = self.client.clone();
        let game = game.to_string();
        self.pending.retain(|h| !h.is_finished());
        let handle = self.rt.spawn(async move {
            match client.submit(&game, &score).await {
                Ok(()) => info!(game = %game, score = score.score, "score submitted"),
                Err(e) => warn!(game = %game, error = %e, "score submission failed"),
            }
        });
        self.pending.push(handle);
    }

    /// Fetch the ranking in the background; the state turns `Loading`.
    ///
    /// Results of older requests are dropped once a newer one is made.
    pub fn request_ranking(&mut self, game: &str) {
        self.request_id += 1;
        self.ranking = RankingState::Loading;

        let id = self.request_id;
        let client = self.client.clone();
        let tx = self.ranking_tx.clone();
        let game = game.to_string();
        self.rt.spawn(async move {
            let state = match client.top(&game).await {
                Ok(entries) => RankingState::Ready(entries),
                Err(e) => {
                    warn!(game = %game, error = %e, "ranking fetch failed");
                    RankingState::Unavailable
                }
            };
            let _ = tx.send((id, state));
        });
    }

    /// Drain finished fetches and return the current state.
    pub fn poll_ranking(&mut self) -> &RankingState {
        while let Ok((id, state)) = self.ranking_rx.try_recv() {
            if id == self.request_id {
                self.ranking = state;
            } else {
                debug!(id, latest = self.request_id, "stale ranking dropped");
            }
        }
        &self.ranking
    }

    /// Wait up to `timeout` for in-flight submissions. Returns false on timeout.
    pub fn flush(&mut self, timeout: Duration) -> bool {
        let pending = std::mem::take(&mut self.pending);
        self.rt
            .block_on(async {
                tokio::time::timeout(timeout, async {
                    for handle in pending {
                        let _ = handle.await;
                    }
                })
                .await
            })
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" TRUE "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn test_unreachable_server_becomes_unavailable() {
        // Port 9 on loopback is the discard service and is normally closed.
        let config = ReporterConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            disabled: false,
        };
        let mut reporter = ScoreReporter::start(&config).unwrap();
        reporter.request_ranking("luck");
        assert_eq!(reporter.ranking, RankingState::Loading);

        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        while reporter.poll_ranking() == &RankingState::Loading {
            assert!(std::time::Instant::now() < deadline, "ranking never resolved");
            std::thread::sleep(Duration::from_millis(20));
        }
        assert_eq!(reporter.poll_ranking(), &RankingState::Unavailable);
    }
}
