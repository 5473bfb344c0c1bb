//! Score service - ranking storage, HTTP API, and the game-side reporter
//!
//! # Components
//!
//! - [`protocol`]: JSON bodies and submission validation
//! - [`store`]: file-backed per-game rankings
//! - [`server`]: axum routes under `/api/scores`
//! - [`client`]: reqwest client for those routes
//! - [`reporter`]: sync facade the terminal loop uses to submit and fetch
//! - [`profile`]: local nickname, best scores and today's lotto ticket
//!
//! # Wire format
//!
//! ```text
//! GET  /api/scores/2048
//!   -> [{"nickname":"amy","score":20480,"maxTile":2048,"timestamp":"2026-10-19T09:00:00Z"}]
//!
//! POST /api/scores/2048   {"nickname":"amy","score":20480,"maxTile":2048}
//!   -> {"success":true,"message":"score saved"}
//!   -> 400 {"error":"a nickname is required"}
//! ```
//!
//! The bare `/api/scores` path serves the luck game and keeps its scores in
//! `scores.json`; every other game uses `scores-<game>.json`. The timer board
//! ranks the smallest error first and lotto boards rank by prize, one board
//! per day (`/api/scores/lotto-20261019`).

pub mod client;
pub mod profile;
pub mod protocol;
pub mod reporter;
pub mod server;
pub mod store;

pub use luck_arcade_types as types;

pub use client::{ClientError, ScoreClient};
pub use profile::{LottoPlay, Profile, ProfileError, ProfileStore};
pub use protocol::{daily_game_name, ScoreEntry, SubmitScore, ValidScore, ValidationError};
pub use reporter::{RankingState, ReporterConfig, ScoreReporter};
pub use server::{run_server, shutdown_signal, ServerConfig};
pub use store::{RankOrder, ScoreStore, StoreError};
