//! HTTP score server (axum).
//!
//! Routes:
//!
//! - `GET  /api/scores`, `GET  /api/scores/:game`: top 10, best first
//! - `POST /api/scores`, `POST /api/scores/:game`: submit `{nickname, score, maxTile?}`
//!
//! The bare `/api/scores` routes serve the luck game. Anything else is a JSON 404.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use crate::protocol::{ErrorResponse, ScoreEntry, SubmitResponse, SubmitScore, ValidationError};
use crate::store::{ScoreStore, StoreError};
use crate::types::{game_names, MAX_STORED_SCORES};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub max_stored: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            data_dir: PathBuf::from("."),
            max_stored: MAX_STORED_SCORES,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("SCORES_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let data_dir = env::var("SCORES_DATA_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let max_stored = env::var("SCORES_MAX_STORED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_stored);

        Self {
            host,
            port,
            data_dir,
            max_stored,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid host/port combination {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    store: Arc<ScoreStore>,
}

impl AppState {
    pub fn new(store: ScoreStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &ScoreStore {
        &self.store
    }
}

/// Error half of every handler
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidGame(v) => v.into(),
            other => {
                error!(error = %other, "score store failure");
                ApiError::Internal("failed to save score".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(format!("invalid request: {}", e.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => msg,
            ApiError::NotFound => "not found".to_string(),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/scores", get(list_default).post(submit_default))
        .route("/api/scores/:game", get(list_game).post(submit_game))
        .fallback(not_found)
        .with_state(state)
}

async fn list_default(State(state): State<AppState>) -> Result<Json<Vec<ScoreEntry>>, ApiError> {
    Ok(Json(state.store.ranking(game_names::LUCK).await?))
}

async fn list_game(
    State(state): State<AppState>,
    Path(game): Path<String>,
) -> Result<Json<Vec<ScoreEntry>>, ApiError> {
    Ok(Json(state.store.ranking(&game).await?))
}

async fn submit_default(
    State(state): State<AppState>,
    payload: Result<Json<SubmitScore>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    submit(&state, game_names::LUCK, payload).await
}

async fn submit_game(
    State(state): State<AppState>,
    Path(game): Path<String>,
    payload: Result<Json<SubmitScore>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    submit(&state, &game, payload).await
}

async fn submit(
    state: &AppState,
    game: &str,
    payload: Result<Json<SubmitScore>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(body) = payload?;
    let valid = body.validate()?;
    let entry = state.store.submit(game, valid).await?;
    info!(game = %game, nickname = %entry.nickname, score = entry.score, "score saved");
    Ok(Json(SubmitResponse::saved()))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Bind, serve until `shutdown` resolves.
///
/// The bound address (useful with port 0) is sent on `ready_tx` once listening.
pub async fn run_server<F>(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr()?;
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
            return Err(anyhow!(
                "port {} is already in use; stop the other program or set PORT",
                config.port
            ));
        }
        Err(e) => return Err(anyhow::Error::new(e).context(format!("failed to bind {}", addr))),
    };
    let bound = listener.local_addr()?;
    info!(addr = %bound, data_dir = %config.data_dir.display(), "score server listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = AppState::new(ScoreStore::with_capacity(config.data_dir, config.max_stored));
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("score server failed")?;
    info!("score server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_stored, MAX_STORED_SCORES);
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_server_config_from_env() {
        // Only checks that missing or odd variables never panic.
        let _config = ServerConfig::from_env();
    }

    #[test]
    fn test_bad_host_is_an_error() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            ApiError::from(ValidationError::MissingNickname).status(),
            StatusCode::BAD_REQUEST
        );
        let write = StoreError::Write {
            path: PathBuf::from("x"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(ApiError::from(write).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(StoreError::InvalidGame(ValidationError::InvalidGame("X".into()))).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
