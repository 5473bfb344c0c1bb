//! HTTP client for the score server.

use std::time::Duration;

use thiserror::Error;

use crate::protocol::{validate_game_name, ErrorResponse, ScoreEntry, SubmitScore, ValidationError};
use crate::types::game_names;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error(transparent)]
    InvalidGame(#[from] ValidationError),
}

#[derive(Debug, Clone)]
pub struct ScoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScoreClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint for `game`; the luck game lives on the bare path.
    pub fn scores_url(&self, game: &str) -> Result<String, ClientError> {
        let game = validate_game_name(game)?;
        Ok(if game == game_names::LUCK {
            format!("{}/api/scores", self.base_url)
        } else {
            format!("{}/api/scores/{}", self.base_url, game)
        })
    }

    pub async fn submit(&self, game: &str, score: &SubmitScore) -> Result<(), ClientError> {
        let url = self.scores_url(game)?;
        let resp = self.http.post(url).json(score).send().await?;
        check_status(resp).await?;
        Ok(())
    }

    pub async fn top(&self, game: &str) -> Result<Vec<ScoreEntry>, ClientError> {
        let url = self.scores_url(game)?;
        let resp = self.http.get(url).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = match resp.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}
