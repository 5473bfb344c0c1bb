//! Score server binary.
//!
//! Configuration comes from `SCORES_HOST`, `PORT`, `SCORES_DATA_DIR` and
//! `SCORES_MAX_STORED`. The log filter is read from `RUST_LOG` (default `info`).

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use luck_arcade::scores::{run_server, shutdown_signal, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    if let Err(e) = run_server(config, None, shutdown_signal()).await {
        tracing::error!(error = %e, "score server exited");
        return Err(e);
    }
    Ok(())
}
