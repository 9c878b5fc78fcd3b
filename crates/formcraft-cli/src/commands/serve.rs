//! The `formcraft serve` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

use formcraft_core::FormRepository;
use formcraft_server::AppState;

pub async fn execute(host: Option<String>, port: Option<u16>, config: Option<PathBuf>) -> Result<()> {
    let mut config = formcraft_core::config::load_config_from(config.as_deref())?.server;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    println!("Serving forms API on http://{}", listener.local_addr()?);

    let state = AppState::new(Arc::new(FormRepository::new()));
    formcraft_server::serve(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => warn!(error = %e, "failed to listen for ctrl-c"),
    }
}
