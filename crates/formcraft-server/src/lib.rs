//! formcraft-server — the forms REST API.
//!
//! An axum router over a shared in-memory `FormRepository`. `serve` runs it on
//! a bound listener until the shutdown future resolves.

pub mod error;
pub mod routes;

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use formcraft_core::FormRepository;

pub use error::ApiError;
pub use routes::router;

/// Shared handler state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub repo: Arc<FormRepository>,
}

impl AppState {
    pub fn new(repo: Arc<FormRepository>) -> Self {
        Self { repo }
    }
}

/// Serve the API on `listener` until `shutdown` completes.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "forms API listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("forms API stopped");
    Ok(())
}
