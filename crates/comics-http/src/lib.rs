//! comics-http - HTTP API for the comics catalog.
//!
//! Routes:
//!
//! ```text
//! GET    /comics?ciudad=      list, optionally filtered by city
//! GET    /comics/{id}         one record
//! POST   /comics              create (fail-fast validation)
//! PUT    /comics/updateGlobal back-fill updated_at
//! PUT    /comics/{id}         merge update (collect-all validation)
//! DELETE /comics/{id}         delete
//! GET    /generate-pdf        PDF report
//! ```

mod access_log;
mod error;
mod handlers;
mod router;
mod state;

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{info, warn};

pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;

/// Bind `addr` and serve the API until ctrl-c.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    let app = create_router(state);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully...");
}
