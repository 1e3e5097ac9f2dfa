//! HTTP server wrapping the extraction pipeline.
//!
//! A thin axum layer: `/rss` runs the pipeline, `/health` and `/` are pure
//! metadata endpoints. Request logging comes from `tower-http`'s
//! `TraceLayer`.

pub mod handlers;
pub mod routes;
pub mod types;

use crate::config::ServerConfig;
use anyhow::{Context, Result};
use handlers::AppState;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Runs the HTTP server until ctrl-c.
///
/// The listening port is the only process-wide configuration; the reqwest
/// client is shared across requests (connection pooling), which is the only
/// other cross-request state.
pub async fn run(config: ServerConfig, client: reqwest::Client) -> Result<()> {
    let state = AppState { client };
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind HTTP server")?;

    info!("pagefeed listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutting down");
}
