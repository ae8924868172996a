// ============================================================
// Layer 1b — HTTP API (axum)
// ============================================================
// Three POST endpoints over one shared ServiceContext:
//
//   POST /upload   multipart `file` (CSV)  → { message, columns }
//   POST /train    no body                 → { accuracy, f1_score }
//   POST /predict  { Temperature, Run_Time } → { Downtime, Confidence }
//
// Handlers are thin: extract, call the context, serialise.
// All state and locking lives in application::context.
//
// Reference: axum documentation (Router, State, Multipart)

pub mod error;
pub mod handlers;

use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;

use crate::application::context::ServiceContext;

/// Largest accepted request body; uploads are whole CSV files
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

pub fn router(ctx: Arc<ServiceContext>) -> Router {
    Router::new()
        .route("/upload", post(handlers::upload))
        .route("/train", post(handlers::train))
        .route("/predict", post(handlers::predict))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(ctx)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(ctx: Arc<ServiceContext>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind {addr}"))?;

    tracing::info!(
        "Listening on http://{} (model artifact: '{}')",
        listener.local_addr()?,
        ctx.config().artifact_path.display()
    );

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
