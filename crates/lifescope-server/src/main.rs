mod api;
mod cli;
mod config;
mod logging;
mod store;
#[cfg(test)]
mod test_utils;

use crate::api::{build_router, AppState};
use crate::cli::Args;
use crate::config::resolve_config;
use crate::logging::init_tracing;
use crate::store::AssessmentStore;
use anyhow::Context;
use axum::Router;
use clap::Parser;
use risk_engine::RiskScorer;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log_guard = init_tracing(args.log_dir.as_deref(), args.log_to_stderr)?;

    let config = resolve_config(&args)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir,
        history_limit = config.history_limit,
        "lifescope starting"
    );

    let data_dir = config.data_dir();
    let store = AssessmentStore::open(&data_dir)
        .with_context(|| format!("failed to open store {}", data_dir.display()))?;
    let state = AppState {
        scorer: RiskScorer::default(),
        store: Arc::new(store),
        history_limit: config.history_limit,
    };
    let app = build_router(state, &config.cors);

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(addr = %config.listen_addr, "lifescope listening");
    serve_until(listener, app, wait_for_shutdown()).await?;
    info!("lifescope shutting down");
    Ok(())
}

async fn serve_until<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")
}

async fn wait_for_shutdown() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
