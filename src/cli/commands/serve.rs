//! `serve` command handler

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cli::commands::open_engine;
use crate::config::Settings;
use crate::error::RouletteError;
use crate::server;

/// Runs the HTTP service until `cancel` fires.
///
/// # Errors
///
/// Returns a server error if the metrics exporter or the listener cannot
/// be started, or if the accept loop fails.
pub async fn run(settings: &Settings, cancel: CancellationToken) -> Result<(), RouletteError> {
    if let Some(port) = settings.metrics_port {
        crate::observability::init_metrics(Some(port))?;
        tracing::info!(port, "Prometheus metrics endpoint started");
    }

    tracing::info!(
        data_dir = %settings.data_dir.display(),
        day_boundary = ?settings.day_boundary,
        chambers = settings.rules.chambers,
        "opening game documents"
    );
    let engine = Arc::new(open_engine(settings));

    let (listener, _bound) = server::bind(&settings.server.bind).await?;
    server::serve(listener, server::build_router(engine), cancel).await?;
    Ok(())
}
