//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod query;
pub mod serve;
pub mod version;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cli::args::{Cli, Commands};
use crate::config::{Settings, load_settings};
use crate::engine::{RouletteEngine, SystemClock};
use crate::error::RouletteError;
use crate::store::JsonFileStore;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if settings cannot be resolved or the command fails.
pub async fn dispatch(cli: Cli, cancel: CancellationToken) -> Result<(), RouletteError> {
    if let Commands::Version(args) = &cli.command {
        version::run(args);
        return Ok(());
    }

    let settings = load_settings(cli.config.as_deref(), &cli.overrides())?;
    tracing::debug!(?settings, "settings resolved");

    match cli.command {
        Commands::Serve(_) => serve::run(&settings, cancel).await,
        Commands::Record(args) => query::record(&settings, &args),
        Commands::Status(args) => query::status(&settings, &args),
        Commands::Version(_) => Ok(()),
    }
}

/// Builds an engine over the JSON documents in the configured data directory.
#[must_use]
pub fn open_engine(settings: &Settings) -> RouletteEngine {
    let store = Arc::new(JsonFileStore::new(settings.data_dir.clone()));
    RouletteEngine::new(store, settings.rules)
        .with_clock(Arc::new(SystemClock::new(settings.day_boundary)))
}
