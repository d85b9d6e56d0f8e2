//! Run command handler
//!
//! Loads (or defaults) the timing configuration, wires up observability,
//! and drives the controller until cancelled.

use tokio_util::sync::CancellationToken;

use crate::cli::args::RunArgs;
use crate::config::loader::{ConfigLoader, LoaderOptions};
use crate::config::schema::ControllerConfig;
use crate::controller::{Controller, ControllerOptions};
use crate::error::PretimedError;
use crate::observability::events::EventEmitter;

/// Start the signal controller.
///
/// # Errors
///
/// Returns a configuration error if the timing file is invalid, or an I/O
/// error if the events file or metrics listener cannot be set up.
pub async fn run(
    args: &RunArgs,
    quiet: bool,
    cancel: CancellationToken,
) -> Result<(), PretimedError> {
    if let Some(port) = args.metrics_port {
        crate::observability::init_metrics(Some(port))?;
        tracing::info!(port, "Prometheus metrics endpoint started");
    }

    let config = if let Some(ref path) = args.config {
        tracing::info!(config = %path.display(), "loading timing configuration");
        let loader = ConfigLoader::new(LoaderOptions::default());
        let load_result = loader.load(path)?;

        for warning in &load_result.warnings {
            tracing::warn!(
                location = warning.location.as_deref().unwrap_or("<unknown>"),
                "{}",
                warning.message
            );
        }

        load_result.config
    } else {
        tracing::info!("no timing file given, using stock 20/5/20/5 timings");
        std::sync::Arc::new(ControllerConfig::default())
    };

    let event_emitter = if let Some(ref path) = args.events_file {
        EventEmitter::from_file(path)?
    } else if quiet {
        EventEmitter::noop()
    } else {
        EventEmitter::stderr()
    };

    let controller = Controller::new(ControllerOptions {
        config,
        event_emitter,
        run_for: args.for_seconds,
        cancel,
    })?;

    controller.run().await;
    Ok(())
}
