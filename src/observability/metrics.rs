//! Metrics collection for `pretimed`.
//!
//! Prometheus-compatible metrics with typed convenience functions for
//! recording measurements. Every label value comes from the closed
//! [`PhaseId`] enum, so label cardinality is bounded by construction.

use std::sync::atomic::{AtomicBool, Ordering};

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::error::PretimedError;
use crate::phase::table::PhaseId;

/// Guard to prevent double-initialization of the metrics recorder.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initializes the global metrics recorder.
///
/// When `port` is `Some`, a Prometheus HTTP listener is started on
/// `127.0.0.1:<port>`. When `None`, the recorder is installed without
/// an HTTP endpoint (metrics are recorded internally and can be read
/// programmatically).
///
/// # Errors
///
/// Returns `PretimedError::Io` if the recorder or HTTP listener
/// cannot be installed (e.g. port already in use).
pub fn init_metrics(port: Option<u16>) -> Result<(), PretimedError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }
    port.map_or_else(
        || PrometheusBuilder::new().install_recorder().map(|_| ()),
        |p| {
            PrometheusBuilder::new()
                .with_http_listener(([127, 0, 0, 1], p))
                .install()
        },
    )
    .map_err(|e| PretimedError::Io(std::io::Error::other(e.to_string())))?;

    describe_metrics();
    Ok(())
}

/// Registers metric descriptions with the global recorder.
fn describe_metrics() {
    describe_counter!("pretimed_ticks_total", "Total number of scheduler ticks");
    describe_counter!(
        "pretimed_phase_transitions_total",
        "Total number of phase transitions"
    );
    describe_counter!(
        "pretimed_cycles_total",
        "Total number of completed signal cycles"
    );
    describe_gauge!(
        "pretimed_current_phase",
        "Currently active phase (1 = active)"
    );
    describe_gauge!(
        "pretimed_remaining_seconds",
        "Seconds left in the current phase"
    );
}

/// Records one scheduler tick.
pub fn record_tick(phase: PhaseId) {
    counter!("pretimed_ticks_total", "phase" => phase.key()).increment(1);
}

/// Records a phase transition.
pub fn record_phase_transition(from: Option<PhaseId>, to: PhaseId) {
    counter!(
        "pretimed_phase_transitions_total",
        "from" => from.map_or("none", PhaseId::key),
        "to" => to.key(),
    )
    .increment(1);
}

/// Records a completed signal cycle.
pub fn record_cycle_completed() {
    counter!("pretimed_cycles_total").increment(1);
}

/// Sets the currently active phase gauge.
///
/// Zeros out the previous phase label (if any) before setting the new one,
/// preventing stale labels from showing `1.0` in Prometheus.
pub fn set_current_phase(phase: Option<PhaseId>, previous: Option<PhaseId>) {
    if let Some(prev) = previous {
        gauge!("pretimed_current_phase", "phase" => prev.key()).set(0.0);
    }
    if let Some(current) = phase {
        gauge!("pretimed_current_phase", "phase" => current.key()).set(1.0);
    }
}

/// Sets the remaining-seconds gauge.
pub fn set_remaining_seconds(remaining: u32) {
    gauge!("pretimed_remaining_seconds").set(f64::from(remaining));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_functions_do_not_panic_without_recorder() {
        // metrics macros silently no-op when no global recorder is installed
        record_tick(PhaseId::NsRedEwGreen);
        record_phase_transition(None, PhaseId::NsRedEwGreen);
        record_phase_transition(Some(PhaseId::NsRedEwGreen), PhaseId::NsRedEwYellow);
        record_cycle_completed();
        set_current_phase(Some(PhaseId::NsGreenEwRed), Some(PhaseId::NsRedEwYellow));
        set_current_phase(None, Some(PhaseId::NsGreenEwRed));
        set_remaining_seconds(17);
    }
}
