//! Controller runtime driving the phase scheduler.
//!
//! The [`Controller`] owns the scheduler behind a mutex, fires
//! [`tick`](crate::phase::PhaseScheduler::tick) from a 1 Hz interval while
//! running, and relays every notification to the observer surfaces: the
//! stdout dashboard line, the JSONL event stream, and the metrics recorder.
//! The scheduler itself never sees the timer — stopping the controller
//! cancels the interval and the scheduler just stops receiving ticks.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::schema::ControllerConfig;
use crate::error::PretimedError;
use crate::observability::events::{Event, EventEmitter};
use crate::observability::metrics;
use crate::phase::scheduler::{Notification, PhaseScheduler};
use crate::phase::snapshot::Snapshot;
use crate::phase::table::{Direction, PhaseId, PhaseTable, SignalColor};

/// Cadence at which the scheduler is ticked.
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Options for constructing a [`Controller`].
pub struct ControllerOptions {
    /// Validated controller configuration.
    pub config: Arc<ControllerConfig>,
    /// Event emitter for structured events.
    pub event_emitter: EventEmitter,
    /// Stop automatically after this many ticks (`None` = run until cancelled).
    pub run_for: Option<u64>,
    /// Token for cooperative shutdown.
    pub cancel: CancellationToken,
}

/// Signal controller runtime.
///
/// Serializes every scheduler operation behind one mutex: the interval
/// tick and the signal-handler driven stop may run on different tasks,
/// and each operation reads-then-writes the countdown and phase as a
/// unit. No operation blocks or performs I/O while holding the lock.
pub struct Controller {
    scheduler: Mutex<PhaseScheduler>,
    event_emitter: EventEmitter,
    cycles: AtomicU64,
    run_for: Option<u64>,
    cancel: CancellationToken,
}

impl Controller {
    /// Creates a controller from the given options.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any phase duration is invalid.
    pub fn new(opts: ControllerOptions) -> Result<Self, PretimedError> {
        let table = PhaseTable::new(&opts.config.timings)?;

        Ok(Self {
            scheduler: Mutex::new(PhaseScheduler::new(table)),
            event_emitter: opts.event_emitter,
            cycles: AtomicU64::new(0),
            run_for: opts.run_for,
            cancel: opts.cancel,
        })
    }

    /// Runs the controller until cancelled (or until `run_for` ticks).
    ///
    /// Starts the cycle, then drives one scheduler tick per second. The
    /// first interval fire is one full period after start, so the opening
    /// phase dwells for its whole duration.
    pub async fn run(&self) {
        self.start();

        if self.run_for == Some(0) {
            self.stop("run duration elapsed");
            return;
        }

        let mut interval = tokio::time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut ticks: u64 = 0;

        loop {
            tokio::select! {
                () = self.cancel.cancelled() => {
                    self.stop("interrupted");
                    break;
                }
                _ = interval.tick() => {
                    self.tick();
                    ticks += 1;
                    if self.run_for.is_some_and(|limit| ticks >= limit) {
                        self.stop("run duration elapsed");
                        break;
                    }
                }
            }
        }
    }

    /// Starts the cycle (no-op when already running).
    pub fn start(&self) {
        let (notification, cycle_seconds) = {
            let mut scheduler = self.scheduler.lock().expect("scheduler lock poisoned");
            (scheduler.start(), scheduler.table().cycle_seconds())
        };

        let Some(notification) = notification else {
            debug!("start requested while already running");
            return;
        };

        self.event_emitter.emit(Event::ControllerStarted {
            timestamp: Utc::now(),
            cycle_seconds,
        });
        self.relay(notification);
    }

    /// Stops the cycle and turns every lamp inactive.
    pub fn stop(&self, reason: &str) {
        let (previous, notification) = {
            let mut scheduler = self.scheduler.lock().expect("scheduler lock poisoned");
            (scheduler.current_phase(), scheduler.stop())
        };

        info!(reason, "controller stopped");
        metrics::set_current_phase(None, previous);
        metrics::set_remaining_seconds(0);
        self.event_emitter.emit(Event::ControllerStopped {
            timestamp: Utc::now(),
            reason: reason.to_string(),
        });
        self.relay(notification);
    }

    /// Stops the cycle and rewinds it to the first phase.
    pub fn reset(&self) {
        let (previous, notification) = {
            let mut scheduler = self.scheduler.lock().expect("scheduler lock poisoned");
            (scheduler.current_phase(), scheduler.reset())
        };

        info!("controller reset");
        metrics::set_current_phase(None, previous);
        metrics::set_remaining_seconds(0);
        self.event_emitter
            .emit(Event::ControllerReset { timestamp: Utc::now() });
        self.relay(notification);
    }

    /// Read-only snapshot of the observable state.
    ///
    /// # Panics
    ///
    /// Panics if the scheduler mutex is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.scheduler
            .lock()
            .expect("scheduler lock poisoned")
            .snapshot()
    }

    /// Number of full cycles completed since start.
    #[must_use]
    pub fn cycles_completed(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// Advances the scheduler by one second and relays the outcome.
    fn tick(&self) {
        let notification = {
            let mut scheduler = self.scheduler.lock().expect("scheduler lock poisoned");
            scheduler.tick()
        };

        if let Some(notification) = notification {
            self.relay(notification);
        }
    }

    /// Relays one scheduler notification to every observer surface.
    fn relay(&self, notification: Notification) {
        let timestamp = Utc::now();
        match notification {
            Notification::PhaseChanged {
                from,
                phase,
                remaining_seconds,
            } => {
                info!(phase = phase.key(), duration = remaining_seconds, "phase entered");
                metrics::record_phase_transition(from, phase);
                metrics::set_current_phase(Some(phase), from);
                metrics::set_remaining_seconds(remaining_seconds);
                self.event_emitter.emit(Event::PhaseEntered {
                    timestamp,
                    phase,
                    duration_seconds: remaining_seconds,
                });

                // Wrapping back to the first phase closes a cycle.
                if from.is_some() && phase == PhaseId::first() {
                    let cycles = self.cycles.fetch_add(1, Ordering::Relaxed) + 1;
                    metrics::record_cycle_completed();
                    self.event_emitter
                        .emit(Event::CycleCompleted { timestamp, cycles });
                }
            }
            Notification::Tick {
                phase,
                remaining_seconds,
            } => {
                debug!(phase = phase.key(), remaining = remaining_seconds, "tick");
                metrics::record_tick(phase);
                metrics::set_remaining_seconds(remaining_seconds);
                self.event_emitter.emit(Event::Tick {
                    timestamp,
                    phase,
                    remaining_seconds,
                });
            }
            Notification::Stopped => {}
        }

        self.render();
    }

    /// Writes the dashboard line for the current state to stdout.
    fn render(&self) {
        println!("{}", dashboard_line(&self.snapshot()));
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("snapshot", &self.snapshot())
            .field("cycles", &self.cycles_completed())
            .finish_non_exhaustive()
    }
}

/// Formats one dashboard line: six lamps, phase label, countdown.
///
/// ```text
/// NS [R--] EW [--G]  NS red / EW green  17 s
/// ```
#[must_use]
pub fn dashboard_line(snapshot: &Snapshot) -> String {
    let mut line = String::new();
    for direction in Direction::ALL {
        line.push_str(direction.label());
        line.push_str(" [");
        for color in SignalColor::ALL {
            if snapshot.lamp_is_lit(direction, color) {
                line.push(match color {
                    SignalColor::Red => 'R',
                    SignalColor::Yellow => 'Y',
                    SignalColor::Green => 'G',
                });
            } else {
                line.push('-');
            }
        }
        line.push_str("] ");
    }
    line.push_str(&format!(" {}  {}", snapshot.label(), snapshot.countdown()));
    line
}

// ============================================================================
// Tests
// ============================================================================
