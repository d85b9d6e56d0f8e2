//! Phase scheduler state machine.
//!
//! The [`PhaseScheduler`] owns the current phase, the countdown, and the
//! running flag, and advances through the cycle one second at a time. It
//! holds no timer handle, no callback, and no display reference — an
//! external owner drives [`tick`](PhaseScheduler::tick) at a 1 Hz cadence
//! while the scheduler reports running, and pulls a
//! [`Snapshot`](super::snapshot::Snapshot) after every operation.
//!
//! All operations are total: once a [`PhaseTable`] has been constructed,
//! nothing in here can fail.

use super::snapshot::Snapshot;
use super::table::{PhaseId, PhaseTable};

// ============================================================================
// Notifications
// ============================================================================

/// Outcome of a scheduler operation, for the owner to relay to observers.
///
/// A single operation produces at most one notification: a rollover tick
/// yields exactly one `PhaseChanged`, never a `Tick` followed by a
/// `PhaseChanged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// A new phase is now showing (on start, or on countdown expiry).
    PhaseChanged {
        /// The phase that was showing before, if any (`None` on start).
        from: Option<PhaseId>,
        /// The phase now showing.
        phase: PhaseId,
        /// Full dwell duration the countdown was re-armed to.
        remaining_seconds: u32,
    },

    /// The countdown decremented without a phase change.
    Tick {
        /// The phase still showing.
        phase: PhaseId,
        /// Seconds left in the current phase.
        remaining_seconds: u32,
    },

    /// The scheduler stopped; every lamp is now inactive.
    Stopped,
}

// ============================================================================
// Scheduler
// ============================================================================

/// Fixed-cycle phase scheduler.
///
/// State machine over `{STOPPED, RUNNING}` with a one-second countdown
/// while running. The cycle cursor survives a stop, so a plain
/// stop/start resumes the sequence at the phase after the one that was
/// showing; only [`reset`](Self::reset) rewinds it to the first phase.
#[derive(Debug, Clone)]
pub struct PhaseScheduler {
    table: PhaseTable,
    running: bool,
    current: Option<PhaseId>,
    remaining_seconds: u32,
    /// The phase the next start or rollover will show.
    cursor: PhaseId,
}

impl PhaseScheduler {
    /// Creates a stopped scheduler positioned at the start of the cycle.
    #[must_use]
    pub const fn new(table: PhaseTable) -> Self {
        Self {
            table,
            running: false,
            current: None,
            remaining_seconds: 0,
            cursor: PhaseId::first(),
        }
    }

    /// Whether the scheduler is currently running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// The phase currently showing, if running.
    #[must_use]
    pub const fn current_phase(&self) -> Option<PhaseId> {
        self.current
    }

    /// The timing table this scheduler runs on.
    #[must_use]
    pub const fn table(&self) -> &PhaseTable {
        &self.table
    }

    /// Starts the cycle from the cursor position.
    ///
    /// No-op (returns `None`) when already running — in particular the
    /// countdown is not re-armed. When stopped, transitions to running,
    /// shows the cursor phase with its full duration, and advances the
    /// cursor past it.
    pub fn start(&mut self) -> Option<Notification> {
        if self.running {
            return None;
        }

        let phase = self.cursor;
        self.running = true;
        self.current = Some(phase);
        self.cursor = phase.next();
        self.remaining_seconds = self.table.duration_of(phase);

        Some(Notification::PhaseChanged {
            from: None,
            phase,
            remaining_seconds: self.remaining_seconds,
        })
    }

    /// Stops the cycle unconditionally.
    ///
    /// Idempotent: the observable state after one stop equals the state
    /// after two. The cycle cursor is left untouched, so a later start
    /// resumes at the phase after the one that was showing.
    pub fn stop(&mut self) -> Notification {
        self.running = false;
        self.current = None;
        self.remaining_seconds = 0;
        Notification::Stopped
    }

    /// Stops the cycle and rewinds the cursor to the first phase.
    ///
    /// The next start always begins at [`PhaseId::first`] with its full
    /// duration, regardless of where the cycle was. Idempotent.
    pub fn reset(&mut self) -> Notification {
        let notification = self.stop();
        self.cursor = PhaseId::first();
        notification
    }

    /// Advances the countdown by one second.
    ///
    /// No-op (returns `None`) when stopped. While running, decrements the
    /// countdown; on expiry the next phase is shown and the countdown
    /// re-armed within the same call, so no snapshot ever observes a zero
    /// or negative countdown on a running scheduler.
    pub fn tick(&mut self) -> Option<Notification> {
        if !self.running {
            return None;
        }
        let phase = self.current?;

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return Some(Notification::Tick {
                phase,
                remaining_seconds: self.remaining_seconds,
            });
        }

        // Countdown expired: roll over to the cursor phase atomically.
        let next = self.cursor;
        self.current = Some(next);
        self.cursor = next.next();
        self.remaining_seconds = self.table.duration_of(next);

        Some(Notification::PhaseChanged {
            from: Some(phase),
            phase: next,
            remaining_seconds: self.remaining_seconds,
        })
    }

    /// Read-only snapshot of the observable state.
    #[must_use]
    pub const fn snapshot(&self) -> Snapshot {
        Snapshot {
            running: self.running,
            phase: self.current,
            remaining_seconds: self.remaining_seconds,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
