//! Read-only scheduler state for observers.
//!
//! A [`Snapshot`] is what display surfaces consume: phase label, countdown,
//! and the six lamp states. It is a plain value — pulling one has no side
//! effects, and a stopped snapshot reports every lamp inactive rather than
//! the last active color.

use serde::Serialize;

use super::table::{Direction, PhaseId, SignalColor};

/// Point-in-time view of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Whether the cycle is running.
    pub running: bool,
    /// The phase showing, `None` when stopped.
    pub phase: Option<PhaseId>,
    /// Seconds left in the current phase; 0 when stopped.
    pub remaining_seconds: u32,
}

impl Snapshot {
    /// The active color for a direction, or `None` for every direction
    /// when stopped.
    #[must_use]
    pub const fn signal_for(&self, direction: Direction) -> Option<SignalColor> {
        if !self.running {
            return None;
        }
        match self.phase {
            Some(phase) => Some(phase.signal_for(direction)),
            None => None,
        }
    }

    /// Whether one specific lamp (direction × color) is lit.
    #[must_use]
    pub fn lamp_is_lit(&self, direction: Direction, color: SignalColor) -> bool {
        self.signal_for(direction) == Some(color)
    }

    /// Dashboard phase label; `"System Off"` when stopped.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        if !self.running {
            return "System Off";
        }
        match self.phase {
            Some(phase) => phase.label(),
            None => "System Off",
        }
    }

    /// Dashboard countdown text (`"17 s"`, `"0 s"` when stopped).
    #[must_use]
    pub fn countdown(&self) -> String {
        format!("{} s", self.remaining_seconds)
    }
}
