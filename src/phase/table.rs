//! Phase identities, signal assignments, and the timing table.
//!
//! The four phases form a closed cyclic sequence. Each phase's signal
//! assignment is fixed data over the closed enum — it is never computed
//! from partial state, so no reachable state shows both directions green
//! or both directions off-red at the same time.

use serde::{Deserialize, Serialize};

use crate::config::schema::TimingConfig;
use crate::error::ConfigError;

// ============================================================================
// Directions and Colors
// ============================================================================

/// One of the two perpendicular approaches governed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The North-South approach.
    NorthSouth,
    /// The East-West approach.
    EastWest,
}

impl Direction {
    /// Both directions, in display order.
    pub const ALL: [Self; 2] = [Self::NorthSouth, Self::EastWest];

    /// Short display label (`"NS"` / `"EW"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NorthSouth => "NS",
            Self::EastWest => "EW",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Color shown by one signal head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalColor {
    /// Stop.
    Red,
    /// Clearance interval.
    Yellow,
    /// Right-of-way.
    Green,
}

impl SignalColor {
    /// All colors, in top-to-bottom signal-head order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Yellow, Self::Green];

    /// Lowercase display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }
}

impl std::fmt::Display for SignalColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Phase Identity
// ============================================================================

/// One step of the fixed signal cycle.
///
/// Ordering is significant and cyclic: green, then the yellow clearance
/// interval, then the cross-street gets the same pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseId {
    /// North-South red, East-West green.
    NsRedEwGreen,
    /// North-South red, East-West yellow (clearance).
    NsRedEwYellow,
    /// North-South green, East-West red.
    NsGreenEwRed,
    /// North-South yellow (clearance), East-West red.
    NsYellowEwRed,
}

impl PhaseId {
    /// All phases in cycle order.
    pub const ALL: [Self; 4] = [
        Self::NsRedEwGreen,
        Self::NsRedEwYellow,
        Self::NsGreenEwRed,
        Self::NsYellowEwRed,
    ];

    /// The phase a freshly reset cycle begins with.
    #[must_use]
    pub const fn first() -> Self {
        Self::NsRedEwGreen
    }

    /// The next phase in fixed cyclic order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::NsRedEwGreen => Self::NsRedEwYellow,
            Self::NsRedEwYellow => Self::NsGreenEwRed,
            Self::NsGreenEwRed => Self::NsYellowEwRed,
            Self::NsYellowEwRed => Self::NsRedEwGreen,
        }
    }

    /// The signal color a direction shows during this phase.
    ///
    /// Fixed data over the closed enum; the red/yellow/green assignment
    /// never leaves both directions off-red simultaneously.
    #[must_use]
    pub const fn signal_for(self, direction: Direction) -> SignalColor {
        match (self, direction) {
            (Self::NsRedEwGreen | Self::NsRedEwYellow, Direction::NorthSouth)
            | (Self::NsGreenEwRed | Self::NsYellowEwRed, Direction::EastWest) => SignalColor::Red,
            (Self::NsRedEwGreen, Direction::EastWest)
            | (Self::NsGreenEwRed, Direction::NorthSouth) => SignalColor::Green,
            (Self::NsRedEwYellow, Direction::EastWest)
            | (Self::NsYellowEwRed, Direction::NorthSouth) => SignalColor::Yellow,
        }
    }

    /// Human-readable phase name for the dashboard.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NsRedEwGreen => "NS red / EW green",
            Self::NsRedEwYellow => "NS red / EW yellow",
            Self::NsGreenEwRed => "NS green / EW red",
            Self::NsYellowEwRed => "NS yellow / EW red",
        }
    }

    /// Stable snake_case key, matching the timing file spelling.
    ///
    /// Used for event payloads and metrics labels — the set is closed, so
    /// label cardinality is bounded by construction.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::NsRedEwGreen => "ns_red_ew_green",
            Self::NsRedEwYellow => "ns_red_ew_yellow",
            Self::NsGreenEwRed => "ns_green_ew_red",
            Self::NsYellowEwRed => "ns_yellow_ew_red",
        }
    }
}

impl std::fmt::Display for PhaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Timing Table
// ============================================================================

/// Immutable map from phase to dwell duration in seconds.
///
/// Built once from a validated [`TimingConfig`]; every lookup afterwards is
/// total. Rejecting non-positive durations here keeps the scheduler free of
/// runtime error paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTable {
    ns_red_ew_green: u32,
    ns_red_ew_yellow: u32,
    ns_green_ew_red: u32,
    ns_yellow_ew_red: u32,
}

impl PhaseTable {
    /// Builds a timing table from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDuration`] if any phase duration is
    /// zero.
    pub fn new(timings: &TimingConfig) -> Result<Self, ConfigError> {
        for phase in PhaseId::ALL {
            let value = timings.duration_of(phase);
            if value == 0 {
                return Err(ConfigError::InvalidDuration {
                    phase: phase.key().to_string(),
                    value,
                });
            }
        }

        Ok(Self {
            ns_red_ew_green: timings.ns_red_ew_green,
            ns_red_ew_yellow: timings.ns_red_ew_yellow,
            ns_green_ew_red: timings.ns_green_ew_red,
            ns_yellow_ew_red: timings.ns_yellow_ew_red,
        })
    }

    /// Total dwell seconds for a phase.
    #[must_use]
    pub const fn duration_of(&self, phase: PhaseId) -> u32 {
        match phase {
            PhaseId::NsRedEwGreen => self.ns_red_ew_green,
            PhaseId::NsRedEwYellow => self.ns_red_ew_yellow,
            PhaseId::NsGreenEwRed => self.ns_green_ew_red,
            PhaseId::NsYellowEwRed => self.ns_yellow_ew_red,
        }
    }

    /// Seconds in one full cycle (all four phases).
    #[must_use]
    pub const fn cycle_seconds(&self) -> u32 {
        self.ns_red_ew_green
            + self.ns_red_ew_yellow
            + self.ns_green_ew_red
            + self.ns_yellow_ew_red
    }
}

/// The stock 20/5/20/5 timing table.
impl Default for PhaseTable {
    fn default() -> Self {
        Self {
            ns_red_ew_green: 20,
            ns_red_ew_yellow: 5,
            ns_green_ew_red: 20,
            ns_yellow_ew_red: 5,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_order() {
        assert_eq!(PhaseId::NsRedEwGreen.next(), PhaseId::NsRedEwYellow);
        assert_eq!(PhaseId::NsRedEwYellow.next(), PhaseId::NsGreenEwRed);
        assert_eq!(PhaseId::NsGreenEwRed.next(), PhaseId::NsYellowEwRed);
        assert_eq!(PhaseId::NsYellowEwRed.next(), PhaseId::NsRedEwGreen);
    }

    #[test]
    fn test_next_four_times_is_identity() {
        for phase in PhaseId::ALL {
            assert_eq!(phase.next().next().next().next(), phase);
        }
    }

    #[test]
    fn test_signal_assignments() {
        use Direction::{EastWest, NorthSouth};
        use SignalColor::{Green, Red, Yellow};

        assert_eq!(PhaseId::NsRedEwGreen.signal_for(NorthSouth), Red);
        assert_eq!(PhaseId::NsRedEwGreen.signal_for(EastWest), Green);
        assert_eq!(PhaseId::NsRedEwYellow.signal_for(NorthSouth), Red);
        assert_eq!(PhaseId::NsRedEwYellow.signal_for(EastWest), Yellow);
        assert_eq!(PhaseId::NsGreenEwRed.signal_for(NorthSouth), Green);
        assert_eq!(PhaseId::NsGreenEwRed.signal_for(EastWest), Red);
        assert_eq!(PhaseId::NsYellowEwRed.signal_for(NorthSouth), Yellow);
        assert_eq!(PhaseId::NsYellowEwRed.signal_for(EastWest), Red);
    }

    #[test]
    fn test_at_least_one_direction_red_in_every_phase() {
        for phase in PhaseId::ALL {
            let ns = phase.signal_for(Direction::NorthSouth);
            let ew = phase.signal_for(Direction::EastWest);
            assert!(
                ns == SignalColor::Red || ew == SignalColor::Red,
                "phase {phase:?} leaves no direction on red"
            );
            assert!(
                !(ns == SignalColor::Green && ew == SignalColor::Green),
                "phase {phase:?} shows green in both directions"
            );
        }
    }

    #[test]
    fn test_table_from_default_config() {
        let table = PhaseTable::new(&TimingConfig::default()).unwrap();
        assert_eq!(table.duration_of(PhaseId::NsRedEwGreen), 20);
        assert_eq!(table.duration_of(PhaseId::NsRedEwYellow), 5);
        assert_eq!(table.duration_of(PhaseId::NsGreenEwRed), 20);
        assert_eq!(table.duration_of(PhaseId::NsYellowEwRed), 5);
        assert_eq!(table.cycle_seconds(), 50);
    }

    #[test]
    fn test_table_rejects_zero_duration() {
        let timings = TimingConfig {
            ns_red_ew_yellow: 0,
            ..TimingConfig::default()
        };
        let err = PhaseTable::new(&timings).unwrap_err();
        match err {
            ConfigError::InvalidDuration { phase, value } => {
                assert_eq!(phase, "ns_red_ew_yellow");
                assert_eq!(value, 0);
            }
            other => panic!("expected InvalidDuration, got {other:?}"),
        }
    }

    #[test]
    fn test_default_table_matches_default_config() {
        assert_eq!(
            PhaseTable::default(),
            PhaseTable::new(&TimingConfig::default()).unwrap()
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(PhaseId::NsRedEwGreen.label(), "NS red / EW green");
        assert_eq!(PhaseId::NsRedEwGreen.key(), "ns_red_ew_green");
        assert_eq!(Direction::NorthSouth.label(), "NS");
        assert_eq!(SignalColor::Yellow.label(), "yellow");
    }

    #[test]
    fn test_phase_id_serde_round_trip() {
        let json = serde_json::to_string(&PhaseId::NsGreenEwRed).unwrap();
        assert_eq!(json, r#""ns_green_ew_red""#);
        let back: PhaseId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PhaseId::NsGreenEwRed);
    }
}
