//! Configuration schema types
//!
//! Types deserialized from YAML timing files. The four phase durations are
//! the controller's only runtime configuration.

use serde::{Deserialize, Serialize};

use crate::phase::table::PhaseId;

// ============================================================================
// Top-Level Configuration
// ============================================================================

/// Root configuration for a `pretimed` controller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ControllerConfig {
    /// Phase dwell durations in seconds.
    #[serde(default)]
    pub timings: TimingConfig,
}

// ============================================================================
// Timings
// ============================================================================

/// Dwell duration in seconds for each of the four phases.
///
/// Keys match the phase spelling used throughout the crate
/// (see [`PhaseId::key`]). Omitted keys fall back to the stock
/// 20/5/20/5 timing plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TimingConfig {
    /// North-South red, East-West green.
    #[serde(default = "default_green_seconds")]
    pub ns_red_ew_green: u32,

    /// North-South red, East-West yellow.
    #[serde(default = "default_yellow_seconds")]
    pub ns_red_ew_yellow: u32,

    /// North-South green, East-West red.
    #[serde(default = "default_green_seconds")]
    pub ns_green_ew_red: u32,

    /// North-South yellow, East-West red.
    #[serde(default = "default_yellow_seconds")]
    pub ns_yellow_ew_red: u32,
}

impl TimingConfig {
    /// The configured duration for a phase.
    #[must_use]
    pub const fn duration_of(&self, phase: PhaseId) -> u32 {
        match phase {
            PhaseId::NsRedEwGreen => self.ns_red_ew_green,
            PhaseId::NsRedEwYellow => self.ns_red_ew_yellow,
            PhaseId::NsGreenEwRed => self.ns_green_ew_red,
            PhaseId::NsYellowEwRed => self.ns_yellow_ew_red,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            ns_red_ew_green: default_green_seconds(),
            ns_red_ew_yellow: default_yellow_seconds(),
            ns_green_ew_red: default_green_seconds(),
            ns_yellow_ew_red: default_yellow_seconds(),
        }
    }
}

const fn default_green_seconds() -> u32 {
    20
}

const fn default_yellow_seconds() -> u32 {
    5
}

// ============================================================================
// Tests
// ============================================================================
