//! Configuration validation
//!
//! Structural checks run after YAML deserialization and before the
//! configuration is frozen. Zero durations are errors; timings that are
//! legal but look like mistakes (very short clearance, very long dwell)
//! are warnings.

use crate::config::schema::ControllerConfig;
use crate::error::{Severity, ValidationIssue};
use crate::phase::table::{Direction, PhaseId, SignalColor};

/// Minimum clearance interval that does not draw a warning, in seconds.
///
/// Three seconds is the shortest yellow interval in common signal-timing
/// practice; anything below it is almost certainly a typo.
const MIN_CLEARANCE_SECONDS: u32 = 3;

/// Dwell length above which a warning is raised, in seconds.
const MAX_REASONABLE_DWELL_SECONDS: u32 = 600;

/// Result of validating a configuration.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Issues that prevent the configuration from being used.
    pub errors: Vec<ValidationIssue>,
    /// Suspicious-but-legal findings.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Whether any error-severity issue was found.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator;

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a controller configuration.
    #[must_use]
    pub fn validate(&self, config: &ControllerConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        for phase in PhaseId::ALL {
            let seconds = config.timings.duration_of(phase);
            let path = format!("timings.{}", phase.key());

            if seconds == 0 {
                result.errors.push(ValidationIssue {
                    path,
                    message: "duration must be a positive number of seconds".to_string(),
                    severity: Severity::Error,
                });
                continue;
            }

            if is_clearance_phase(phase) && seconds < MIN_CLEARANCE_SECONDS {
                result.warnings.push(ValidationIssue {
                    path,
                    message: format!(
                        "yellow clearance of {seconds} s is shorter than the customary \
                         {MIN_CLEARANCE_SECONDS} s minimum"
                    ),
                    severity: Severity::Warning,
                });
            } else if seconds > MAX_REASONABLE_DWELL_SECONDS {
                result.warnings.push(ValidationIssue {
                    path,
                    message: format!(
                        "dwell of {seconds} s exceeds {MAX_REASONABLE_DWELL_SECONDS} s; \
                         is this intentional?"
                    ),
                    severity: Severity::Warning,
                });
            }
        }

        result
    }
}

/// Whether a phase is a yellow clearance interval.
fn is_clearance_phase(phase: PhaseId) -> bool {
    Direction::ALL
        .iter()
        .any(|&direction| phase.signal_for(direction) == SignalColor::Yellow)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::TimingConfig;

    fn config_with(timings: TimingConfig) -> ControllerConfig {
        ControllerConfig { timings }
    }

    #[test]
    fn test_defaults_are_clean() {
        let result = Validator::new().validate(&ControllerConfig::default());
        assert!(!result.has_errors());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_zero_duration_is_error() {
        let result = Validator::new().validate(&config_with(TimingConfig {
            ns_green_ew_red: 0,
            ..TimingConfig::default()
        }));
        assert!(result.has_errors());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "timings.ns_green_ew_red");
    }

    #[test]
    fn test_every_zero_duration_reported() {
        let result = Validator::new().validate(&config_with(TimingConfig {
            ns_red_ew_green: 0,
            ns_red_ew_yellow: 0,
            ns_green_ew_red: 0,
            ns_yellow_ew_red: 0,
        }));
        assert_eq!(result.errors.len(), 4);
    }

    #[test]
    fn test_short_yellow_is_warning() {
        let result = Validator::new().validate(&config_with(TimingConfig {
            ns_red_ew_yellow: 1,
            ..TimingConfig::default()
        }));
        assert!(!result.has_errors());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, "timings.ns_red_ew_yellow");
        assert_eq!(result.warnings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_short_green_is_not_a_clearance_warning() {
        let result = Validator::new().validate(&config_with(TimingConfig {
            ns_red_ew_green: 1,
            ..TimingConfig::default()
        }));
        assert!(!result.has_errors());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_very_long_dwell_is_warning() {
        let result = Validator::new().validate(&config_with(TimingConfig {
            ns_green_ew_red: 3600,
            ..TimingConfig::default()
        }));
        assert!(!result.has_errors());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("3600"));
    }

    #[test]
    fn test_clearance_phase_detection() {
        assert!(is_clearance_phase(PhaseId::NsRedEwYellow));
        assert!(is_clearance_phase(PhaseId::NsYellowEwRed));
        assert!(!is_clearance_phase(PhaseId::NsRedEwGreen));
        assert!(!is_clearance_phase(PhaseId::NsGreenEwRed));
    }
}
