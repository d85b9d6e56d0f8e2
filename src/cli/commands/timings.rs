//! Timings command handler
//!
//! Prints the effective timing table — the terminal counterpart of a
//! dashboard's timing-configuration panel.

use crate::cli::args::{OutputFormat, TimingsArgs};
use crate::config::loader::ConfigLoader;
use crate::config::schema::ControllerConfig;
use crate::error::PretimedError;
use crate::phase::table::{PhaseId, PhaseTable};

/// Print the effective timing table.
///
/// # Errors
///
/// Returns a configuration error if the timing file is invalid.
pub fn run(args: &TimingsArgs) -> Result<(), PretimedError> {
    let config = match &args.config {
        Some(path) => {
            let result = ConfigLoader::with_defaults().load(path)?;
            for warning in &result.warnings {
                tracing::warn!(
                    location = warning.location.as_deref().unwrap_or("<unknown>"),
                    "{}",
                    warning.message
                );
            }
            result.config
        }
        None => std::sync::Arc::new(ControllerConfig::default()),
    };

    let table = PhaseTable::new(&config.timings)?;

    match args.format {
        OutputFormat::Human => {
            for phase in PhaseId::ALL {
                println!("{}: {} s", phase.label(), table.duration_of(phase));
            }
            println!("full cycle: {} s", table.cycle_seconds());
        }
        OutputFormat::Json => {
            let mut map = serde_json::Map::new();
            for phase in PhaseId::ALL {
                map.insert(
                    phase.key().to_string(),
                    serde_json::Value::from(table.duration_of(phase)),
                );
            }
            map.insert(
                "cycle_seconds".to_string(),
                serde_json::Value::from(table.cycle_seconds()),
            );
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::Value::Object(map))?
            );
        }
    }

    Ok(())
}
