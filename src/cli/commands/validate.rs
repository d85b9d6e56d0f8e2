//! Validate command handler
//!
//! Validates timing files without running the controller, in human or
//! JSON output.

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::loader::{ConfigLoader, LoaderOptions};
use crate::error::{ConfigError, PretimedError};

/// Validation outcome for a single file, for JSON output.
#[derive(Debug, Serialize)]
struct FileReport {
    /// Path of the validated file.
    path: String,
    /// `"ok"` or `"error"`.
    status: &'static str,
    /// Error messages, empty when the file is valid.
    errors: Vec<String>,
    /// Warning messages.
    warnings: Vec<String>,
}

/// Summary across all validated files, for JSON output.
#[derive(Debug, Serialize)]
struct Report {
    files: Vec<FileReport>,
    summary: Summary,
}

#[derive(Debug, Serialize)]
struct Summary {
    total: usize,
    valid: usize,
    invalid: usize,
}

/// Validate timing files without starting the controller.
///
/// # Errors
///
/// Returns a configuration error if any file fails validation (or, in
/// strict mode, raises a warning), after reporting every file.
pub fn run(args: &ValidateArgs) -> Result<(), PretimedError> {
    let loader = ConfigLoader::new(LoaderOptions {
        strict: args.strict,
    });

    let mut reports = Vec::with_capacity(args.files.len());
    let mut first_error: Option<ConfigError> = None;

    for path in &args.files {
        tracing::info!(file = %path.display(), "validating timing file");

        match loader.load(path) {
            Ok(result) => {
                reports.push(FileReport {
                    path: path.display().to_string(),
                    status: "ok",
                    errors: vec![],
                    warnings: result
                        .warnings
                        .iter()
                        .map(|w| match &w.location {
                            Some(location) => format!("{} at {location}", w.message),
                            None => w.message.clone(),
                        })
                        .collect(),
                });
            }
            Err(err) => {
                let errors = match &err {
                    ConfigError::ValidationError { errors, .. } => {
                        errors.iter().map(ToString::to_string).collect()
                    }
                    other => vec![other.to_string()],
                };
                reports.push(FileReport {
                    path: path.display().to_string(),
                    status: "error",
                    errors,
                    warnings: vec![],
                });
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    let valid = reports.iter().filter(|r| r.status == "ok").count();
    let report = Report {
        summary: Summary {
            total: reports.len(),
            valid,
            invalid: reports.len() - valid,
        },
        files: reports,
    };

    match args.format {
        OutputFormat::Human => render_human(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    first_error.map_or(Ok(()), |err| Err(err.into()))
}

/// Prints the report in human-readable form.
fn render_human(report: &Report) {
    for file in &report.files {
        if file.status == "ok" {
            println!("{}: ok", file.path);
        } else {
            println!("{}: INVALID", file.path);
            for error in &file.errors {
                println!("  {error}");
            }
        }
        for warning in &file.warnings {
            println!("  warning: {warning}");
        }
    }
    println!(
        "{} file(s) checked, {} valid, {} invalid",
        report.summary.total, report.summary.valid, report.summary.invalid
    );
}
