//! Configuration loader
//!
//! Loading pipeline for timing files:
//! 1. Read raw file content (UTF-8 BOM tolerated)
//! 2. YAML parsing
//! 3. Deserialization to typed config
//! 4. Validation
//! 5. Freeze with `Arc`

use std::path::Path;
use std::sync::Arc;

use crate::config::schema::ControllerConfig;
use crate::config::validation::Validator;
use crate::error::ConfigError;

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoaderOptions {
    /// Treat warnings as errors.
    pub strict: bool,
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<ControllerConfig>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location in the configuration where the warning arose.
    pub location: Option<String>,
}

/// Configuration loader.
///
/// Handles the full loading pipeline from YAML file to frozen
/// [`ControllerConfig`].
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self::new(LoaderOptions { strict: false })
    }

    /// Loads a configuration file and returns the frozen configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, YAML parsing fails,
    /// validation fails, or (in strict mode) any warning is raised.
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let raw_content = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        // Handle UTF-8 BOM
        let raw_content = raw_content.strip_prefix('\u{feff}').unwrap_or(&raw_content);

        let config: ControllerConfig =
            serde_yaml::from_str(raw_content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        self.finish(config, &path.display().to_string())
    }

    /// Validates and freezes an already-deserialized configuration.
    ///
    /// Used by `load` and by callers that start from defaults rather than
    /// a file.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any error-severity issue is found, or
    /// (in strict mode) if any warning is raised.
    pub fn finish(
        &self,
        config: ControllerConfig,
        source: &str,
    ) -> Result<LoadResult, ConfigError> {
        let validation = Validator::new().validate(&config);

        if validation.has_errors() {
            return Err(ConfigError::ValidationError {
                path: source.to_string(),
                errors: validation.errors,
            });
        }

        if self.options.strict && !validation.warnings.is_empty() {
            return Err(ConfigError::ValidationError {
                path: source.to_string(),
                errors: validation.warnings,
            });
        }

        let warnings = validation
            .warnings
            .into_iter()
            .map(|issue| LoadWarning {
                message: issue.message,
                location: Some(issue.path),
            })
            .collect();

        Ok(LoadResult {
            config: Arc::new(config),
            warnings,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
