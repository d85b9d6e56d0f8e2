//! Configuration loading and validation
//!
//! YAML timing files are read, validated, and frozen behind `Arc` before
//! a controller is constructed. This is the only place configuration
//! errors can arise; everything downstream is total.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigLoader, LoadResult, LoadWarning, LoaderOptions};
pub use schema::{ControllerConfig, TimingConfig};
pub use validation::{ValidationResult, Validator};
