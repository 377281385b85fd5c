//! `lookout-config` — Lookout runtime configuration.
//!
//! Provides:
//! - Typed config schema (server, uploads, ollama, logging)
//! - YAML loading with `${ENV_VAR}` substitution
//! - Environment variable overrides
//! - Default values
//! - Validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use schema::{LoggingConfig, LookoutConfig, OllamaConfig, ServerConfig, UploadsConfig};
pub use io::{config_file_path, load_config};
pub use env::{apply_env_overrides, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::path::Path;

/// Load the config file, apply env overrides, and validate.
///
/// This is the main entry point for loading a config at runtime. Validation
/// warnings are logged; validation errors abort.
pub async fn load_and_prepare(path: &Path) -> Result<LookoutConfig> {
    let env: HashMap<String, String> = std::env::vars().collect();
    prepare_with(path, &env).await
}

/// [`load_and_prepare`] against an explicit environment map.
pub async fn prepare_with(path: &Path, env: &HashMap<String, String>) -> Result<LookoutConfig> {
    let config = load_config(path, env).await?;
    let config = apply_env_overrides(config, env);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if let Some(first) = report.errors.into_iter().next() {
        bail!(first);
    }

    Ok(config)
}
