//! Config validation: field checks with user-friendly error messages.

use crate::schema::LookoutConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &LookoutConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_uploads(config, &mut report);
    validate_ollama(config, &mut report);
    report
}

fn validate_server(config: &LookoutConfig, report: &mut ValidationReport) {
    let server = &config.server;
    if server.bind_address.trim().is_empty() {
        report.error("server.bindAddress", "Bind address cannot be empty");
    }
    if server.port == 0 {
        report.error("server.port", "Port must be between 1 and 65535");
    } else if server.port < 1024 {
        report.warn(
            "server.port",
            format!("Port {} requires elevated privileges; consider using a port >= 1024", server.port),
        );
    }
}

fn validate_uploads(config: &LookoutConfig, report: &mut ValidationReport) {
    let uploads = &config.uploads;
    if uploads.dir.as_os_str().is_empty() {
        report.error("uploads.dir", "Upload directory cannot be empty");
    }
    if uploads.max_body_bytes == 0 {
        report.error("uploads.maxBodyBytes", "maxBodyBytes must be > 0");
    }
}

fn validate_ollama(config: &LookoutConfig, report: &mut ValidationReport) {
    let ollama = &config.ollama;
    for (path, url) in [
        ("ollama.generateUrl", &ollama.generate_url),
        ("ollama.tagsUrl", &ollama.tags_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            report.error(path, format!("'{url}' is not an http(s) URL"));
        }
    }
    if ollama.default_model.trim().is_empty() {
        report.error("ollama.defaultModel", "Default model cannot be empty");
    }
    if ollama.list_timeout_secs == 0 {
        report.error("ollama.listTimeoutSecs", "listTimeoutSecs must be > 0");
    }
    if ollama.request_timeout_secs == Some(0) {
        report.error("ollama.requestTimeoutSecs", "requestTimeoutSecs must be > 0 when set");
    }
}
