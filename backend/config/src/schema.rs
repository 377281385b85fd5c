//! Lookout runtime configuration schema.
//!
//! Typed for serde YAML/JSON deserialization. Every section and field is
//! optional in the file; missing values fall back to [`crate::defaults`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::defaults;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for Lookout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LookoutConfig {
    /// HTTP listener
    pub server: ServerConfig,

    /// Upload storage
    pub uploads: UploadsConfig,

    /// Ollama endpoints and model defaults
    pub ollama: OllamaConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: defaults::DEFAULT_BIND_ADDRESS.to_string(),
            port: defaults::DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UploadsConfig {
    /// Directory uploads are written to; also the prefix of returned paths.
    pub dir: PathBuf,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(defaults::DEFAULT_UPLOAD_DIR),
            max_body_bytes: defaults::DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OllamaConfig {
    /// Inference endpoint (`/api/generate`).
    pub generate_url: String,
    /// Model listing endpoint (`/api/tags`).
    pub tags_url: String,
    /// Model used when a request does not name one.
    pub default_model: String,
    pub list_timeout_secs: u64,
    /// Inference timeout; unset waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            generate_url: defaults::DEFAULT_GENERATE_URL.to_string(),
            tags_url: defaults::DEFAULT_TAGS_URL.to_string(),
            default_model: defaults::DEFAULT_MODEL.to_string(),
            list_timeout_secs: defaults::DEFAULT_LIST_TIMEOUT_SECS,
            request_timeout_secs: None,
        }
    }
}

impl OllamaConfig {
    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// When set, JSON logs also roll daily into this directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg: LookoutConfig = serde_yaml::from_str(
            "server:\n  port: 8080\nollama:\n  defaultModel: bakllava\n",
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.bind_address, defaults::DEFAULT_BIND_ADDRESS);
        assert_eq!(cfg.ollama.default_model, "bakllava");
        assert_eq!(cfg.ollama.generate_url, defaults::DEFAULT_GENERATE_URL);
        assert_eq!(cfg.uploads.max_body_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn timeouts_convert_to_durations() {
        let mut ollama = OllamaConfig::default();
        assert_eq!(ollama.list_timeout(), Duration::from_secs(5));
        assert_eq!(ollama.request_timeout(), None);
        ollama.request_timeout_secs = Some(90);
        assert_eq!(ollama.request_timeout(), Some(Duration::from_secs(90)));
    }
}
