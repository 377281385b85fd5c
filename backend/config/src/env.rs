//! Environment handling for config values.
//!
//! Two passes run at load time:
//! - `${VAR_NAME}` references inside the config file are substituted. Only
//!   uppercase `[A-Z_][A-Z0-9_]*` names are matched; `$${VAR}` escapes to a
//!   literal `${VAR}`.
//! - Well-known variables (`OLLAMA_API_URL`, `LOOKOUT_PORT`, ...) override
//!   whatever the file and defaults produced.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

use crate::schema::LookoutConfig;

/// `${VAR}` with an optional leading `$` marking an escape.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

pub const ENV_BIND: &str = "LOOKOUT_BIND";
pub const ENV_PORT: &str = "LOOKOUT_PORT";
pub const ENV_UPLOAD_DIR: &str = "LOOKOUT_UPLOAD_DIR";
pub const ENV_MAX_UPLOAD_BYTES: &str = "LOOKOUT_MAX_UPLOAD_BYTES";
pub const ENV_GENERATE_URL: &str = "OLLAMA_API_URL";
pub const ENV_TAGS_URL: &str = "OLLAMA_LIST_MODELS_URL";
pub const ENV_DEFAULT_MODEL: &str = "LOOKOUT_DEFAULT_MODEL";
pub const ENV_REQUEST_TIMEOUT: &str = "LOOKOUT_REQUEST_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "LOOKOUT_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LOOKOUT_LOG_DIR";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references in a config JSON value tree.
///
/// Walks the entire value tree recursively; only string leaves are processed.
/// Returns an error if any referenced env var is not set or is empty.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    substitute_value(value, &std::env::vars().collect(), "")
}

/// Substitute env vars using a provided map (useful for testing).
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => {
            let result: Result<Vec<_>> = arr
                .iter()
                .enumerate()
                .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
                .collect();
            Ok(Value::Array(result?))
        }
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut error: Option<MissingEnvVarError> = None;
    let substituted = ENV_VAR_PATTERN.replace_all(s, |caps: &regex::Captures| {
        let var_name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{var_name}}}");
        }
        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                error.get_or_insert_with(|| MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = error {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// Overlay well-known environment variables onto `config`.
///
/// Unparseable numeric values are ignored with a warning.
pub fn apply_env_overrides(mut config: LookoutConfig, env: &HashMap<String, String>) -> LookoutConfig {
    let get = |key: &str| env.get(key).filter(|v| !v.is_empty());

    if let Some(v) = get(ENV_BIND) {
        config.server.bind_address = v.clone();
    }
    if let Some(port) = get(ENV_PORT).and_then(|v| parse_or_warn(ENV_PORT, v)) {
        config.server.port = port;
    }
    if let Some(v) = get(ENV_UPLOAD_DIR) {
        config.uploads.dir = PathBuf::from(v);
    }
    if let Some(bytes) = get(ENV_MAX_UPLOAD_BYTES).and_then(|v| parse_or_warn(ENV_MAX_UPLOAD_BYTES, v)) {
        config.uploads.max_body_bytes = bytes;
    }
    if let Some(v) = get(ENV_GENERATE_URL) {
        config.ollama.generate_url = v.clone();
    }
    if let Some(v) = get(ENV_TAGS_URL) {
        config.ollama.tags_url = v.clone();
    }
    if let Some(v) = get(ENV_DEFAULT_MODEL) {
        config.ollama.default_model = v.clone();
    }
    if let Some(secs) = get(ENV_REQUEST_TIMEOUT).and_then(|v| parse_or_warn(ENV_REQUEST_TIMEOUT, v)) {
        config.ollama.request_timeout_secs = Some(secs);
    }
    if let Some(v) = get(ENV_LOG_LEVEL) {
        config.logging.level = v.clone();
    }
    if let Some(v) = get(ENV_LOG_DIR) {
        config.logging.dir = Some(PathBuf::from(v));
    }
    config
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = key, value = raw, "Ignoring unparseable env override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn substitutes_simple_var() {
        let v = json!({"ollama": {"generateUrl": "http://${OLLAMA_HOST}/api/generate"}});
        let env = env(&[("OLLAMA_HOST", "gpu-box:11434")]);
        let result = resolve_env_vars_with(&v, &env).unwrap();
        assert_eq!(result["ollama"]["generateUrl"], "http://gpu-box:11434/api/generate");
    }

    #[test]
    fn error_on_missing_var() {
        let v = json!({"uploads": {"dir": "${MISSING_VAR}"}});
        let err = resolve_env_vars_with(&v, &HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("MISSING_VAR"));
        assert!(err.to_string().contains("uploads.dir"));
    }

    #[test]
    fn escaped_reference_is_kept_literal() {
        let v = json!({"key": "$${NOT_A_VAR} and ${REAL}"});
        let result = resolve_env_vars_with(&v, &env(&[("REAL", "yes")])).unwrap();
        assert_eq!(result["key"], "${NOT_A_VAR} and yes");
    }

    #[test]
    fn passthrough_non_var_strings_and_scalars() {
        let v = json!({"key": "plain-string", "port": 5000, "list": ["$5"]});
        let result = resolve_env_vars_with(&v, &HashMap::new()).unwrap();
        assert_eq!(result, v);
    }

    #[test]
    fn overrides_apply_on_top_of_config() {
        let cfg = apply_env_overrides(
            LookoutConfig::default(),
            &env(&[
                (ENV_GENERATE_URL, "http://10.0.0.5:11434/api/generate"),
                (ENV_TAGS_URL, "http://10.0.0.5:11434/api/tags"),
                (ENV_PORT, "8088"),
                (ENV_LOG_DIR, "/var/log/lookout"),
            ]),
        );
        assert_eq!(cfg.ollama.generate_url, "http://10.0.0.5:11434/api/generate");
        assert_eq!(cfg.ollama.tags_url, "http://10.0.0.5:11434/api/tags");
        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.logging.dir, Some(PathBuf::from("/var/log/lookout")));
    }

    #[test]
    fn bad_numbers_and_empty_values_are_ignored() {
        let cfg = apply_env_overrides(
            LookoutConfig::default(),
            &env(&[(ENV_PORT, "eighty"), (ENV_DEFAULT_MODEL, "")]),
        );
        assert_eq!(cfg, LookoutConfig::default());
    }
}
