//! Config file discovery and loading.

use crate::defaults::DEFAULT_CONFIG_FILE;
use crate::env::resolve_env_vars_with;
use crate::schema::LookoutConfig;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Env var naming an explicit config file.
pub const ENV_CONFIG_PATH: &str = "LOOKOUT_CONFIG";

/// Resolve the config file path.
/// Priority: `LOOKOUT_CONFIG` env > `./lookout.yaml` > `~/.lookout/config.yaml`
pub fn config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
        return PathBuf::from(path);
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }
    if let Some(home) = dirs::home_dir() {
        let user = home.join(".lookout").join("config.yaml");
        if user.exists() {
            return user;
        }
    }
    local
}

/// Load and parse the config from disk, substituting `${VAR}` references from `env`.
///
/// Returns `Ok(Default::default())` if the file doesn't exist or is empty.
pub async fn load_config(path: &Path, env: &HashMap<String, String>) -> Result<LookoutConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(LookoutConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(LookoutConfig::default());
    }

    let value: Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;
    if value.is_null() {
        return Ok(LookoutConfig::default());
    }

    let value = resolve_env_vars_with(&value, env)
        .with_context(|| format!("Failed to resolve env vars in: {}", path.display()))?;

    let config: LookoutConfig = serde_json::from_value(value)
        .with_context(|| format!("Invalid config at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT: AtomicUsize = AtomicUsize::new(0);

    fn scratch_file(contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lookout-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}.yaml", NEXT.fetch_add(1, Ordering::SeqCst)));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let cfg = load_config(Path::new("/no/such/lookout.yaml"), &HashMap::new())
            .await
            .unwrap();
        assert_eq!(cfg, LookoutConfig::default());
    }

    #[tokio::test]
    async fn empty_file_yields_defaults() {
        let path = scratch_file("");
        let cfg = load_config(&path, &HashMap::new()).await.unwrap();
        assert_eq!(cfg, LookoutConfig::default());
    }

    #[tokio::test]
    async fn file_values_are_substituted() {
        let path = scratch_file("uploads:\n  dir: ${DATA_ROOT}/uploads\nserver:\n  port: 9001\n");
        let env = HashMap::from([("DATA_ROOT".to_string(), "/srv/lookout".to_string())]);
        let cfg = load_config(&path, &env).await.unwrap();
        assert_eq!(cfg.uploads.dir, PathBuf::from("/srv/lookout/uploads"));
        assert_eq!(cfg.server.port, 9001);
    }

    #[tokio::test]
    async fn wrongly_typed_field_is_an_error() {
        let path = scratch_file("server:\n  port: not-a-number\n");
        let err = load_config(&path, &HashMap::new()).await.unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }
}
