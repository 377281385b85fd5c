//! Config defaults.

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

pub const DEFAULT_PORT: u16 = 5000;

pub const DEFAULT_UPLOAD_DIR: &str = "static/uploads";

/// 16 MiB request body cap.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub const DEFAULT_GENERATE_URL: &str = "http://localhost:11434/api/generate";

pub const DEFAULT_TAGS_URL: &str = "http://localhost:11434/api/tags";

pub const DEFAULT_MODEL: &str = lookout_core::DEFAULT_MODEL;

pub const DEFAULT_LIST_TIMEOUT_SECS: u64 = 5;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Config file looked up in the working directory when `LOOKOUT_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "lookout.yaml";
