//! Upload store: validates, sanitizes, and saves uploaded images.

use std::path::{Path, PathBuf};

use lookout_core::LookoutError;
use tokio::fs;
use tracing::info;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::mime_detect::{allowed_file, extension_of};

/// Where an upload ended up.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub filename: String,
    pub path: PathBuf,
    pub size_bytes: usize,
}

/// Reduce a client-supplied filename to a safe, flat ASCII name.
///
/// Letters are decomposed first so accented characters keep their base
/// letter. Path separators become word breaks, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9_.-]` is dropped, and leading/trailing `.`/`_` are
/// trimmed. `../../etc/passwd` becomes `etc_passwd`.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename.nfkd().filter(char::is_ascii).collect();
    let joined = ascii
        .replace(['/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Stores uploads under a single flat directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate `filename` against the allow-list and write `data` to the store.
    ///
    /// A name that sanitizes down to nothing is replaced by a random one that
    /// keeps the original extension. Existing files with the same name are
    /// overwritten.
    pub async fn save(&self, filename: &str, data: &[u8]) -> Result<StoredUpload, LookoutError> {
        if filename.is_empty() {
            return Err(LookoutError::EmptyFilename);
        }
        if !allowed_file(filename) {
            return Err(LookoutError::DisallowedExtension(
                extension_of(filename).unwrap_or_default(),
            ));
        }

        let safe = secure_filename(filename);
        let name = match safe.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() && allowed_file(&safe) => safe,
            _ => format!(
                "{}.{}",
                Uuid::new_v4(),
                extension_of(filename).unwrap_or_default()
            ),
        };

        fs::create_dir_all(&self.dir).await.map_err(|e| {
            LookoutError::StorageError(format!("cannot create {}: {e}", self.dir.display()))
        })?;

        let path = self.dir.join(&name);
        fs::write(&path, data).await.map_err(|e| {
            LookoutError::StorageError(format!("cannot write {}: {e}", path.display()))
        })?;

        info!(path = %path.display(), bytes = data.len(), "Stored upload");
        Ok(StoredUpload {
            filename: name,
            path,
            size_bytes: data.len(),
        })
    }
}
