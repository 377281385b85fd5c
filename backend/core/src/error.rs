use thiserror::Error;

/// Top-level error type for the Lookout backend.
#[derive(Debug, Error)]
pub enum LookoutError {
    #[error("No file part")]
    MissingFile,

    #[error("No selected file")]
    EmptyFilename,

    #[error("File type not allowed")]
    DisallowedExtension(String),

    #[error("Image path is missing or invalid")]
    InvalidImagePath,

    #[error("Image file not found after upload.")]
    ImageVanished,

    #[error("timed out contacting model service at {url}")]
    ModelTimeout { url: String },

    #[error("could not reach model service at {url}: {message}")]
    ModelUnreachable { url: String, message: String },

    #[error("model service returned {status}: {body}")]
    ModelStatus { status: u16, body: String },

    #[error("model service sent an unreadable reply: {message}")]
    ModelReply { message: String },

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LookoutError {
    /// Whether the failure came from talking to the external model service.
    pub fn is_model_service(&self) -> bool {
        matches!(
            self,
            Self::ModelTimeout { .. }
                | Self::ModelUnreachable { .. }
                | Self::ModelStatus { .. }
                | Self::ModelReply { .. }
        )
    }

    /// Whether the failure was caused by caller input rather than the backend.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFile
                | Self::EmptyFilename
                | Self::DisallowedExtension(_)
                | Self::InvalidImagePath
        )
    }
}
