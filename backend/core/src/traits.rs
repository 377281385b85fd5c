use async_trait::async_trait;

use crate::error::LookoutError;

/// Trait for vision-language model services.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Provider name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send a single non-streaming inference request and return the reply text.
    async fn generate(&self, request: &VisionRequest) -> Result<VisionResponse, LookoutError>;

    /// List the model names the service can run.
    ///
    /// An empty list means the service answered but reported nothing usable.
    async fn list_models(&self) -> Result<Vec<String>, LookoutError>;
}

/// Request to a vision model.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub model: String,
    pub prompt: String,
    /// Base64-encoded image payloads.
    pub images: Vec<String>,
}

/// Response from a vision model.
#[derive(Debug, Clone)]
pub struct VisionResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub latency_ms: u64,
}
