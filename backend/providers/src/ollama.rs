use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use lookout_core::{LookoutError, VisionModel, VisionRequest, VisionResponse};

/// Reply text used when Ollama answers without a `response` field.
pub const EMPTY_REPLY: &str = "No response content from model.";

pub const DEFAULT_GENERATE_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_TAGS_URL: &str = "http://localhost:11434/api/tags";
pub const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Ollama local vision model provider.
pub struct OllamaProvider {
    client: Client,
    generate_url: String,
    tags_url: String,
    list_timeout: Duration,
    request_timeout: Option<Duration>,
}

impl OllamaProvider {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            generate_url: DEFAULT_GENERATE_URL.to_string(),
            tags_url: DEFAULT_TAGS_URL.to_string(),
            list_timeout: DEFAULT_LIST_TIMEOUT,
            request_timeout: None,
        }
    }

    pub fn with_generate_url(mut self, url: impl Into<String>) -> Self {
        self.generate_url = url.into();
        self
    }

    pub fn with_tags_url(mut self, url: impl Into<String>) -> Self {
        self.tags_url = url.into();
        self
    }

    pub fn with_list_timeout(mut self, timeout: Duration) -> Self {
        self.list_timeout = timeout;
        self
    }

    /// Bound the inference call. Unset means wait as long as the model needs.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    images: &'a [String],
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: Option<String>,
}

fn transport_error(url: &str, err: reqwest::Error) -> LookoutError {
    if err.is_timeout() {
        LookoutError::ModelTimeout { url: url.to_string() }
    } else {
        LookoutError::ModelUnreachable {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

/// Pull `models[].name` out of a tags payload, skipping entries without a name.
fn model_names(payload: &Value) -> Vec<String> {
    payload
        .get("models")
        .and_then(Value::as_array)
        .map(|models| {
            models
                .iter()
                .filter_map(|m| m.get("name").and_then(Value::as_str))
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl VisionModel for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, request: &VisionRequest) -> Result<VisionResponse, LookoutError> {
        let start = Instant::now();
        let body = OllamaGenerateRequest {
            model: &request.model,
            prompt: &request.prompt,
            images: &request.images,
            stream: false,
        };

        debug!(url = %self.generate_url, model = %request.model, "Sending request to Ollama");

        let mut call = self.client.post(&self.generate_url).json(&body);
        if let Some(timeout) = self.request_timeout {
            call = call.timeout(timeout);
        }
        let response = call
            .send()
            .await
            .map_err(|e| transport_error(&self.generate_url, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(LookoutError::ModelStatus {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let generated: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| LookoutError::ModelReply {
                message: format!("failed to parse Ollama response: {e}"),
            })?;

        Ok(VisionResponse {
            content: generated.response.unwrap_or_else(|| EMPTY_REPLY.to_string()),
            provider: "ollama".to_string(),
            model: request.model.clone(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn list_models(&self) -> Result<Vec<String>, LookoutError> {
        let response = self
            .client
            .get(&self.tags_url)
            .timeout(self.list_timeout)
            .send()
            .await
            .map_err(|e| transport_error(&self.tags_url, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(LookoutError::ModelStatus {
                status: status.as_u16(),
                body: error_body,
            });
        }

        match response.json::<Value>().await {
            Ok(payload) => Ok(model_names(&payload)),
            Err(e) => {
                warn!(url = %self.tags_url, error = %e, "Ollama returned a malformed model list");
                Ok(Vec::new())
            }
        }
    }
}
