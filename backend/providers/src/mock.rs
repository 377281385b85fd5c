use std::sync::Mutex;

use async_trait::async_trait;
use lookout_core::{LookoutError, VisionModel, VisionRequest, VisionResponse};

#[derive(Debug, Clone)]
enum Failure {
    Status(u16, String),
    Unreachable,
    Timeout,
}

impl Failure {
    fn to_error(&self) -> LookoutError {
        match self {
            Failure::Status(status, body) => LookoutError::ModelStatus {
                status: *status,
                body: body.clone(),
            },
            Failure::Unreachable => LookoutError::ModelUnreachable {
                url: "mock://vision".to_string(),
                message: "connection refused".to_string(),
            },
            Failure::Timeout => LookoutError::ModelTimeout {
                url: "mock://vision".to_string(),
            },
        }
    }
}

/// A mock vision model that returns canned replies and records what it was sent.
pub struct MockVisionModel {
    fixed_response: Option<String>,
    models: Vec<String>,
    failure: Option<Failure>,
    last_request: Mutex<Option<VisionRequest>>,
}

impl MockVisionModel {
    pub fn new() -> Self {
        Self {
            fixed_response: None,
            models: Vec::new(),
            failure: None,
            last_request: Mutex::new(None),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn failing_with_status(mut self, status: u16, body: impl Into<String>) -> Self {
        self.failure = Some(Failure::Status(status, body.into()));
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.failure = Some(Failure::Unreachable);
        self
    }

    pub fn timing_out(mut self) -> Self {
        self.failure = Some(Failure::Timeout);
        self
    }

    /// The most recent request passed to `generate`.
    pub fn last_request(&self) -> Option<VisionRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Default for MockVisionModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionModel for MockVisionModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &VisionRequest) -> Result<VisionResponse, LookoutError> {
        if let Ok(mut slot) = self.last_request.lock() {
            *slot = Some(request.clone());
        }
        if let Some(failure) = &self.failure {
            return Err(failure.to_error());
        }
        Ok(VisionResponse {
            content: self
                .fixed_response
                .clone()
                .unwrap_or_else(|| "Mock response".to_string()),
            provider: "mock".to_string(),
            model: request.model.clone(),
            latency_ms: 0,
        })
    }

    async fn list_models(&self) -> Result<Vec<String>, LookoutError> {
        match &self.failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(self.models.clone()),
        }
    }
}
