//! Main HTTP Gateway Server.
//!
//! Wires the upload, model-listing, analysis and health routes, plus the
//! upload preview server, into one Axum router.

use std::{sync::Arc, time::Instant};

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use lookout_config::LookoutConfig;
use lookout_core::VisionModel;
use lookout_media::{media_router, UploadStore};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument};

use crate::{analyze, health_api, models_api, upload};

/// URL prefix under which stored uploads are served.
pub const UPLOADS_URL_PREFIX: &str = "/static/uploads";

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub model: Arc<dyn VisionModel>,
    pub uploads: UploadStore,
    pub default_model: String,
    pub max_body_bytes: usize,
    pub started_at: Instant,
}

impl GatewayState {
    pub fn from_config(config: &LookoutConfig, model: Arc<dyn VisionModel>) -> Self {
        Self {
            model,
            uploads: UploadStore::new(config.uploads.dir.clone()),
            default_model: config.ollama.default_model.clone(),
            max_body_bytes: config.uploads.max_body_bytes,
            started_at: Instant::now(),
        }
    }
}

/// Build the gateway router with all routes and layers.
pub fn build_router(state: GatewayState) -> Router {
    let uploads_dir = state.uploads.dir().to_path_buf();
    let max_body_bytes = state.max_body_bytes;

    Router::new()
        .route("/upload", post(upload::upload_image))
        .route("/models", get(models_api::list_models))
        .route("/analyze", post(analyze::analyze))
        .route("/api/health", get(health_api::get_health))
        .with_state(state)
        .nest(UPLOADS_URL_PREFIX, media_router(uploads_dir))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Starts the Axum HTTP server and serves until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(bind_address: &str, port: u16, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    let listener = TcpListener::bind((bind_address, port))
        .await
        .with_context(|| format!("Failed to bind {bind_address}:{port}"))?;
    info!(addr = %listener.local_addr()?, "Gateway HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use lookout_providers::MockVisionModel;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    const BOUNDARY: &str = "lookout-test-boundary";

    const CHAIR_REPLY: &str = "**Found Items:**\n\
    * Chair (wooden, by the window)\n\
    **Maybe Found Items:**\n\
    * Lamp (partially hidden)\n\
    **Not Found Items:**\n\
    * Table\n";

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("lookout-gateway-{}", Uuid::new_v4()))
    }

    fn state_with(model: Arc<dyn VisionModel>, uploads: PathBuf, max_body_bytes: usize) -> GatewayState {
        GatewayState {
            model,
            uploads: UploadStore::new(uploads),
            default_model: "llava:latest".to_string(),
            max_body_bytes,
            started_at: Instant::now(),
        }
    }

    fn app_with(model: MockVisionModel) -> (Router, PathBuf) {
        let dir = scratch_dir();
        let state = state_with(Arc::new(model), dir.clone(), 16 * 1024 * 1024);
        (build_router(state), dir)
    }

    fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn analyze_request(payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn write_image(dir: &PathBuf, name: &str) -> PathBuf {
        tokio::fs::create_dir_all(dir).await.unwrap();
        let path = dir.join(name);
        tokio::fs::write(&path, b"\x89PNG\r\n\x1a\nfake").await.unwrap();
        path
    }

    #[tokio::test]
    async fn upload_stores_sanitized_file() {
        let (app, dir) = app_with(MockVisionModel::new());
        let (status, body) = send(app, upload_request(multipart_body("file", "my photo.png", b"png"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Image uploaded successfully");
        let filepath = body["filepath"].as_str().unwrap();
        assert!(filepath.ends_with("my_photo.png"));
        assert!(dir.join("my_photo.png").exists());
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn upload_rejects_disallowed_extension() {
        let (app, dir) = app_with(MockVisionModel::new());
        let (status, body) = send(app, upload_request(multipart_body("file", "notes.txt", b"hi"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "File type not allowed");
        assert!(!dir.join("notes.txt").exists());
    }

    #[tokio::test]
    async fn upload_rejects_empty_filename() {
        let (app, _dir) = app_with(MockVisionModel::new());
        let (status, body) = send(app, upload_request(multipart_body("file", "", b"png"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No selected file");
    }

    #[tokio::test]
    async fn upload_without_file_part_is_rejected() {
        let (app, _dir) = app_with(MockVisionModel::new());
        let (status, body) = send(app, upload_request(multipart_body("other", "a.png", b"png"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file part");
    }

    #[tokio::test]
    async fn upload_without_multipart_body_is_rejected() {
        let (app, _dir) = app_with(MockVisionModel::new());
        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file part");
    }

    #[tokio::test]
    async fn oversized_upload_is_413() {
        let dir = scratch_dir();
        let app = build_router(state_with(Arc::new(MockVisionModel::new()), dir.clone(), 256));
        let (status, _) = send(app, upload_request(multipart_body("file", "big.png", &[0u8; 4096]))).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(!dir.join("big.png").exists());
    }

    #[tokio::test]
    async fn models_lists_names() {
        let (app, _dir) = app_with(MockVisionModel::new().with_models(["llava:latest", "bakllava:7b"]));
        let request = Request::builder().uri("/models").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "models": ["llava:latest", "bakllava:7b"] }));
    }

    #[tokio::test]
    async fn models_falls_back_when_empty() {
        let (app, _dir) = app_with(MockVisionModel::new());
        let request = Request::builder().uri("/models").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["models"], json!(["llava:latest"]));
        assert_eq!(body["warning"], "Ollama reported no models. Using default.");
    }

    #[tokio::test]
    async fn models_timeout_is_504_with_fallback() {
        let (app, _dir) = app_with(MockVisionModel::new().timing_out());
        let request = Request::builder().uri("/models").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["models"], json!(["llava:latest"]));
        assert_eq!(body["error"], "Timeout connecting to Ollama to list models. Using default.");
    }

    #[tokio::test]
    async fn models_unreachable_is_503_with_fallback() {
        let (app, _dir) = app_with(MockVisionModel::new().unreachable());
        let request = Request::builder().uri("/models").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["models"], json!(["llava:latest"]));
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Could not connect to Ollama to list models ("));
        assert!(error.ends_with("Using default."));
    }

    #[tokio::test]
    async fn analyze_returns_categorized_items() {
        let dir = scratch_dir();
        let image = write_image(&dir, "room.png").await;
        let model = Arc::new(MockVisionModel::new().with_response(CHAIR_REPLY));
        let app = build_router(state_with(model.clone(), dir.clone(), 1024 * 1024));

        let payload = json!({
            "image_path": image.display().to_string(),
            "model": "bakllava:7b",
            "custom_items": ["Chair", "Lamp", "Table"],
        });
        let (status, body) = send(app, analyze_request(payload)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["queried_items_echoed"],
            json!([{ "item": "Chair" }, { "item": "Lamp" }, { "item": "Table" }])
        );
        assert_eq!(body["found"], json!([{ "item": "Chair", "details": "wooden, by the window" }]));
        assert_eq!(body["maybe_found"], json!([{ "item": "Lamp", "details": "partially hidden" }]));
        assert_eq!(body["not_found"], json!([{ "item": "Table" }]));
        assert_eq!(body["raw_output"], CHAIR_REPLY);

        let sent = model.last_request().unwrap();
        assert_eq!(sent.model, "bakllava:7b");
        assert_eq!(sent.images.len(), 1);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn analyze_uses_default_model_when_omitted() {
        let dir = scratch_dir();
        let image = write_image(&dir, "desk.jpg").await;
        let model = Arc::new(MockVisionModel::new().with_response("Nothing to report."));
        let app = build_router(state_with(model.clone(), dir.clone(), 1024 * 1024));

        let (status, body) = send(app, analyze_request(json!({ "image_path": image.display().to_string() }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["queried_items_echoed"], json!([]));
        assert_eq!(body["found"], json!([]));
        assert_eq!(body["raw_output"], "Nothing to report.");
        assert_eq!(model.last_request().unwrap().model, "llava:latest");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn analyze_rejects_missing_image_path() {
        let (app, _dir) = app_with(MockVisionModel::new());
        let (status, body) = send(app, analyze_request(json!({ "custom_items": ["Chair"] }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Image path is missing or invalid");
    }

    #[tokio::test]
    async fn analyze_rejects_nonexistent_image_path() {
        let (app, dir) = app_with(MockVisionModel::new());
        let missing = dir.join("ghost.png").display().to_string();
        let (status, body) = send(app, analyze_request(json!({ "image_path": missing }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Image path is missing or invalid");
    }

    #[tokio::test]
    async fn analyze_rejects_malformed_json() {
        let (app, _dir) = app_with(MockVisionModel::new());
        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn analyze_model_failure_is_500() {
        let dir = scratch_dir();
        let image = write_image(&dir, "room.png").await;
        let model = Arc::new(MockVisionModel::new().failing_with_status(404, "model 'nope' not found"));
        let app = build_router(state_with(model, dir.clone(), 1024 * 1024));

        let payload = json!({ "image_path": image.display().to_string(), "model": "nope" });
        let (status, body) = send(app, analyze_request(payload)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Failed to connect to Ollama or process image: "));
        assert!(error.contains("model 'nope' not found"));
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn uploaded_files_are_served_for_preview() {
        let dir = scratch_dir();
        write_image(&dir, "room.png").await;
        let app = build_router(state_with(Arc::new(MockVisionModel::new()), dir.clone(), 1024 * 1024));

        let request = Request::builder()
            .uri("/static/uploads/room.png")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _dir) = app_with(MockVisionModel::new());
        let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "lookout");
        assert_eq!(body["model_provider"], "mock");
        assert_eq!(body["default_model"], "llava:latest");
    }
}
