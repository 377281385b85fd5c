//! Lookout Gateway HTTP API Server
//!
//! Provides the upload, model-listing and analysis endpoints, and serves
//! stored uploads for preview.

pub mod analyze;
pub mod error;
pub mod health_api;
pub mod models_api;
pub mod server;
pub mod upload;

pub use error::ApiError;
pub use models_api::{fetch_model_listing, ModelsResponse};
pub use server::{build_router, start_server, GatewayState, UPLOADS_URL_PREFIX};
