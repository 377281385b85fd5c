pub mod error;
pub mod traits;
pub mod types;

pub use error::LookoutError;
pub use traits::{VisionModel, VisionRequest, VisionResponse};
pub use types::{AnalysisResponse, Category, ParseResult, QueriedItem, ReportedItem};

/// Model used when a request does not name one, and the sole entry of the
/// model-listing fallback.
pub const DEFAULT_MODEL: &str = "llava:latest";
