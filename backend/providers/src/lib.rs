pub mod mock;
pub mod ollama;

pub use mock::MockVisionModel;
pub use ollama::{OllamaProvider, EMPTY_REPLY};
