use std::sync::Arc;

use sd_core::{Error, Result};

pub mod dummy;
pub mod huggingface;

pub use dummy::DummyModel;
pub use huggingface::HuggingFaceModel;

#[async_trait::async_trait]
pub trait InferenceModel: Send + Sync {
    fn name(&self) -> &str;

    /// Condenses article text into a short multi-point synopsis.
    async fn summarize(&self, content: &str) -> Result<String>;
}

/// Creates the configured model. `hf` is the default.
pub fn create_model(name: &str, api_key: Option<String>) -> Result<Arc<dyn InferenceModel>> {
    match name {
        "hf" | "huggingface" => Ok(Arc::new(HuggingFaceModel::new(api_key))),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Inference(format!("Unknown model: {}", other))),
    }
}
