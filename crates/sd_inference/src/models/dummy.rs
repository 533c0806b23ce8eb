use sd_core::Result;

use super::InferenceModel;

/// Offline stand-in. Returns the first few sentences of the content so the
/// pipeline can run end to end without an API key.
#[derive(Debug, Default)]
pub struct DummyModel;

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn summarize(&self, content: &str) -> Result<String> {
        let sentences: Vec<&str> = content
            .split(|c| c == '.' || c == '!' || c == '?')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(3)
            .collect();

        let summary = sentences.join(". ") + ".";
        tracing::debug!("Generated summary from content: {}", summary);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_summarize() {
        let model = DummyModel::new();
        let summary = model
            .summarize("First sentence. Second one! Third? Fourth is dropped.")
            .await
            .unwrap();
        assert_eq!(summary, "First sentence. Second one. Third.");
    }
}
