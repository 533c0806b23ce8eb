use std::fmt;

use reqwest::Client;
use sd_core::{Error, Result};
use serde::Serialize;
use serde_json::Value;

use super::InferenceModel;

pub const DEFAULT_API_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.1";

const MAX_NEW_TOKENS: u32 = 300;

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

#[derive(Serialize)]
struct Parameters {
    max_new_tokens: u32,
}

pub struct HuggingFaceModel {
    client: Client,
    api_url: String,
    api_key: String,
}

impl fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl HuggingFaceModel {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.unwrap_or_default(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

fn build_prompt(content: &str) -> String {
    format!(
        "You are an expert in content analysis and summarization. Read the following Substack article content \
         and summarize it in 4-6 succinct, insightful bullet points. Focus on the core arguments, key insights, \
         and actionable takeaways. Present the summary in a professional, high-level tone, avoiding unnecessary details \
         and providing a clear and concise overview of the article's most important points.\n\n\
         Article:\n{}\n\nSummary:",
        content
    )
}

/// Pulls the generated text out of the inference response envelope. A
/// top-level object with an `error` key is the service's failure shape;
/// success is an array whose first element carries `generated_text`.
///
/// The echoed prompt prefix is stripped by splitting on the literal prompt
/// text. This breaks if the service echoes the prompt with any formatting
/// difference; known fragility, kept as-is.
fn extract_generated(value: &Value, prompt: &str) -> Result<String> {
    if let Some(error) = value.get("error") {
        let detail = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(Error::Inference(format!("API Error: {}", detail)));
    }

    let generated = value
        .get(0)
        .and_then(|first| first.get("generated_text"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Error::Inference("Error summarizing: malformed inference response".to_string())
        })?;

    let summary = generated.rsplit(prompt).next().unwrap_or(generated);
    Ok(summary.trim().to_string())
}

#[async_trait::async_trait]
impl InferenceModel for HuggingFaceModel {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    async fn summarize(&self, content: &str) -> Result<String> {
        let prompt = build_prompt(content);
        let request = InferenceRequest {
            inputs: &prompt,
            parameters: Parameters {
                max_new_tokens: MAX_NEW_TOKENS,
            },
        };

        let value = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Error summarizing: {}", e)))?
            .json::<Value>()
            .await
            .map_err(|e| Error::Inference(format!("Error summarizing: {}", e)))?;

        extract_generated(&value, &prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_strips_echoed_prompt() {
        let prompt = build_prompt("Some article text.");
        let value = json!([{ "generated_text": format!("{} - Point one\n- Point two", prompt) }]);

        let summary = extract_generated(&value, &prompt).unwrap();
        assert_eq!(summary, "- Point one\n- Point two");
    }

    #[test]
    fn test_extract_without_echo_returns_whole_text() {
        let value = json!([{ "generated_text": "  just the summary  " }]);
        let summary = extract_generated(&value, "unrelated prompt").unwrap();
        assert_eq!(summary, "just the summary");
    }

    #[test]
    fn test_error_envelope_becomes_api_error() {
        let value = json!({ "error": "Model is overloaded" });
        let err = extract_generated(&value, "prompt").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Inference error: API Error: Model is overloaded"
        );
    }

    #[test]
    fn test_malformed_envelope_is_an_error() {
        assert!(extract_generated(&json!([]), "prompt").is_err());
        assert!(extract_generated(&json!([{ "unexpected": 1 }]), "prompt").is_err());
    }

    #[test]
    fn test_request_wire_shape() {
        let request = InferenceRequest {
            inputs: "the prompt",
            parameters: Parameters {
                max_new_tokens: MAX_NEW_TOKENS,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["inputs"], "the prompt");
        assert_eq!(value["parameters"]["max_new_tokens"], 300);
    }
}
