//! Ollama completion backend using the local Ollama HTTP API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{ModelError, Result};
use crate::Llm;

/// The default base URL of a local Ollama server.
const OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// The default completion model.
const DEFAULT_MODEL: &str = "llama3.1";

/// An [`Llm`] backed by Ollama's `/api/generate` endpoint.
///
/// Issues one non-streaming request per completion and returns the full
/// response text.
///
/// # Configuration
///
/// - `base_url` - defaults to `http://localhost:11434`.
/// - `model` - defaults to `llama3.1`.
///
/// # Example
///
/// ```rust,ignore
/// use billqa_model::{Llm, OllamaLlm};
///
/// let model = OllamaLlm::new().with_model("llama3.1:70b");
/// let text = model.complete("Answer from the context only.").await?;
/// ```
pub struct OllamaLlm {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl Default for OllamaLlm {
    fn default() -> Self {
        Self::new()
    }
}

impl OllamaLlm {
    /// Create a new client with the default base URL and model.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: OLLAMA_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
        }
    }

    /// Set the Ollama server base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the completion model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn api_error(&self, message: String) -> ModelError {
        ModelError::Api { model: self.model.clone(), message }
    }
}

// -- Ollama API request/response types ------------------------------

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

// -- Llm implementation ---------------------------------------------

#[async_trait]
impl Llm for OllamaLlm {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.model, prompt_len = prompt.len(), "requesting completion");

        let request_body = GenerateRequest { model: &self.model, prompt, stream: false };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(model = %self.model, error = %e, "request failed");
                self.api_error(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail =
                serde_json::from_str::<ErrorResponse>(&body).map(|e| e.error).unwrap_or(body);

            error!(model = %self.model, %status, "API error");
            return Err(self.api_error(format!("API returned {status}: {detail}")));
        }

        let generate_response: GenerateResponse = response.json().await.map_err(|e| {
            error!(model = %self.model, error = %e, "failed to parse response");
            self.api_error(format!("failed to parse response: {e}"))
        })?;

        Ok(generate_response.response)
    }
}
