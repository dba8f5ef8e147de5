//! Mock language model for tests and offline demos.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::Llm;

/// An [`Llm`] that returns a canned response and records every prompt.
///
/// Tests assert on the recorded prompts to verify what the pipeline
/// actually sent to the synthesizer.
///
/// # Example
///
/// ```rust,ignore
/// use billqa_model::{Llm, MockLlm};
///
/// let model = MockLlm::new("The tax rate is 15%.");
/// let answer = model.complete("...").await?;
/// assert_eq!(answer, "The tax rate is 15%.");
/// assert_eq!(model.prompts().len(), 1);
/// ```
pub struct MockLlm {
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    /// Create a mock that always returns `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self { response: response.into(), prompts: Mutex::new(Vec::new()) }
    }

    /// The prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(prompt.to_string());
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_canned_response_and_records_prompts() {
        let model = MockLlm::new("canned");
        assert_eq!(model.complete("first").await.unwrap(), "canned");
        assert_eq!(model.complete("second").await.unwrap(), "canned");
        assert_eq!(model.prompts(), vec!["first", "second"]);
    }
}
