//! # billqa-model
//!
//! Language model capability for the Finance Bill Q&A pipeline.
//!
//! ## Overview
//!
//! This crate provides the narrow `complete(prompt) -> text` seam the
//! answer synthesizer is consumed through:
//!
//! - [`Llm`] - the capability trait
//! - [`OllamaLlm`] - a local Ollama backend (`/api/generate`)
//! - [`MockLlm`] - canned responses with prompt capture, for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use billqa_model::{Llm, OllamaLlm};
//!
//! let model = OllamaLlm::new().with_model("llama3.1");
//! let answer = model.complete("Summarize the levy changes.").await?;
//! ```

pub mod error;
pub mod mock;
pub mod ollama;

use async_trait::async_trait;

pub use error::{ModelError, Result};
pub use mock::MockLlm;
pub use ollama::OllamaLlm;

/// A language model consumed through a single blocking completion call.
///
/// One composed prompt string in, one text response out. No retry policy,
/// no timeout handling, no streaming. Correctness of the response
/// (grounding, hallucination avoidance) is steered only by the prompt's
/// instructions, never verified post hoc.
#[async_trait]
pub trait Llm: Send + Sync {
    /// The model identifier, for logging.
    fn name(&self) -> &str;

    /// Generate a completion for the given prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
