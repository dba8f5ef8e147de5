//! The question-answering session object.
//!
//! A [`QaSession`] owns the retrieval pipeline and the language model for
//! one document at a time, with the explicit lifecycle
//! `create -> build -> ask* -> discard`. There is no ambient shared state:
//! everything the pipeline needs travels through the session.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use billqa_model::Llm;
use billqa_rag::document::{Document, SearchResult};
use billqa_rag::pipeline::RagPipeline;

use crate::error::Result;
use crate::loader;
use crate::prompt::{answer_prompt, join_context, rephrase_prompt, REFUSAL};

/// Options controlling session behavior.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// When true, each question is first sent through the rephrasing
    /// template and the model's rephrasing is embedded for retrieval.
    /// The answer template always receives the original question.
    /// Off by default.
    pub rephrase_queries: bool,
}

/// A synthesized answer with the retrieval results that grounded it.
#[derive(Debug, Clone)]
pub struct Answer {
    /// The answer text, or the verbatim refusal string.
    pub text: String,
    /// The retrieved chunks the answer was grounded on, in retrieval
    /// order. Empty when the session refused without calling the model.
    pub sources: Vec<SearchResult>,
}

impl Answer {
    fn refusal() -> Self {
        Self { text: REFUSAL.to_string(), sources: Vec::new() }
    }
}

/// A single-document question-answering session.
///
/// The session runs each question through one sequential pipeline:
/// (optionally rephrase) -> retrieve -> build prompt -> synthesize. The
/// build phase completes before any question is answered; building again
/// discards the previous document's index entirely.
pub struct QaSession {
    pipeline: RagPipeline,
    llm: Arc<dyn Llm>,
    options: SessionOptions,
}

impl QaSession {
    /// Create a session over the given pipeline and model.
    pub fn new(pipeline: RagPipeline, llm: Arc<dyn Llm>, options: SessionOptions) -> Self {
        Self { pipeline, llm, options }
    }

    /// Build the session index from an already-loaded document.
    ///
    /// Discards any previously indexed document first, then ingests the new
    /// one. Returns the number of indexed chunks.
    pub async fn build(&self, document: &Document) -> Result<usize> {
        self.pipeline.reset().await?;
        let chunks = self.pipeline.ingest(document).await?;
        Ok(chunks.len())
    }

    /// Load a PDF from disk and build the session index from it.
    pub async fn build_pdf(&self, path: &Path) -> Result<usize> {
        let document = loader::load_pdf(path)?;
        self.build(&document).await
    }

    /// Number of chunks currently indexed.
    pub async fn chunk_count(&self) -> Result<usize> {
        Ok(self.pipeline.index_len().await?)
    }

    /// Answer a question from the indexed document.
    ///
    /// A blank question, or retrieval that comes back empty (no document
    /// built, or nothing indexed), fail-softs to the verbatim refusal
    /// string without calling the model: the insufficiency is already
    /// detectable from the context length.
    ///
    /// # Errors
    ///
    /// Propagates embedding and model call failures; there is no retry.
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        let question = question.trim();
        if question.is_empty() {
            info!("blank question, nothing to answer");
            return Ok(Answer::refusal());
        }

        let retrieval_query = if self.options.rephrase_queries {
            let rephrased = self.llm.complete(&rephrase_prompt(question)).await?;
            let rephrased = rephrased.trim();
            info!(rephrased_len = rephrased.len(), "rephrased question for retrieval");
            if rephrased.is_empty() { question.to_string() } else { rephrased.to_string() }
        } else {
            question.to_string()
        };

        let sources = self.pipeline.retrieve(&retrieval_query).await?;
        if sources.is_empty() {
            info!("no context retrieved, refusing");
            return Ok(Answer::refusal());
        }

        let context = join_context(&sources);
        let prompt = answer_prompt(&context, question);
        let text = self.llm.complete(&prompt).await?;

        info!(model = %self.llm.name(), source_count = sources.len(), "answered question");

        Ok(Answer { text, sources })
    }

    /// End the session, discarding the index.
    pub async fn discard(self) -> Result<()> {
        self.pipeline.reset().await?;
        Ok(())
    }
}
