//! End-to-end session tests over mock embedding and model backends.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use billqa_model::{Llm, MockLlm};
use billqa_rag::document::{Document, Page};
use billqa_rag::{
    EmbeddingProvider, InMemoryVectorStore, OverlapChunker, RagConfig, RagPipeline,
};
use billqa_session::{QaSession, SessionOptions, REFUSAL};

/// Deterministic embedder that projects text onto keyword-count axes and
/// records every embedded text, so tests can assert both ranking and what
/// actually got embedded.
struct KeywordEmbeddingProvider {
    texts: Mutex<Vec<String>>,
}

impl KeywordEmbeddingProvider {
    fn new() -> Self {
        Self { texts: Mutex::new(Vec::new()) }
    }

    fn embedded_texts(&self) -> Vec<String> {
        self.texts.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbeddingProvider {
    async fn embed(&self, text: &str) -> billqa_rag::Result<Vec<f32>> {
        self.texts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(text.to_string());
        let lower = text.to_lowercase();
        // Constant third axis keeps keyword-free text off the zero vector.
        Ok(vec![
            lower.matches("tax").count() as f32,
            lower.matches("levy").count() as f32,
            1.0,
        ])
    }

    fn dimensions(&self) -> usize {
        3
    }
}

fn build_session(
    llm: Arc<dyn Llm>,
    embedder: Arc<KeywordEmbeddingProvider>,
    options: SessionOptions,
) -> QaSession {
    let config = RagConfig::builder()
        .chunk_size(200)
        .chunk_overlap(40)
        .top_k(4)
        .build()
        .expect("valid test config");
    let pipeline = RagPipeline::builder()
        .config(config.clone())
        .embedding_provider(embedder)
        .vector_store(Arc::new(InMemoryVectorStore::new()))
        .chunker(Arc::new(OverlapChunker::new(config.chunk_size, config.chunk_overlap)))
        .build()
        .expect("valid test pipeline");
    QaSession::new(pipeline, llm, options)
}

fn tax_bill() -> Document {
    Document::from_text("bill", "Section 12: Tax rate is 15%.")
}

#[tokio::test]
async fn answers_from_the_indexed_page() {
    let llm = Arc::new(MockLlm::new("The tax rate is 15%."));
    let embedder = Arc::new(KeywordEmbeddingProvider::new());
    let session = build_session(llm.clone(), embedder, SessionOptions::default());

    let chunk_count = session.build(&tax_bill()).await.unwrap();
    assert_eq!(chunk_count, 1);

    let answer = session.ask("What is the tax rate?").await.unwrap();
    assert!(answer.text.contains("15%"));
    assert_eq!(answer.sources[0].chunk.source_page, 1);
    assert!(answer.sources[0].chunk.text.contains("Tax rate is 15%"));

    // The synthesizer saw the grounding instruction and the retrieved text.
    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Use only the following context"));
    assert!(prompts[0].contains("Section 12: Tax rate is 15%."));
    assert!(prompts[0].contains("What is the tax rate?"));
}

#[tokio::test]
async fn retrieval_ranks_the_matching_page_first() {
    let llm = Arc::new(MockLlm::new("answer"));
    let embedder = Arc::new(KeywordEmbeddingProvider::new());
    let session = build_session(llm, embedder, SessionOptions::default());

    let document = Document {
        id: "bill".into(),
        pages: vec![
            Page { page_number: 1, text: "The digital levy applies to services.".into() },
            Page { page_number: 2, text: "Tax tax tax: rates and schedules.".into() },
        ],
    };
    session.build(&document).await.unwrap();

    let answer = session.ask("What is the tax position?").await.unwrap();
    assert_eq!(answer.sources[0].chunk.source_page, 2);
}

#[tokio::test]
async fn refuses_before_any_document_is_built() {
    let llm = Arc::new(MockLlm::new("should never be called"));
    let embedder = Arc::new(KeywordEmbeddingProvider::new());
    let session = build_session(llm.clone(), embedder.clone(), SessionOptions::default());

    let answer = session.ask("What is the tax rate?").await.unwrap();
    assert_eq!(answer.text, REFUSAL);
    assert!(answer.sources.is_empty());
    assert!(llm.prompts().is_empty());
    // The empty index short-circuits before the embedder is touched.
    assert!(embedder.embedded_texts().is_empty());
}

#[tokio::test]
async fn refuses_a_blank_question_without_any_calls() {
    let llm = Arc::new(MockLlm::new("should never be called"));
    let embedder = Arc::new(KeywordEmbeddingProvider::new());
    let session = build_session(llm.clone(), embedder.clone(), SessionOptions::default());
    session.build(&tax_bill()).await.unwrap();

    let answer = session.ask("   ").await.unwrap();
    assert_eq!(answer.text, REFUSAL);
    assert!(llm.prompts().is_empty());
    assert_eq!(embedder.embedded_texts().len(), 1, "only the build-phase chunk was embedded");
}

#[tokio::test]
async fn rebuilding_discards_the_previous_document() {
    let llm = Arc::new(MockLlm::new("answer"));
    let embedder = Arc::new(KeywordEmbeddingProvider::new());
    let session = build_session(llm, embedder, SessionOptions::default());

    session.build(&Document::from_text("first", "Tax provisions of the first bill.")).await.unwrap();
    session
        .build(&Document::from_text("second", "Tax provisions of the second bill."))
        .await
        .unwrap();
    assert_eq!(session.chunk_count().await.unwrap(), 1);

    let answer = session.ask("What about tax?").await.unwrap();
    assert!(answer.sources.iter().all(|s| s.chunk.id.starts_with("second_")));
}

#[tokio::test]
async fn rephrasing_feeds_the_model_output_into_retrieval() {
    let llm = Arc::new(MockLlm::new("levy on digital services"));
    let embedder = Arc::new(KeywordEmbeddingProvider::new());
    let session = build_session(
        llm.clone(),
        embedder.clone(),
        SessionOptions { rephrase_queries: true },
    );
    session.build(&tax_bill()).await.unwrap();

    session.ask("What is the levy?").await.unwrap();

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("rephrase it slightly"));
    // The answer prompt carries the original question, not the rephrasing.
    assert!(prompts[1].contains("What is the levy?"));

    // Retrieval embedded the rephrased text.
    let embedded = embedder.embedded_texts();
    assert_eq!(embedded.last().map(String::as_str), Some("levy on digital services"));
}

#[tokio::test]
async fn disabled_rephrasing_embeds_the_original_question() {
    let llm = Arc::new(MockLlm::new("answer"));
    let embedder = Arc::new(KeywordEmbeddingProvider::new());
    let session = build_session(llm.clone(), embedder.clone(), SessionOptions::default());
    session.build(&tax_bill()).await.unwrap();

    session.ask("What is the tax rate?").await.unwrap();

    assert_eq!(llm.prompts().len(), 1);
    assert_eq!(
        embedder.embedded_texts().last().map(String::as_str),
        Some("What is the tax rate?"),
    );
}

#[tokio::test]
async fn discard_clears_the_index() {
    let llm = Arc::new(MockLlm::new("answer"));
    let embedder = Arc::new(KeywordEmbeddingProvider::new());
    let session = build_session(llm, embedder, SessionOptions::default());
    session.build(&tax_bill()).await.unwrap();

    session.discard().await.unwrap();
}
