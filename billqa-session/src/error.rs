//! Error types for the `billqa-session` crate.

use thiserror::Error;

/// Errors that can occur while loading a document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    /// The text extractor failed or is not installed.
    #[error("pdftotext failed: {0} (is poppler installed?)")]
    Extractor(String),

    /// Extraction succeeded but produced no text.
    #[error("no text could be extracted from '{0}'")]
    EmptyDocument(String),
}

/// Errors that can occur in a question-answering session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The document could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// An error propagated from the retrieval pipeline.
    #[error(transparent)]
    Rag(#[from] billqa_rag::RagError),

    /// An error propagated from the language model.
    #[error(transparent)]
    Model(#[from] billqa_model::ModelError),
}

/// A convenience result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
