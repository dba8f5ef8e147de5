//! Data types for documents, pages, chunks, and search results.

use serde::{Deserialize, Serialize};

/// An uploaded source document as an ordered sequence of pages.
///
/// Created once per upload, immutable afterwards, and discarded wholesale
/// when a new document is uploaded. There is no versioning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document (derived from the file name).
    pub id: String,
    /// The pages of the document, in reading order.
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a document from a single block of text, treated as one page.
    pub fn from_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), pages: vec![Page { page_number: 1, text: text.into() }] }
    }
}

/// One physical PDF page worth of extracted text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub page_number: usize,
    /// The extracted text of the page.
    pub text: String,
}

/// A bounded, overlapping slice of page text: the atomic retrieval unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier, `{document_id}_p{page}_{index}`.
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// 1-based number of the page this chunk was cut from.
    pub source_page: usize,
    /// Character offset of the chunk start within the page text.
    pub start_offset: usize,
}

/// A retrieved [`Chunk`] paired with a similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The cosine similarity score (higher is more relevant).
    pub score: f32,
}
