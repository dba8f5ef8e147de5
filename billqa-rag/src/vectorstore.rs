//! Vector store trait for storing and searching embeddings.

use async_trait::async_trait;

use crate::document::{Chunk, SearchResult};
use crate::error::Result;

/// A session-scoped store of `(chunk, vector)` entries with similarity search.
///
/// The store holds the index for exactly one document session. Uploading a
/// new document calls [`clear`](VectorStore::clear) and rebuilds from
/// scratch; there is no incremental update and no merge.
///
/// # Example
///
/// ```rust,ignore
/// use billqa_rag::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.insert(&chunks, &vectors).await?;
/// let results = store.search(&query_embedding, 4).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert chunks with their vectors, one vector per chunk, in order.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::VectorStoreError`](crate::RagError::VectorStoreError)
    /// if the slices differ in length or the vectors differ in dimensionality
    /// from entries already stored.
    async fn insert(&self, chunks: &[Chunk], vectors: &[Vec<f32>]) -> Result<()>;

    /// Search for the `k` most similar stored entries to the given vector.
    ///
    /// Returns up to `k` results ordered by descending similarity score,
    /// ties broken by insertion order (earlier chunk wins). An empty store
    /// returns an empty result, not an error.
    async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<SearchResult>>;

    /// Discard every stored entry.
    async fn clear(&self) -> Result<()>;

    /// Number of stored entries.
    async fn len(&self) -> Result<usize>;
}
