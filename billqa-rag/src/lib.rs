//! # billqa-rag
//!
//! Retrieval core for the Finance Bill Q&A pipeline.
//!
//! ## Overview
//!
//! This crate provides the ingest-and-retrieve half of the system:
//!
//! - [`Document`] / [`Page`] / [`Chunk`] - the data model for an uploaded bill
//! - [`Chunker`] / [`OverlapChunker`] - overlapping fixed-size text windows
//! - [`EmbeddingProvider`] - the `embed(text) -> vector` capability seam
//! - [`VectorStore`] / [`InMemoryVectorStore`] - session-scoped similarity index
//! - [`RagPipeline`] - the chunk -> embed -> store / embed -> search orchestrator
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use billqa_rag::{InMemoryVectorStore, OllamaEmbeddingProvider, OverlapChunker, RagConfig, RagPipeline};
//!
//! let config = RagConfig::default();
//! let pipeline = RagPipeline::builder()
//!     .config(config.clone())
//!     .embedding_provider(Arc::new(OllamaEmbeddingProvider::new()))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .chunker(Arc::new(OverlapChunker::new(config.chunk_size, config.chunk_overlap)))
//!     .build()?;
//!
//! pipeline.ingest(&document).await?;
//! let results = pipeline.retrieve("What is the tax rate?").await?;
//! ```
//!
//! The index lives for one document session: a new upload calls
//! [`RagPipeline::reset`] and rebuilds from scratch. There is no incremental
//! update and no merge.

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod inmemory;
pub mod ollama;
pub mod pipeline;
pub mod vectorstore;

pub use chunking::{Chunker, OverlapChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Chunk, Document, Page, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use inmemory::InMemoryVectorStore;
pub use ollama::OllamaEmbeddingProvider;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use vectorstore::VectorStore;
