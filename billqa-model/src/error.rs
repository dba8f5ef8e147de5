//! Error types for the `billqa-model` crate.

use thiserror::Error;

/// Errors that can occur when calling a language model backend.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model API call failed (transport, server, or parse failure).
    #[error("Model error ({model}): {message}")]
    Api {
        /// The model that produced the error.
        model: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
