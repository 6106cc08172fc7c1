//! Error types for the `charter-rag` crate.

use thiserror::Error;

/// Errors that can occur while building or querying the question-answering pipeline.
///
/// [`ConfigError`](RagError::ConfigError) and [`IndexBuildError`](RagError::IndexBuildError)
/// are startup failures: the pipeline cannot serve questions. The remaining
/// variants are reported per question and leave the pipeline usable.
#[derive(Debug, Error)]
pub enum RagError {
    /// A required setting, credential, or input file is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The document could not be read, chunked, or embedded into an index.
    #[error("Index build error: {0}")]
    IndexBuildError(String),

    /// The question could not be embedded or matched against the index.
    #[error("Retrieval error: {0}")]
    RetrievalError(String),

    /// The answer generator was unreachable or returned an unusable answer.
    #[error("Generation error ({provider}): {message}")]
    GenerationError {
        /// The generator that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector index backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStoreError {
        /// The vector index backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },
}

impl RagError {
    /// Returns `true` for failures that must halt startup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RagError::ConfigError(_) | RagError::IndexBuildError(_))
    }
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
