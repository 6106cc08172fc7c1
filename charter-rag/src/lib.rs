//! # charter-rag
//!
//! Retrieval-augmented question answering over a single constitution text.
//!
//! The document is split into overlapping chunks, each chunk is embedded once,
//! and the vectors are held in an immutable in-memory index for the lifetime
//! of the process. Each question is embedded, matched against the index, and
//! the nearest chunks are handed to a language model as context.
//!
//! ## Components
//!
//! - [`RecursiveChunker`]: paragraph → line → word → character splitting with overlap
//! - [`EmbeddingProvider`]: text → vector seam
//! - [`VectorIndex`] / [`InMemoryVectorIndex`]: cosine k-nearest-neighbour lookup
//! - [`AnswerGenerator`]: (question, context) → answer seam
//! - [`PipelineService`]: builds the index once and answers questions
//!
//! Hosted Hugging Face providers live in [`huggingface`] behind the
//! `huggingface` feature (enabled by default).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use charter_rag::huggingface::{HuggingFaceEmbeddingProvider, HuggingFaceGenerator};
//! use charter_rag::{Document, PipelineService};
//!
//! let token = charter_rag::huggingface::api_token_from_env()?;
//! let service = PipelineService::builder()
//!     .embedding_provider(Arc::new(HuggingFaceEmbeddingProvider::new(&token)?))
//!     .generator(Arc::new(HuggingFaceGenerator::new(&token)?))
//!     .document(Document::from_path("constitution/pak_constitution.txt")?)
//!     .build()
//!     .await?;
//!
//! let answer = service.ask("What constitutes high treason?").await?;
//! println!("{}", answer.text);
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod inmemory;
pub mod pipeline;
pub mod prompt;
pub mod vectorstore;

#[cfg(feature = "huggingface")]
pub mod huggingface;

pub use chunking::{Chunker, DEFAULT_SEPARATORS, RecursiveChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Answer, Chunk, Document, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use generation::{AnswerGenerator, GenerationOptions, GenerationRequest};
pub use inmemory::InMemoryVectorIndex;
pub use pipeline::{PipelineService, PipelineServiceBuilder, index_document};
pub use prompt::{PromptTemplate, build_context};
pub use vectorstore::VectorIndex;
