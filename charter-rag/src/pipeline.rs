//! Question-answering orchestrator.
//!
//! [`PipelineService`] owns the document index and the answer generator. It is
//! built once at startup (chunk → embed → index) and then answers questions
//! (embed → search → prompt → generate) without rebuilding anything.
//!
//! # Example
//!
//! ```rust,ignore
//! use charter_rag::{Document, PipelineService, RagConfig};
//!
//! let service = PipelineService::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(embedder))
//!     .generator(Arc::new(generator))
//!     .document(Document::from_path("constitution/pak_constitution.txt")?)
//!     .build()
//!     .await?;
//!
//! let answer = service.ask("What does Article 25 say about equality?").await?;
//! ```

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::chunking::{Chunker, RecursiveChunker};
use crate::config::RagConfig;
use crate::document::{Answer, Document, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::generation::{AnswerGenerator, GenerationRequest};
use crate::inmemory::InMemoryVectorIndex;
use crate::prompt::{PromptTemplate, build_context};
use crate::vectorstore::VectorIndex;

/// Chunk, embed, and index a document.
///
/// # Errors
///
/// Returns [`RagError::IndexBuildError`] if the document yields no chunks,
/// embedding fails, or the embeddings are inconsistent.
pub async fn index_document(
    document: &Document,
    chunker: &dyn Chunker,
    embedding_provider: &dyn EmbeddingProvider,
) -> Result<InMemoryVectorIndex> {
    let mut chunks = chunker.chunk(document);
    if chunks.is_empty() {
        error!(document.id = %document.id, "document produced no chunks");
        return Err(RagError::IndexBuildError(format!(
            "document '{}' contains no text to index",
            document.id
        )));
    }

    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    let embeddings = embedding_provider.embed_batch(&texts).await.map_err(|e| {
        error!(document.id = %document.id, error = %e, "embedding failed during index build");
        RagError::IndexBuildError(format!("embedding failed for document '{}': {e}", document.id))
    })?;

    if embeddings.len() != chunks.len() {
        error!(
            expected = chunks.len(),
            received = embeddings.len(),
            "embedding provider returned wrong number of vectors"
        );
        return Err(RagError::IndexBuildError(format!(
            "{} returned {} embeddings for {} chunks",
            embedding_provider.name(),
            embeddings.len(),
            chunks.len()
        )));
    }

    for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
        chunk.embedding = embedding;
    }

    let index = InMemoryVectorIndex::build(chunks).map_err(|e| {
        error!(document.id = %document.id, error = %e, "index construction failed");
        RagError::IndexBuildError(format!("failed to index document '{}': {e}", document.id))
    })?;

    info!(
        document.id = %document.id,
        chunk_count = index.len(),
        dimensions = index.dimensions(),
        "indexed document"
    );
    Ok(index)
}

/// The question-answering service.
///
/// Holds the read-only index and the provider clients for the lifetime of the
/// process. Construct one via [`PipelineService::builder()`].
pub struct PipelineService {
    config: RagConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    generator: Arc<dyn AnswerGenerator>,
    prompt: PromptTemplate,
}

impl std::fmt::Debug for PipelineService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineService")
            .field("config", &self.config)
            .field("embedding_provider", &self.embedding_provider.name())
            .field("indexed_chunks", &self.index.len())
            .field("generator", &self.generator.name())
            .finish()
    }
}

impl PipelineService {
    /// Create a new [`PipelineServiceBuilder`].
    pub fn builder() -> PipelineServiceBuilder {
        PipelineServiceBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the document index.
    pub fn index(&self) -> &Arc<dyn VectorIndex> {
        &self.index
    }

    /// Retrieve the `top_k` chunks nearest to `question`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::RetrievalError`] if the question is blank, embedding
    /// fails, or the index rejects the query vector.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<SearchResult>> {
        if question.trim().is_empty() {
            return Err(RagError::RetrievalError("question must not be empty".to_string()));
        }

        let query_embedding = self.embedding_provider.embed(question).await.map_err(|e| {
            error!(error = %e, "embedding failed during query");
            RagError::RetrievalError(format!("question embedding failed: {e}"))
        })?;

        let results = self.index.search(&query_embedding, self.config.top_k).await.map_err(|e| {
            error!(error = %e, "vector index search failed");
            RagError::RetrievalError(format!("search failed: {e}"))
        })?;

        debug!(result_count = results.len(), "retrieved chunks");
        Ok(results)
    }

    /// Answer a question from the indexed document.
    ///
    /// Returns the generated text together with the chunks used as context,
    /// nearest first. No step is retried.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::RetrievalError`] if retrieval fails or finds
    /// nothing, and [`RagError::GenerationError`] if the generator fails or
    /// returns a blank answer.
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        let sources = self.retrieve(question).await?;
        if sources.is_empty() {
            error!("index returned no chunks");
            return Err(RagError::RetrievalError("no indexed text matched the question".into()));
        }

        let context = build_context(&sources);
        let request = GenerationRequest {
            question: question.to_string(),
            prompt: self.prompt.render(question, &context),
            context,
            options: self.config.generation,
        };

        let provider = self.generator.name().to_string();
        let text = self.generator.generate(&request).await.map_err(|e| {
            error!(generator = %provider, error = %e, "answer generation failed");
            match e {
                RagError::GenerationError { .. } => e,
                other => RagError::GenerationError {
                    provider: provider.clone(),
                    message: other.to_string(),
                },
            }
        })?;

        let text = text.trim();
        if text.is_empty() {
            error!(generator = %provider, "generator returned an empty answer");
            return Err(RagError::GenerationError {
                provider,
                message: "model returned an empty answer".to_string(),
            });
        }

        info!(
            source_count = sources.len(),
            answer_chars = text.chars().count(),
            "answered question"
        );
        Ok(Answer { question: question.to_string(), text: text.to_string(), sources })
    }
}

/// Builder for constructing a [`PipelineService`].
///
/// `embedding_provider` and `generator` are required, plus either a
/// `document` to index or a prebuilt `index`. The chunker defaults to a
/// [`RecursiveChunker`] configured from [`RagConfig`] and the prompt to
/// [`PromptTemplate::default()`].
///
/// # Example
///
/// ```rust,ignore
/// let service = PipelineService::builder()
///     .embedding_provider(Arc::new(embedder))
///     .generator(Arc::new(generator))
///     .document(document)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct PipelineServiceBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    generator: Option<Arc<dyn AnswerGenerator>>,
    chunker: Option<Arc<dyn Chunker>>,
    prompt: Option<PromptTemplate>,
    document: Option<Document>,
    index: Option<Arc<dyn VectorIndex>>,
}

impl PipelineServiceBuilder {
    /// Set the pipeline configuration. Defaults to [`RagConfig::default()`].
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider used for both chunks and questions.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the answer generator.
    pub fn generator(mut self, generator: Arc<dyn AnswerGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Override the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Override the prompt template.
    pub fn prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Set the document to chunk, embed, and index during [`build`](Self::build).
    pub fn document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }

    /// Use an already built index instead of indexing a document.
    pub fn index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Build the [`PipelineService`], indexing the document if no index was supplied.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if a required field is missing or the
    /// config is invalid, and [`RagError::IndexBuildError`] if the index
    /// cannot be built or is empty.
    pub async fn build(self) -> Result<PipelineService> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;
        let generator = self
            .generator
            .ok_or_else(|| RagError::ConfigError("generator is required".to_string()))?;

        let index: Arc<dyn VectorIndex> = match (self.index, self.document) {
            (Some(index), _) => index,
            (None, Some(document)) => {
                let chunker: Arc<dyn Chunker> = match self.chunker {
                    Some(chunker) => chunker,
                    None => Arc::new(RecursiveChunker::from_config(&config)),
                };
                let index =
                    index_document(&document, chunker.as_ref(), embedding_provider.as_ref())
                        .await?;
                Arc::new(index)
            }
            (None, None) => {
                return Err(RagError::ConfigError(
                    "either a document or a prebuilt index is required".to_string(),
                ));
            }
        };

        if index.is_empty() {
            return Err(RagError::IndexBuildError("index contains no chunks".to_string()));
        }

        Ok(PipelineService {
            config,
            embedding_provider,
            index,
            generator,
            prompt: self.prompt.unwrap_or_default(),
        })
    }
}
