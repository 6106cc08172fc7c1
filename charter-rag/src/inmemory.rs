//! In-memory vector index using cosine similarity.
//!
//! [`InMemoryVectorIndex`] keeps every chunk in document order in a `Vec` and
//! answers queries with an exact linear scan. The document is a single
//! constitution, so a few thousand chunks at most.

use async_trait::async_trait;
use tracing::debug;

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorIndex;

const BACKEND: &str = "InMemory";

/// An immutable in-memory vector index using cosine similarity for search.
///
/// # Example
///
/// ```rust,ignore
/// use charter_rag::InMemoryVectorIndex;
///
/// let index = InMemoryVectorIndex::build(embedded_chunks)?;
/// assert_eq!(index.dimensions(), 384);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryVectorIndex {
    chunks: Vec<Chunk>,
    dimensions: usize,
}

impl InMemoryVectorIndex {
    /// Build an index over `chunks`, preserving their order for tie-breaking.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::VectorStoreError`] if a chunk has no embedding or
    /// the embeddings disagree on dimensionality.
    pub fn build(chunks: Vec<Chunk>) -> Result<Self> {
        let dimensions = chunks.first().map(|c| c.embedding.len()).unwrap_or(0);

        for chunk in &chunks {
            if chunk.embedding.is_empty() {
                return Err(RagError::VectorStoreError {
                    backend: BACKEND.to_string(),
                    message: format!("chunk '{}' has no embedding", chunk.id),
                });
            }
            if chunk.embedding.len() != dimensions {
                return Err(RagError::VectorStoreError {
                    backend: BACKEND.to_string(),
                    message: format!(
                        "chunk '{}' has {} dimensions, expected {dimensions}",
                        chunk.id,
                        chunk.embedding.len()
                    ),
                });
            }
        }

        debug!(chunk_count = chunks.len(), dimensions, "built in-memory index");
        Ok(Self { chunks, dimensions })
    }

    /// The dimensionality shared by all indexed embeddings, or 0 when empty.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The indexed chunks in document order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    fn len(&self) -> usize {
        self.chunks.len()
    }

    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        if self.chunks.is_empty() {
            return Ok(Vec::new());
        }
        if embedding.len() != self.dimensions {
            return Err(RagError::VectorStoreError {
                backend: BACKEND.to_string(),
                message: format!(
                    "query has {} dimensions, index has {}",
                    embedding.len(),
                    self.dimensions
                ),
            });
        }

        let mut scored: Vec<SearchResult> = self
            .chunks
            .iter()
            .map(|chunk| SearchResult {
                chunk: chunk.clone(),
                score: cosine_similarity(&chunk.embedding, embedding),
            })
            .collect();

        // sort_by is stable, so equal scores stay in document order
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k.min(self.chunks.len()));
        Ok(scored)
    }
}
