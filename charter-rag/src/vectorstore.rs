//! Vector index trait for nearest-neighbour lookup over embedded chunks.

use async_trait::async_trait;

use crate::document::SearchResult;
use crate::error::Result;

/// A read-only index of embedded [`Chunk`](crate::Chunk)s.
///
/// An index is built once from every chunk of the document and never
/// modified afterwards; answering a query must not rebuild it.
///
/// # Example
///
/// ```rust,ignore
/// use charter_rag::{InMemoryVectorIndex, VectorIndex};
///
/// let index = InMemoryVectorIndex::build(chunks)?;
/// let nearest = index.search(&query_embedding, 3).await?;
/// ```
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Number of indexed chunks.
    fn len(&self) -> usize;

    /// Returns `true` if the index holds no chunks.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the `top_k` chunks nearest to `embedding`, nearest first.
    ///
    /// `top_k` is clamped to [`len`](VectorIndex::len). Equal scores keep
    /// document order. An empty index yields an empty `Vec`, never an error.
    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>>;
}
