//! Embedding provider seam.

use async_trait::async_trait;

use crate::error::Result;

/// Maps text to a fixed-length vector.
///
/// The pipeline embeds every chunk once while building the index and the
/// question once per [`ask`](crate::PipelineService::ask). Both must come from
/// the same provider so the vectors share a dimensionality.
///
/// # Example
///
/// ```rust,ignore
/// use charter_rag::EmbeddingProvider;
///
/// let vector = provider.embed("What are the fundamental rights?").await?;
/// assert_eq!(vector.len(), provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// A short provider name used in logs and error messages.
    fn name(&self) -> &str;

    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate one embedding per input, in input order.
    ///
    /// Falls back to sequential [`embed`](EmbeddingProvider::embed) calls;
    /// hosted backends that accept several inputs per request override it.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// The dimensionality of the vectors this provider returns.
    fn dimensions(&self) -> usize;
}
