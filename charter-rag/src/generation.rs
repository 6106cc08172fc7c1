//! Answer generator seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Decoding policy for answer generation.
///
/// The defaults keep output close to deterministic and bounded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GenerationOptions {
    /// Sampling temperature. Values near zero make decoding near-greedy.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self { temperature: 0.1, max_output_tokens: 512 }
    }
}

/// Everything a generator needs to answer one question.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// The user's question.
    pub question: String,
    /// Retrieved chunk texts joined in retrieval order.
    pub context: String,
    /// The fully rendered prompt combining `question` and `context`.
    pub prompt: String,
    /// Decoding policy.
    pub options: GenerationOptions,
}

/// Produces a natural-language answer from a question and its context.
///
/// Implementations wrap a hosted or local language model. They perform a
/// single attempt per call; retrying is left to the user.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// A short generator name used in logs and error messages.
    fn name(&self) -> &str;

    /// Generate answer text for `request`.
    ///
    /// Returns [`RagError::GenerationError`](crate::RagError::GenerationError)
    /// when the backend is unreachable or its response is malformed.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}
