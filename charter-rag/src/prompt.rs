//! Prompt construction for "stuff"-style answering: every retrieved chunk is
//! placed into a single prompt.

use crate::document::SearchResult;
use crate::error::{RagError, Result};

const CONTEXT_SLOT: &str = "{context}";
const QUESTION_SLOT: &str = "{question}";

/// Separator placed between chunk texts in the context block.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// The default answering prompt.
pub const DEFAULT_TEMPLATE: &str = "Use the following pieces of context to answer the question \
at the end. If you don't know the answer, just say that you don't know, don't try to make up \
an answer.\n\n{context}\n\nQuestion: {question}\nHelpful Answer:";

/// A prompt template with `{context}` and `{question}` slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self { template: DEFAULT_TEMPLATE.to_string() }
    }
}

impl PromptTemplate {
    /// Create a template, checking that both slots are present.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `{context}` or `{question}` is missing.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        for slot in [CONTEXT_SLOT, QUESTION_SLOT] {
            if !template.contains(slot) {
                return Err(RagError::ConfigError(format!(
                    "prompt template must contain the {slot} placeholder"
                )));
            }
        }
        Ok(Self { template })
    }

    /// The raw template text.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Fill both slots in one pass. Placeholders appearing inside the
    /// question or context text are left as-is.
    pub fn render(&self, question: &str, context: &str) -> String {
        self.template
            .split(CONTEXT_SLOT)
            .map(|part| part.replace(QUESTION_SLOT, question))
            .collect::<Vec<_>>()
            .join(context)
    }
}

/// Join retrieved chunk texts in retrieval order.
pub fn build_context(results: &[SearchResult]) -> String {
    results.iter().map(|r| r.chunk.text.as_str()).collect::<Vec<_>>().join(CONTEXT_SEPARATOR)
}
