//! Data types for the source document, its chunks, search results, and answers.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{RagError, Result};

/// The source document containing text content and metadata.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The text content of the document.
    pub text: String,
    /// Key-value metadata associated with the document.
    pub metadata: HashMap<String, String>,
    /// Optional URI pointing to the original source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
}

impl Document {
    /// Create an in-memory document with no metadata.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into(), metadata: HashMap::new(), source_uri: None }
    }

    /// Read a UTF-8 document from disk.
    ///
    /// The document ID is the file stem and the path is recorded under the
    /// `source` metadata key.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if the file does not exist and
    /// [`RagError::IndexBuildError`] if it cannot be read as UTF-8 text.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            error!(path = %path.display(), "document file not found");
            return Err(RagError::ConfigError(format!(
                "document file not found: {}",
                path.display()
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            error!(path = %path.display(), error = %e, "failed to read document");
            RagError::IndexBuildError(format!("failed to read '{}': {e}", path.display()))
        })?;

        let id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let source = path.display().to_string();
        debug!(document.id = %id, chars = text.chars().count(), "loaded document");

        Ok(Self {
            id,
            text,
            metadata: HashMap::from([("source".to_string(), source.clone())]),
            source_uri: Some(source),
        })
    }
}

/// A segment of a [`Document`] with its vector embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk.
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// The vector embedding for this chunk's text.
    pub embedding: Vec<f32>,
    /// Key-value metadata inherited from the parent document plus chunk-specific fields.
    pub metadata: HashMap<String, String>,
    /// The ID of the parent [`Document`].
    pub document_id: String,
}

/// A retrieved [`Chunk`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}

/// A generated answer together with the chunks it was grounded on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// The question as submitted.
    pub question: String,
    /// The generated answer text, trimmed and never empty.
    pub text: String,
    /// The retrieved chunks supplied as context, nearest first.
    pub sources: Vec<SearchResult>,
}
