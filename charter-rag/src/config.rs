//! Configuration for the question-answering pipeline.

use serde::{Deserialize, Serialize};

use crate::chunking::DEFAULT_SEPARATORS;
use crate::error::{RagError, Result};
use crate::generation::GenerationOptions;

/// Configuration parameters for the question-answering pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Maximum number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Split boundaries in priority order. The empty string means "any character".
    pub separators: Vec<String>,
    /// Number of chunks retrieved as context for each question.
    pub top_k: usize,
    /// Decoding policy passed to the answer generator.
    pub generation: GenerationOptions,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 100,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
            top_k: 3,
            generation: GenerationOptions::default(),
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }

    /// Check that the parameters are consistent.
    ///
    /// Configs assembled as struct literals or deserialized bypass the
    /// builder, so the pipeline calls this again before indexing.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `chunk_overlap >= chunk_size`
    /// - `top_k == 0`
    /// - `separators` is empty
    /// - `temperature` is not within `0.0..=2.0`
    /// - `max_output_tokens == 0`
    pub fn validate(&self) -> Result<()> {
        if self.chunk_overlap >= self.chunk_size {
            return Err(RagError::ConfigError(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        if self.separators.is_empty() {
            return Err(RagError::ConfigError("at least one separator is required".to_string()));
        }
        let temperature = self.generation.temperature;
        if !temperature.is_finite() || !(0.0..=2.0).contains(&temperature) {
            return Err(RagError::ConfigError(format!(
                "temperature ({temperature}) must be between 0.0 and 2.0"
            )));
        }
        if self.generation.max_output_tokens == 0 {
            return Err(RagError::ConfigError(
                "max_output_tokens must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Replace the split boundaries, highest priority first.
    pub fn separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    /// Set the number of chunks retrieved per question.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the sampling temperature for answer generation.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.generation.temperature = temperature;
        self
    }

    /// Set the maximum number of tokens the generator may produce.
    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.config.generation.max_output_tokens = tokens;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] for any violation listed on
    /// [`RagConfig::validate`].
    pub fn build(self) -> Result<RagConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
