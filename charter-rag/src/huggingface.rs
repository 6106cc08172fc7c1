//! Hugging Face Inference API providers for embeddings and answer generation.
//!
//! This module is only available when the `huggingface` feature is enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::generation::{AnswerGenerator, GenerationRequest};

/// The default Hugging Face Inference API base URL.
pub const DEFAULT_API_BASE: &str = "https://api-inference.huggingface.co";

/// The environment variable holding the Hugging Face access token.
pub const API_TOKEN_ENV: &str = "HUGGINGFACEHUB_API_TOKEN";

/// The default sentence-embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Output dimensionality of [`DEFAULT_EMBEDDING_MODEL`].
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;

/// The default text2text generation model.
pub const DEFAULT_GENERATION_MODEL: &str = "google/flan-t5-xxl";

/// Inputs sent per feature-extraction request.
const EMBED_BATCH_SIZE: usize = 32;

const PROVIDER: &str = "HuggingFace";

fn require_token(api_token: String) -> Result<String> {
    if api_token.trim().is_empty() {
        return Err(RagError::ConfigError(format!("{API_TOKEN_ENV} must not be empty")));
    }
    Ok(api_token)
}

/// Read the access token from [`API_TOKEN_ENV`].
///
/// # Errors
///
/// Returns [`RagError::ConfigError`] if the variable is unset or blank.
pub fn api_token_from_env() -> Result<String> {
    let token = std::env::var(API_TOKEN_ENV).map_err(|_| {
        RagError::ConfigError(format!("{API_TOKEN_ENV} environment variable not set"))
    })?;
    require_token(token)
}

// ── Inference API request/response types ───────────────────────────

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: &'a [&'a str],
    options: InferenceOptions,
}

#[derive(Serialize)]
struct TextGenerationRequest<'a> {
    inputs: &'a str,
    parameters: TextGenerationParameters,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct TextGenerationParameters {
    temperature: f32,
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextGenerationResponse {
    Many(Vec<GeneratedText>),
    One(GeneratedText),
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Pull a readable message out of an error body, falling back to the raw text.
fn error_detail(body: String) -> String {
    serde_json::from_str::<ErrorResponse>(&body).map(|e| e.error).unwrap_or(body)
}

fn parse_embeddings(body: &str, expected: usize, dimensions: usize) -> Result<Vec<Vec<f32>>> {
    let malformed = |message: String| RagError::EmbeddingError {
        provider: PROVIDER.to_string(),
        message: format!("malformed response: {message}"),
    };

    let vectors: Vec<Vec<f32>> =
        serde_json::from_str(body).map_err(|e| malformed(format!("failed to parse: {e}")))?;
    if vectors.len() != expected {
        return Err(malformed(format!("expected {expected} vectors, got {}", vectors.len())));
    }
    if let Some(bad) = vectors.iter().find(|v| v.len() != dimensions) {
        return Err(malformed(format!("expected {dimensions} dimensions, got {}", bad.len())));
    }
    Ok(vectors)
}

fn parse_generation(body: &str) -> Result<String> {
    if let Ok(err) = serde_json::from_str::<ErrorResponse>(body) {
        return Err(RagError::GenerationError {
            provider: PROVIDER.to_string(),
            message: err.error,
        });
    }

    let response: TextGenerationResponse =
        serde_json::from_str(body).map_err(|e| RagError::GenerationError {
            provider: PROVIDER.to_string(),
            message: format!("failed to parse response: {e}"),
        })?;

    match response {
        TextGenerationResponse::One(generated) => Ok(generated.generated_text),
        TextGenerationResponse::Many(generated) => {
            generated.into_iter().next().map(|g| g.generated_text).ok_or_else(|| {
                RagError::GenerationError {
                    provider: PROVIDER.to_string(),
                    message: "API returned no generations".to_string(),
                }
            })
        }
    }
}

/// An [`EmbeddingProvider`] backed by the Hugging Face feature-extraction pipeline.
///
/// # Configuration
///
/// - `model` – defaults to `sentence-transformers/all-MiniLM-L6-v2` (384 dimensions).
/// - `api_base` – defaults to the public Inference API.
///
/// # Example
///
/// ```rust,ignore
/// use charter_rag::huggingface::HuggingFaceEmbeddingProvider;
///
/// let provider = HuggingFaceEmbeddingProvider::new("hf_...")?;
/// let embedding = provider.embed("equality before law").await?;
/// ```
pub struct HuggingFaceEmbeddingProvider {
    client: reqwest::Client,
    api_token: String,
    api_base: String,
    model: String,
    dimensions: usize,
}

impl HuggingFaceEmbeddingProvider {
    /// Create a new provider with the given access token and the default model.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if the token is blank.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            api_token: require_token(api_token.into())?,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
        })
    }

    /// Set the model ID and the dimensionality it produces.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }

    /// Point the provider at a different Inference API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/pipeline/feature-extraction/{}", self.api_base, self.model)
    }

    async fn embed_request(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let request_body = FeatureExtractionRequest {
            inputs: texts,
            options: InferenceOptions { wait_for_model: true },
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_token)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = PROVIDER, error = %e, "request failed");
                RagError::EmbeddingError {
                    provider: PROVIDER.to_string(),
                    message: format!("request failed: {e}"),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| RagError::EmbeddingError {
            provider: PROVIDER.to_string(),
            message: format!("failed to read response: {e}"),
        })?;

        if !status.is_success() {
            error!(provider = PROVIDER, %status, "API error");
            return Err(RagError::EmbeddingError {
                provider: PROVIDER.to_string(),
                message: format!("API returned {status}: {}", error_detail(body)),
            });
        }

        parse_embeddings(&body, texts.len(), self.dimensions)
    }
}

#[async_trait]
impl EmbeddingProvider for HuggingFaceEmbeddingProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = PROVIDER, text_len = text.len(), "embedding single text");

        let results = self.embed_request(&[text]).await?;
        results.into_iter().next().ok_or_else(|| RagError::EmbeddingError {
            provider: PROVIDER.to_string(),
            message: "API returned empty response".to_string(),
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(EMBED_BATCH_SIZE) {
            debug!(
                provider = PROVIDER,
                batch_size = batch.len(),
                model = %self.model,
                "embedding batch"
            );
            vectors.extend(self.embed_request(batch).await?);
        }
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// An [`AnswerGenerator`] backed by a Hugging Face hosted text2text model.
///
/// Sends the rendered prompt with the request's temperature and token limit.
///
/// # Example
///
/// ```rust,ignore
/// use charter_rag::huggingface::HuggingFaceGenerator;
///
/// let generator = HuggingFaceGenerator::new("hf_...")?.with_model("google/flan-t5-large");
/// ```
pub struct HuggingFaceGenerator {
    client: reqwest::Client,
    api_token: String,
    api_base: String,
    model: String,
}

impl HuggingFaceGenerator {
    /// Create a new generator with the given access token and the default model.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if the token is blank.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            api_token: require_token(api_token.into())?,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_GENERATION_MODEL.to_string(),
        })
    }

    /// Set the model ID.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the generator at a different Inference API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.api_base, self.model)
    }
}

#[async_trait]
impl AnswerGenerator for HuggingFaceGenerator {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        debug!(
            provider = PROVIDER,
            model = %self.model,
            prompt_len = request.prompt.len(),
            "generating answer"
        );

        let request_body = TextGenerationRequest {
            inputs: &request.prompt,
            parameters: TextGenerationParameters {
                temperature: request.options.temperature,
                max_new_tokens: request.options.max_output_tokens,
                return_full_text: false,
            },
            options: InferenceOptions { wait_for_model: true },
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_token)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = PROVIDER, error = %e, "request failed");
                RagError::GenerationError {
                    provider: PROVIDER.to_string(),
                    message: format!("request failed: {e}"),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| RagError::GenerationError {
            provider: PROVIDER.to_string(),
            message: format!("failed to read response: {e}"),
        })?;

        if !status.is_success() {
            error!(provider = PROVIDER, %status, "API error");
            return Err(RagError::GenerationError {
                provider: PROVIDER.to_string(),
                message: format!("API returned {status}: {}", error_detail(body)),
            });
        }

        parse_generation(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_a_configuration_error() {
        assert!(matches!(HuggingFaceGenerator::new("  "), Err(RagError::ConfigError(_))));
        assert!(matches!(HuggingFaceEmbeddingProvider::new(""), Err(RagError::ConfigError(_))));
    }

    #[test]
    fn endpoints_strip_trailing_slash() {
        let embedder = HuggingFaceEmbeddingProvider::new("hf_test")
            .unwrap()
            .with_api_base("http://localhost:8080/");
        assert_eq!(
            embedder.endpoint(),
            "http://localhost:8080/pipeline/feature-extraction/sentence-transformers/all-MiniLM-L6-v2"
        );

        let generator =
            HuggingFaceGenerator::new("hf_test").unwrap().with_model("google/flan-t5-base");
        assert_eq!(
            generator.endpoint(),
            "https://api-inference.huggingface.co/models/google/flan-t5-base"
        );
    }

    #[test]
    fn providers_share_one_error_label() {
        let generator =
            HuggingFaceGenerator::new("hf_test").unwrap().with_model("google/flan-t5-base");
        let embedder = HuggingFaceEmbeddingProvider::new("hf_test").unwrap();
        assert_eq!(generator.name(), PROVIDER);
        assert_eq!(embedder.name(), PROVIDER);

        match parse_generation(r#"{"error": "loading"}"#).unwrap_err() {
            RagError::GenerationError { provider, .. } => assert_eq!(provider, generator.name()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parses_generation_list_and_object() {
        let listed = parse_generation(r#"[{"generated_text": "Equal before law."}]"#).unwrap();
        assert_eq!(listed, "Equal before law.");
        assert_eq!(parse_generation(r#"{"generated_text": "Islamabad"}"#).unwrap(), "Islamabad");
    }

    #[test]
    fn generation_error_body_is_surfaced() {
        let err = parse_generation(r#"{"error": "Model google/flan-t5-xxl is currently loading"}"#)
            .unwrap_err();
        match err {
            RagError::GenerationError { message, .. } => assert!(message.contains("loading")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_generation_list_is_an_error() {
        assert!(matches!(parse_generation("[]"), Err(RagError::GenerationError { .. })));
    }

    #[test]
    fn parses_embeddings_with_matching_shape() {
        let vectors = parse_embeddings("[[0.1, 0.2], [0.3, 0.4]]", 2, 2).unwrap();
        assert_eq!(vectors, vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
    }

    #[test]
    fn rejects_embeddings_with_wrong_shape() {
        assert!(matches!(
            parse_embeddings("[[0.1, 0.2]]", 2, 2),
            Err(RagError::EmbeddingError { .. })
        ));
        assert!(matches!(
            parse_embeddings("[[0.1, 0.2, 0.3]]", 1, 2),
            Err(RagError::EmbeddingError { .. })
        ));
        assert!(matches!(
            parse_embeddings(r#"{"error": "x"}"#, 1, 2),
            Err(RagError::EmbeddingError { .. })
        ));
    }

    #[test]
    fn error_detail_prefers_json_message() {
        let detail = error_detail(r#"{"error": "Authorization header is invalid"}"#.to_string());
        assert_eq!(detail, "Authorization header is invalid");
        assert_eq!(error_detail("Bad Gateway".to_string()), "Bad Gateway");
    }
}
