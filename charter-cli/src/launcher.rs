//! Startup: credential check, provider wiring, and index construction.

use std::sync::Arc;

use charter_rag::huggingface::{API_TOKEN_ENV, HuggingFaceEmbeddingProvider, HuggingFaceGenerator};
use charter_rag::{Document, PipelineService, RagError, Result};
use tracing::info;

use crate::cli::Cli;

/// Accept the access token only if it is present and non-blank.
pub fn resolve_api_token(token: Option<String>) -> Result<String> {
    match token {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(RagError::ConfigError(format!(
            "{API_TOKEN_ENV} is not set; export it or add it to a .env file"
        ))),
    }
}

/// Build the question-answering service described by `cli`.
///
/// Configuration and the access token are checked before the document is
/// read, so a missing credential never costs an index build.
///
/// # Errors
///
/// Returns [`RagError::ConfigError`] for invalid settings, a missing token,
/// or a missing document, and [`RagError::IndexBuildError`] if the document
/// cannot be indexed.
pub async fn build_service(cli: &Cli) -> Result<PipelineService> {
    let config = cli.rag_config()?;
    let token = resolve_api_token(cli.api_token.clone())?;

    let embedder = HuggingFaceEmbeddingProvider::new(token.clone())?
        .with_model(&cli.embedding_model, cli.embedding_dimensions)
        .with_api_base(&cli.api_base);
    let generator = HuggingFaceGenerator::new(token)?
        .with_model(&cli.generation_model)
        .with_api_base(&cli.api_base);

    let document = Document::from_path(&cli.document)?;
    info!(
        path = %cli.document.display(),
        embedding_model = %cli.embedding_model,
        generation_model = %cli.generation_model,
        "building constitution index"
    );

    PipelineService::builder()
        .config(config)
        .embedding_provider(Arc::new(embedder))
        .generator(Arc::new(generator))
        .document(document)
        .build()
        .await
}
