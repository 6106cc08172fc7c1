//! Command-line arguments.
//!
//! Every setting can also come from the environment (or a `.env` file), so
//! a deployment can be configured without touching the command line.

use std::path::PathBuf;

use charter_rag::huggingface::{
    API_TOKEN_ENV, DEFAULT_API_BASE, DEFAULT_EMBEDDING_DIMENSIONS, DEFAULT_EMBEDDING_MODEL,
    DEFAULT_GENERATION_MODEL,
};
use charter_rag::{RagConfig, Result};
use clap::Parser;

/// Where the constitution text is expected when no path is given.
pub const DEFAULT_DOCUMENT_PATH: &str = "constitution/pak_constitution.txt";

#[derive(Parser, Debug, Clone)]
#[command(name = "charter-qa")]
#[command(about = "Ask questions about the Constitution of Pakistan")]
#[command(version)]
pub struct Cli {
    /// Path to the constitution text file
    #[arg(short, long, env = "CHARTER_DOCUMENT", default_value = DEFAULT_DOCUMENT_PATH)]
    pub document: PathBuf,

    /// Maximum chunk size in characters
    #[arg(long, env = "CHARTER_CHUNK_SIZE", default_value_t = 1000)]
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks
    #[arg(long, env = "CHARTER_CHUNK_OVERLAP", default_value_t = 100)]
    pub chunk_overlap: usize,

    /// Number of excerpts retrieved per question
    #[arg(short = 'k', long, env = "CHARTER_TOP_K", default_value_t = 3)]
    pub top_k: usize,

    /// Hugging Face sentence-embedding model
    #[arg(long, env = "CHARTER_EMBEDDING_MODEL", default_value = DEFAULT_EMBEDDING_MODEL)]
    pub embedding_model: String,

    /// Output dimensionality of the embedding model
    #[arg(long, env = "CHARTER_EMBEDDING_DIMENSIONS", default_value_t = DEFAULT_EMBEDDING_DIMENSIONS)]
    pub embedding_dimensions: usize,

    /// Hugging Face text2text generation model
    #[arg(long, env = "CHARTER_GENERATION_MODEL", default_value = DEFAULT_GENERATION_MODEL)]
    pub generation_model: String,

    /// Sampling temperature for answer generation
    #[arg(long, env = "CHARTER_TEMPERATURE", default_value_t = 0.1)]
    pub temperature: f32,

    /// Maximum number of tokens in a generated answer
    #[arg(long, env = "CHARTER_MAX_NEW_TOKENS", default_value_t = 512)]
    pub max_new_tokens: u32,

    /// Inference API base URL
    #[arg(long, env = "CHARTER_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Hugging Face access token
    #[arg(long, env = API_TOKEN_ENV, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, env = "CHARTER_FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Ask a single question and exit instead of starting the shell
    #[arg(short, long)]
    pub question: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Cli {
    /// Build the validated pipeline configuration from the parsed flags.
    pub fn rag_config(&self) -> Result<RagConfig> {
        RagConfig::builder()
            .chunk_size(self.chunk_size)
            .chunk_overlap(self.chunk_overlap)
            .top_k(self.top_k)
            .temperature(self.temperature)
            .max_output_tokens(self.max_new_tokens)
            .build()
    }
}
