//! Deterministic in-process providers shared by the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use charter_rag::{AnswerGenerator, EmbeddingProvider, GenerationRequest, RagError, Result};

pub const ARTICLE_1: &str =
    "Article 1. Pakistan is a Federal Republic to be known as the Islamic Republic of Pakistan.";
pub const ARTICLE_25: &str =
    "Article 25. All citizens are equal before law and are entitled to equal protection of law.";

pub fn constitution_text() -> String {
    format!("{ARTICLE_1}\n\n{ARTICLE_25}")
}

/// Bag-of-words embedder over a fixed vocabulary. Each dimension counts one
/// vocabulary word, so vectors are easy to reason about in assertions.
///
/// Calls are counted so tests can check when the provider was consulted.
pub struct VocabularyEmbedder {
    vocabulary: Vec<&'static str>,
    embed_calls: Mutex<usize>,
    batch_calls: Mutex<usize>,
}

impl VocabularyEmbedder {
    pub fn new() -> Self {
        Self {
            vocabulary: vec![
                "article",
                "1",
                "25",
                "pakistan",
                "federal",
                "republic",
                "citizens",
                "equal",
                "equality",
                "law",
                "treason",
            ],
            embed_calls: Mutex::new(0),
            batch_calls: Mutex::new(0),
        }
    }

    /// Number of single-text `embed` calls (one per question).
    pub fn embed_calls(&self) -> usize {
        *self.embed_calls.lock().unwrap()
    }

    /// Number of `embed_batch` calls (one per index build).
    pub fn batch_calls(&self) -> usize {
        *self.batch_calls.lock().unwrap()
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.vocabulary.len()];
        for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
            let word = word.to_lowercase();
            if let Some(i) = self.vocabulary.iter().position(|v| *v == word) {
                vector[i] += 1.0;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for VocabularyEmbedder {
    fn name(&self) -> &str {
        "vocabulary"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        *self.embed_calls.lock().unwrap() += 1;
        Ok(self.vectorize(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        *self.batch_calls.lock().unwrap() += 1;
        Ok(texts.iter().map(|text| self.vectorize(text)).collect())
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Embedder whose every call fails, as if the hosted API were unreachable.
pub struct UnreachableEmbedder;

#[async_trait]
impl EmbeddingProvider for UnreachableEmbedder {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(RagError::EmbeddingError {
            provider: "unreachable".to_string(),
            message: "connection refused".to_string(),
        })
    }

    fn dimensions(&self) -> usize {
        4
    }
}

/// Generator that returns a fixed reply and records every request it sees.
pub struct ScriptedGenerator {
    reply: std::result::Result<String, String>,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn replying(reply: &str) -> Self {
        Self { reply: Ok(reply.to_string()), requests: Mutex::new(Vec::new()) }
    }

    pub fn failing(message: &str) -> Self {
        Self { reply: Err(message.to_string()), requests: Mutex::new(Vec::new()) }
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AnswerGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(RagError::GenerationError {
                provider: "scripted".to_string(),
                message: message.clone(),
            }),
        }
    }
}
