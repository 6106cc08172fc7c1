//! Text and JSON rendering of answers and per-question failures.

use charter_rag::{Answer, RagError};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Excerpts longer than this many characters are cut in text output.
pub const EXCERPT_LIMIT: usize = 500;

const SEPARATOR: &str = "---";

#[derive(Serialize)]
struct AnswerOutput<'a> {
    question: &'a str,
    answer: &'a str,
    excerpts: Vec<ExcerptOutput<'a>>,
}

#[derive(Serialize)]
struct ExcerptOutput<'a> {
    rank: usize,
    score: f32,
    chunk_id: &'a str,
    text: &'a str,
}

#[derive(Serialize)]
struct FailureOutput<'a> {
    question: &'a str,
    error: String,
}

/// Cut `text` to `limit` characters, marking the cut with `...`.
pub fn truncate_excerpt(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_offset, _)) => format!("{}...", &text[..byte_offset]),
        None => text.to_string(),
    }
}

pub fn render_answer(answer: &Answer) -> String {
    let mut out = format!("Answer:\n{}\n\nRelevant constitutional text:\n", answer.text);
    for (i, source) in answer.sources.iter().enumerate() {
        out.push_str(&format!(
            "\nExcerpt {}:\n{}\n{SEPARATOR}\n",
            i + 1,
            truncate_excerpt(&source.chunk.text, EXCERPT_LIMIT)
        ));
    }
    out
}

pub fn render_failure(error: &RagError) -> String {
    format!(
        "Could not generate answer. Please try:\n\
         1. A different question\n\
         2. Checking your internet connection\n\
         3. Trying again later\n\n\
         Error: {error}"
    )
}

/// Render the full retrieved excerpts as a single JSON object.
pub fn render_answer_json(answer: &Answer) -> serde_json::Result<String> {
    let output = AnswerOutput {
        question: &answer.question,
        answer: &answer.text,
        excerpts: answer
            .sources
            .iter()
            .enumerate()
            .map(|(i, source)| ExcerptOutput {
                rank: i + 1,
                score: source.score,
                chunk_id: &source.chunk.id,
                text: &source.chunk.text,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&output)
}

pub fn render_failure_json(question: &str, error: &RagError) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&FailureOutput { question, error: error.to_string() })
}

/// Render the outcome of one question in the requested format.
pub fn render_outcome(
    format: OutputFormat,
    question: &str,
    outcome: &Result<Answer, RagError>,
) -> serde_json::Result<String> {
    match (format, outcome) {
        (OutputFormat::Text, Ok(answer)) => Ok(render_answer(answer)),
        (OutputFormat::Text, Err(error)) => Ok(render_failure(error)),
        (OutputFormat::Json, Ok(answer)) => render_answer_json(answer),
        (OutputFormat::Json, Err(error)) => render_failure_json(question, error),
    }
}
