//! Interactive question loop.

use anyhow::Context;
use charter_rag::PipelineService;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;

use crate::cli::OutputFormat;
use crate::render::render_outcome;

/// Example questions offered at startup and selectable by number.
pub const SAMPLE_QUESTIONS: [&str; 4] = [
    "What is the official name of Pakistan?",
    "What are the fundamental rights?",
    "What does Article 25 say about equality?",
    "What constitutes high treason?",
];

const PROMPT: &str = "question> ";

/// One line of shell input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Empty,
    Quit,
    ListSamples,
    Question(String),
}

/// Classify a line typed at the prompt.
///
/// A bare number selects the matching sample question; any other text is
/// asked as-is.
pub fn parse_input(line: &str) -> ShellInput {
    let line = line.trim();
    match line {
        "" => ShellInput::Empty,
        "quit" | "exit" | ":q" => ShellInput::Quit,
        ":samples" => ShellInput::ListSamples,
        _ => {
            let sample = line
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| SAMPLE_QUESTIONS.get(i));
            match sample {
                Some(question) => ShellInput::Question((*question).to_string()),
                None => ShellInput::Question(line.to_string()),
            }
        }
    }
}

pub fn samples_listing() -> String {
    let mut out = String::from("Try these questions (type the number):\n");
    for (i, question) in SAMPLE_QUESTIONS.iter().enumerate() {
        out.push_str(&format!("  {}. {question}\n", i + 1));
    }
    out
}

/// Add `question` to the session history. A failure only costs recall, so
/// it is logged and the question is still asked.
fn remember(editor: &mut DefaultEditor, question: &str) -> bool {
    match editor.add_history_entry(question) {
        Ok(added) => added,
        Err(e) => {
            warn!(error = %e, "failed to record history entry");
            false
        }
    }
}

/// Read questions until the user quits, answering each against `service`.
///
/// Per-question failures are printed and the loop continues.
pub async fn run_interactive(service: &PipelineService, format: OutputFormat) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new().context("Failed to initialise line editor")?;

    println!("Pakistan Constitution Q&A");
    println!("Ask anything about the Constitution of Pakistan. Type 'quit' to leave.\n");
    println!("{}", samples_listing());

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        };

        let question = match parse_input(&line) {
            ShellInput::Empty => continue,
            ShellInput::Quit => break,
            ShellInput::ListSamples => {
                println!("{}", samples_listing());
                continue;
            }
            ShellInput::Question(question) => question,
        };
        remember(&mut editor, &question);

        let outcome = service.ask(&question).await;
        if let Err(e) = &outcome {
            warn!(error = %e, "question could not be answered");
        }
        println!("{}\n", render_outcome(format, &question, &outcome)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_select_sample_questions() {
        assert_eq!(parse_input("3"), ShellInput::Question(SAMPLE_QUESTIONS[2].to_string()));
        assert_eq!(parse_input(" 1 "), ShellInput::Question(SAMPLE_QUESTIONS[0].to_string()));
    }

    #[test]
    fn out_of_range_numbers_are_asked_verbatim() {
        assert_eq!(parse_input("0"), ShellInput::Question("0".to_string()));
        assert_eq!(parse_input("1973"), ShellInput::Question("1973".to_string()));
    }

    #[test]
    fn commands_and_blank_lines() {
        assert_eq!(parse_input("   "), ShellInput::Empty);
        assert_eq!(parse_input("quit"), ShellInput::Quit);
        assert_eq!(parse_input("exit"), ShellInput::Quit);
        assert_eq!(parse_input(":q"), ShellInput::Quit);
        assert_eq!(parse_input(":samples"), ShellInput::ListSamples);
    }

    #[test]
    fn free_text_is_trimmed() {
        assert_eq!(
            parse_input("  What is Article 6?  "),
            ShellInput::Question("What is Article 6?".to_string())
        );
    }

    #[test]
    fn asked_questions_are_kept_in_history() {
        use rustyline::history::History;

        let mut editor = DefaultEditor::new().unwrap();
        assert!(remember(&mut editor, SAMPLE_QUESTIONS[0]));
        remember(&mut editor, SAMPLE_QUESTIONS[0]);
        assert!(remember(&mut editor, SAMPLE_QUESTIONS[3]));
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn listing_numbers_every_sample() {
        let listing = samples_listing();
        for (i, question) in SAMPLE_QUESTIONS.iter().enumerate() {
            assert!(listing.contains(&format!("{}. {question}", i + 1)));
        }
    }
}
