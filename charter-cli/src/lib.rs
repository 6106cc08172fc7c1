//! # charter-cli
//!
//! Command-line front end for `charter-rag`: parses settings, builds the
//! constitution index at startup, then answers questions either once
//! (`--question`) or in an interactive shell.

pub mod cli;
pub mod launcher;
pub mod render;
pub mod shell;

pub use cli::{Cli, DEFAULT_DOCUMENT_PATH, OutputFormat};
pub use launcher::{build_service, resolve_api_token};
pub use render::{EXCERPT_LIMIT, render_outcome, truncate_excerpt};
pub use shell::{SAMPLE_QUESTIONS, ShellInput, parse_input, run_interactive};
