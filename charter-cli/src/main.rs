//! # charter-qa
//!
//! Ask questions about the Constitution of Pakistan.
//!
//! ```bash
//! # Interactive shell
//! HUGGINGFACEHUB_API_TOKEN=hf_... charter-qa
//!
//! # One question, JSON output
//! charter-qa --question "What constitutes high treason?" --format json
//! ```

use std::process::ExitCode;

use anyhow::Result;
use charter_cli::{Cli, build_service, render_outcome, run_interactive};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "charter_rag=debug,charter_cli=debug"
    } else {
        "charter_rag=info,charter_cli=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let service = match build_service(&cli).await {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Failed to start: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(question) = cli.question.as_deref() {
        let outcome = service.ask(question).await;
        println!("{}", render_outcome(cli.format, question, &outcome)?);
        return Ok(if outcome.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    run_interactive(&service, cli.format).await?;
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env must be loaded before parsing so clap's env fallbacks see it
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
