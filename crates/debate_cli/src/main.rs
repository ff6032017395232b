//! Debate Partner CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Configuration error
//! - 4: Export error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod repl;

use commands::{Cli, Commands};
use debate_chat::ChatError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const CONFIG_ERROR: u8 = 3;
    pub const EXPORT_ERROR: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    // Pick up GROQ_API_KEY and friends from a local .env
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logs go to stderr so the transcript on stdout stays readable
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.verbose, cli.quiet))),
        )
        .try_init();

    let result = match cli.command {
        Commands::Chat(args) => commands::chat::execute(args, cli.config).await,
        Commands::Config(args) => commands::config::execute(args, cli.config).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Log directives used when `RUST_LOG` is not set
fn default_filter(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debate=debug,warn"
    } else {
        "debate=info,warn"
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(chat_error) = e.downcast_ref::<ChatError>() {
        return match chat_error {
            ChatError::LlmNotConfigured | ChatError::Config(_) => ExitCodes::CONFIG_ERROR,
            ChatError::Export(_) => ExitCodes::EXPORT_ERROR,
            ChatError::Validation(_) => ExitCodes::INVALID_ARGS,
            _ => ExitCodes::GENERAL_ERROR,
        };
    }

    let msg = format!("{:#}", e).to_lowercase();
    if msg.contains("layout") || msg.contains("export") {
        ExitCodes::EXPORT_ERROR
    } else if msg.contains("config") || msg.contains("settings") {
        ExitCodes::CONFIG_ERROR
    } else if msg.contains("argument") || msg.contains("option") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
