//! CLI command definitions.
//!
//! This module defines the command structure for the Debate Partner CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod chat;
pub mod config;

/// Debate Partner - argue with an LLM that always takes the other side
#[derive(Parser)]
#[command(name = "debate")]
#[command(version, about = "Debate Partner - argue with an LLM that always takes the other side")]
#[command(long_about = r#"
Debate Partner starts a debate on a topic of your choice and answers every
argument from the opposing side. End the debate to get a neutral conclusion,
and export the transcript as a PDF.

COMMANDS:
  chat    → Start the interactive debate loop
  config  → Show the resolved provider settings

CONFIGURATION:
  GROQ_API_KEY / OPENAI_API_KEY   Provider credential (a .env file is read)
  DEBATE_PROVIDER                 groq (default) or openai
  DEBATE_LLM_MODEL                Model override
  debate.toml                     Optional settings file in the working directory

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Configuration error
  4 - Export error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Settings file (defaults to ./debate.toml when present)
    #[arg(short, long, global = true, env = "DEBATE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive debate
    Chat(chat::ChatArgs),

    /// Show the resolved settings
    Config(config::ConfigArgs),
}
