//! # debate_chat - Debate Partner session core
//!
//! This crate provides the conversation state machine behind Debate Partner:
//! - Onboarding with name, email, topic and style
//! - Per-turn opposing replies from an LLM
//! - A single neutral conclusion that ends the debate
//! - Transcript export through a pluggable renderer
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐  DebateAction   ┌──────────────────┐
//! │    Front end    │────────────────▶│ DebateController │
//! └─────────────────┘◀────────────────└────────┬─────────┘
//!                      ActionOutcome           │
//!            ┌─────────────────┬───────────────┼──────────────────┐
//!            ▼                 ▼               ▼                  ▼
//!    ┌──────────────┐ ┌────────────────┐ ┌──────────────┐ ┌──────────────────┐
//!    │ SessionState │ │TranscriptStore │ │TextGenerator │ │TranscriptExporter│
//!    └──────────────┘ └────────────────┘ └──────────────┘ └──────────────────┘
//! ```
//!
//! State lives in memory only; nothing is persisted between runs.

pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod llm;
pub mod prompts;
pub mod session;
pub mod transcript;
pub mod types;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use export::*;
pub use llm::*;
pub use session::*;
pub use transcript::*;
pub use types::*;
