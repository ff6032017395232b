//! Error types for the debate chat system.

use thiserror::Error;

/// Result type for chat operations
pub type ChatResult<T> = Result<T, ChatError>;

/// Chat system errors
///
/// Every variant is reported at the action boundary. None of them leave the
/// session or transcript half-updated.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Onboarding fields or an argument failed the non-empty check
    #[error("Validation error: {0}")]
    Validation(String),

    /// The action is not legal in the current phase
    #[error("Invalid state for {operation}: current={current}, expected={expected}")]
    InvalidState {
        current: String,
        expected: String,
        operation: String,
    },

    /// No provider credential is available
    #[error("LLM not configured. Set GROQ_API_KEY or OPENAI_API_KEY")]
    LlmNotConfigured,

    /// Settings could not be loaded or are invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM request failed
    #[error("LLM error: {0}")]
    LlmError(String),

    /// The provider answered but the text was blank
    #[error("LLM returned an empty response for {0}")]
    EmptyResponse(String),

    /// The transcript renderer failed
    #[error("Export error: {0}")]
    Export(String),
}

impl ChatError {
    /// Whether the error is a configuration problem rather than a per-action one
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::LlmNotConfigured | Self::Config(_))
    }
}

impl From<toml::de::Error> for ChatError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
