//! Error types for transcript export.

use thiserror::Error;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while rendering a transcript.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExportError> for debate_chat::ChatError {
    fn from(err: ExportError) -> Self {
        debate_chat::ChatError::Export(err.to_string())
    }
}
