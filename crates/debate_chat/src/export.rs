//! Transcript exporter seam.

use crate::error::ChatResult;
use crate::types::Message;

/// Renders a transcript into a portable document.
///
/// Implementations must be deterministic: the same ordered messages give the
/// same bytes.
pub trait TranscriptExporter: Send + Sync {
    fn render(&self, messages: &[Message]) -> ChatResult<Vec<u8>>;

    /// MIME type of the rendered bytes
    fn content_type(&self) -> &'static str {
        "application/octet-stream"
    }

    /// Suggested file name for a download or save
    fn file_name(&self) -> &'static str {
        "transcript"
    }
}

/// Plain-text exporter, one `"<Role>: <content>"` line per message
#[derive(Debug, Clone, Default)]
pub struct PlainTextExporter;

impl TranscriptExporter for PlainTextExporter {
    fn render(&self, messages: &[Message]) -> ChatResult<Vec<u8>> {
        let mut text = String::from("Debate Transcript\n\n");
        for message in messages {
            text.push_str(&message.transcript_line());
            text.push('\n');
        }
        Ok(text.into_bytes())
    }

    fn content_type(&self) -> &'static str {
        "text/plain"
    }

    fn file_name(&self) -> &'static str {
        "debate.txt"
    }
}
