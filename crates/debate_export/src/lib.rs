//! PDF transcript rendering for Debate Partner.
//!
//! This crate provides:
//! - Page layout with pagination and word wrapping via [`layout`]
//! - Reproducible PDF assembly on `lopdf` via [`pdf`]
//! - [`PdfTranscriptRenderer`], the [`TranscriptExporter`] used by the CLI
//!
//! The same ordered messages always give the same bytes: message IDs and
//! timestamps are ignored, and the document carries no creation date.

pub mod error;
pub mod layout;
pub mod pdf;

use debate_chat::{ChatResult, Message, TranscriptExporter};
use tracing::debug;

pub use error::{ExportError, ExportResult};
pub use layout::{LayoutOptions, PageLayout};

/// Default file name for saved transcripts
pub const DEFAULT_PDF_FILE: &str = "debate.pdf";

#[derive(Debug, Clone, Default)]
pub struct PdfTranscriptRenderer {
    options: LayoutOptions,
}

impl PdfTranscriptRenderer {
    pub fn new(options: LayoutOptions) -> ExportResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lay out and serialize the transcript
    pub fn render_pdf(&self, messages: &[Message]) -> ExportResult<Vec<u8>> {
        let pages = layout::layout_transcript(messages, &self.options)?;
        debug!("Rendering {} messages onto {} pages", messages.len(), pages.len());
        pdf::write_document(&pages)
    }
}

impl TranscriptExporter for PdfTranscriptRenderer {
    fn render(&self, messages: &[Message]) -> ChatResult<Vec<u8>> {
        Ok(self.render_pdf(messages)?)
    }

    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn file_name(&self) -> &'static str {
        DEFAULT_PDF_FILE
    }
}
