//! Debate controller.
//!
//! The state machine that owns the session state and the transcript:
//!
//! ```text
//! Onboarding ──start──▶ Active ──end──▶ Concluded
//!      ▲                  │ ▲              │
//!      │                  └─┘ submit       │
//!      └──────────── clear (from any) ─────┘
//! ```
//!
//! Generation happens before any mutation, so a failed call leaves the
//! session exactly as it was.

use tracing::{info, warn};

use crate::error::{ChatError, ChatResult};
use crate::export::TranscriptExporter;
use crate::llm::TextGenerator;
use crate::prompts;
use crate::session::{DebatePhase, SessionSnapshot, SessionState};
use crate::transcript::TranscriptStore;
use crate::types::{Message, Onboarding};

/// A discrete user intent forwarded by a front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebateAction {
    StartDebate(Onboarding),
    SubmitArgument(String),
    EndDebate,
    ExportTranscript,
    ClearHistory,
}

impl DebateAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartDebate(_) => "start_debate",
            Self::SubmitArgument(_) => "submit_argument",
            Self::EndDebate => "end_debate",
            Self::ExportTranscript => "export_transcript",
            Self::ClearHistory => "clear_history",
        }
    }
}

/// Result of a successfully handled action
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    Started { name: String, topic: String },
    Rebuttal(Message),
    Concluded { conclusion: String },
    /// `None` when the transcript was empty
    Exported(Option<Vec<u8>>),
    Cleared,
}

pub struct DebateController {
    state: SessionState,
    transcript: TranscriptStore,
    generator: Option<Box<dyn TextGenerator>>,
    exporter: Box<dyn TranscriptExporter>,
}

impl DebateController {
    /// Create a controller. Without a generator the debate can still be
    /// started, exported and cleared, but arguments and conclusions fail
    /// with [`ChatError::LlmNotConfigured`].
    pub fn new(
        generator: Option<Box<dyn TextGenerator>>,
        exporter: Box<dyn TranscriptExporter>,
    ) -> Self {
        Self {
            state: SessionState::new(),
            transcript: TranscriptStore::new(),
            generator,
            exporter,
        }
    }

    /// Check if a text generator is available
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> DebatePhase {
        self.state.phase()
    }

    pub fn transcript(&self) -> &[Message] {
        self.transcript.all()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot(self.transcript.len())
    }

    pub fn exporter(&self) -> &dyn TranscriptExporter {
        self.exporter.as_ref()
    }

    /// Route an action to its handler
    pub async fn dispatch(&mut self, action: DebateAction) -> ChatResult<ActionOutcome> {
        let operation = action.name();
        let result = match action {
            DebateAction::StartDebate(form) => self.start_debate(form).map(|_| ActionOutcome::Started {
                name: self.state.participant_name().to_string(),
                topic: self.state.topic().to_string(),
            }),
            DebateAction::SubmitArgument(text) => self
                .submit_argument(&text)
                .await
                .map(ActionOutcome::Rebuttal),
            DebateAction::EndDebate => self
                .end_debate()
                .await
                .map(|conclusion| ActionOutcome::Concluded { conclusion }),
            DebateAction::ExportTranscript => self.export_transcript().map(ActionOutcome::Exported),
            DebateAction::ClearHistory => {
                self.clear_history();
                Ok(ActionOutcome::Cleared)
            }
        };

        if let Err(ref e) = result {
            warn!("Action {} rejected: {}", operation, e);
        }
        result
    }

    /// Validate the onboarding form and open the debate
    pub fn start_debate(&mut self, form: Onboarding) -> ChatResult<()> {
        self.require_phase(DebatePhase::Onboarding, "start_debate")?;

        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(ChatError::Validation(format!(
                "Please fill in all details before starting (missing: {})",
                missing.join(", ")
            )));
        }

        info!(
            "Debate started by {} on '{}' ({} style)",
            form.name, form.topic, form.style
        );
        self.state.begin(form);
        Ok(())
    }

    /// Append the argument and its rebuttal, or nothing at all
    pub async fn submit_argument(&mut self, text: &str) -> ChatResult<Message> {
        self.require_phase(DebatePhase::Active, "submit_argument")?;

        if text.trim().is_empty() {
            return Err(ChatError::Validation("Argument must not be empty".to_string()));
        }

        let generator = self.generator.as_ref().ok_or(ChatError::LlmNotConfigured)?;
        let reply = generator
            .opposing_argument(self.state.topic(), self.state.style(), text)
            .await?;
        let reply = non_empty(reply, "rebuttal")?;

        let rebuttal = Message::assistant(reply);
        self.transcript.append(Message::user(text));
        self.transcript.append(rebuttal.clone());
        info!("Rebuttal recorded ({} messages)", self.transcript.len());

        Ok(rebuttal)
    }

    /// Summarize the whole transcript and close the debate
    pub async fn end_debate(&mut self) -> ChatResult<String> {
        self.require_phase(DebatePhase::Active, "end_debate")?;

        let generator = self.generator.as_ref().ok_or(ChatError::LlmNotConfigured)?;
        let summary = generator.summarize(self.transcript.all()).await?;
        let conclusion = non_empty(summary, "conclusion")?;

        self.transcript
            .append(Message::assistant(prompts::format_conclusion(&conclusion)));
        self.state.conclude(conclusion.clone());
        info!("Debate concluded after {} messages", self.transcript.len());

        Ok(conclusion)
    }

    /// Render the transcript; `None` when there is nothing to export
    pub fn export_transcript(&self) -> ChatResult<Option<Vec<u8>>> {
        if self.transcript.is_empty() {
            return Ok(None);
        }
        let bytes = self.exporter.render(self.transcript.all())?;
        info!(
            "Exported {} messages ({} bytes)",
            self.transcript.len(),
            bytes.len()
        );
        Ok(Some(bytes))
    }

    /// Drop every message and return to onboarding
    pub fn clear_history(&mut self) {
        self.transcript.clear();
        self.state.reset();
        info!("Chat history cleared");
    }

    fn require_phase(&self, expected: DebatePhase, operation: &str) -> ChatResult<()> {
        let current = self.state.phase();
        if current != expected {
            return Err(ChatError::InvalidState {
                current: current.to_string(),
                expected: expected.to_string(),
                operation: operation.to_string(),
            });
        }
        Ok(())
    }
}

fn non_empty(text: String, what: &str) -> ChatResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ChatError::EmptyResponse(what.to_string()));
    }
    Ok(trimmed.to_string())
}
