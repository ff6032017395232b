//! Chat command - Interactive debate loop.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use debate_chat::{
    ActionOutcome, ChatError, DebateAction, DebateController, DebateSettings, DebateStyle,
    LlmAdapter, Onboarding, PlainTextExporter, TextGenerator, TranscriptExporter,
};
use debate_export::{LayoutOptions, PdfTranscriptRenderer};

use crate::repl::{self, ReplCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Pdf,
    Text,
}

#[derive(Args)]
pub struct ChatArgs {
    /// Your name (starts the debate immediately together with email and topic)
    #[arg(long)]
    name: Option<String>,

    /// Your email
    #[arg(long)]
    email: Option<String>,

    /// Debate topic, e.g. "AI is good for humanity"
    #[arg(long)]
    topic: Option<String>,

    /// Debate style
    #[arg(long, default_value = "Formal", value_parser = parse_style)]
    style: DebateStyle,

    /// Transcript format written by /export
    #[arg(long, value_enum, default_value_t = ExportFormat::Pdf)]
    format: ExportFormat,

    /// Default path for /export (defaults to debate.pdf or debate.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum characters per PDF line; wider text also wraps at the page edge
    #[arg(long, default_value_t = 90)]
    wrap_columns: usize,
}

fn parse_style(value: &str) -> std::result::Result<DebateStyle, String> {
    value.parse::<DebateStyle>().map_err(|e| e.to_string())
}

/// Whether the loop should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn execute(args: ChatArgs, config: Option<PathBuf>) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let settings = DebateSettings::load(config.as_deref(), &current_dir)?;

    let generator: Option<Box<dyn TextGenerator>> = match LlmAdapter::from_settings(&settings) {
        Ok(adapter) => {
            info!(
                "Using {} model {}",
                adapter.provider().as_str(),
                adapter.model()
            );
            Some(Box::new(adapter))
        }
        Err(e) if e.is_configuration() => {
            warn!("Text generation disabled: {}", e);
            println!("❌ {}", e);
            println!("   You can still start a debate, but arguments and conclusions need a key.");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let exporter: Box<dyn TranscriptExporter> = match args.format {
        ExportFormat::Pdf => Box::new(
            PdfTranscriptRenderer::new(LayoutOptions::default().with_wrap_columns(args.wrap_columns))
                .context("Invalid PDF layout options")?,
        ),
        ExportFormat::Text => Box::new(PlainTextExporter),
    };
    let export_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(exporter.file_name()));

    let controller = DebateController::new(generator, exporter);
    let mut shell = DebateShell::new(controller, export_path, std::io::stdout());

    println!("🎤 Debate Partner");
    if let (Some(name), Some(email), Some(topic)) = (args.name, args.email, args.topic) {
        let form = Onboarding::new(name, email, topic, args.style);
        shell
            .handle(ReplCommand::Action(DebateAction::StartDebate(form)))
            .await?;
    } else {
        println!("👤 Start with: /start <name> | <email> | <topic> [| <style>]  (/help for more)");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        shell.prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match repl::parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                shell.report(&e)?;
                continue;
            }
        };

        if shell.handle(command).await? == Flow::Quit {
            break;
        }
    }

    println!("👋 Bye");
    Ok(())
}

/// Front end state: the controller plus where exports go
pub struct DebateShell<W: Write> {
    controller: DebateController,
    export_path: PathBuf,
    out: W,
}

impl<W: Write> DebateShell<W> {
    pub fn new(controller: DebateController, export_path: PathBuf, out: W) -> Self {
        Self {
            controller,
            export_path,
            out,
        }
    }

    pub fn controller(&self) -> &DebateController {
        &self.controller
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "{} > ", self.controller.phase())?;
        self.out.flush()?;
        Ok(())
    }

    /// Print an action-level error; the loop keeps going
    fn report(&mut self, error: &ChatError) -> Result<()> {
        let icon = match error {
            ChatError::Validation(_) | ChatError::InvalidState { .. } => "⚠️ ",
            _ => "❌",
        };
        writeln!(self.out, "{} {}", icon, error)?;
        Ok(())
    }

    /// Handle one parsed line. Only I/O failures on the output escape.
    pub async fn handle(&mut self, command: ReplCommand) -> Result<Flow> {
        match command {
            ReplCommand::Empty => {}
            ReplCommand::Help => writeln!(self.out, "{}", repl::HELP)?,
            ReplCommand::Quit => return Ok(Flow::Quit),
            ReplCommand::Status => self.print_status()?,
            ReplCommand::Export(path) => {
                let path = path.unwrap_or_else(|| self.export_path.clone());
                match self.controller.dispatch(DebateAction::ExportTranscript).await {
                    Ok(ActionOutcome::Exported(bytes)) => self.save_export(bytes, &path)?,
                    Ok(_) => {}
                    Err(e) => self.report(&e)?,
                }
            }
            ReplCommand::Action(action) => match self.controller.dispatch(action).await {
                Ok(outcome) => self.print_outcome(outcome)?,
                Err(e) => self.report(&e)?,
            },
        }
        Ok(Flow::Continue)
    }

    fn print_outcome(&mut self, outcome: ActionOutcome) -> Result<()> {
        match outcome {
            ActionOutcome::Started { name, topic } => {
                writeln!(self.out, "✅ Welcome {}! Debate started on: {}", name, topic)?;
            }
            ActionOutcome::Rebuttal(message) => {
                writeln!(self.out, "{}", message.transcript_line())?;
            }
            ActionOutcome::Concluded { conclusion } => {
                writeln!(self.out, "📌 Debate Conclusion")?;
                writeln!(self.out, "{}", conclusion)?;
            }
            ActionOutcome::Exported(bytes) => {
                let path = self.export_path.clone();
                self.save_export(bytes, &path)?;
            }
            ActionOutcome::Cleared => writeln!(self.out, "✅ Chat history cleared")?,
        }
        Ok(())
    }

    fn save_export(&mut self, bytes: Option<Vec<u8>>, path: &Path) -> Result<()> {
        let Some(bytes) = bytes else {
            writeln!(self.out, "⚠️  Nothing to export yet")?;
            return Ok(());
        };

        match std::fs::write(path, &bytes) {
            Ok(()) => {
                info!("Transcript written to {}", path.display());
                writeln!(
                    self.out,
                    "📄 Transcript saved to {} ({} bytes)",
                    path.display(),
                    bytes.len()
                )?;
            }
            Err(e) => {
                let error = ChatError::Export(format!("Cannot write {}: {}", path.display(), e));
                self.report(&error)?;
            }
        }
        Ok(())
    }

    fn print_status(&mut self) -> Result<()> {
        let snapshot = self.controller.snapshot();
        writeln!(self.out, "Phase: {}", snapshot.phase)?;
        if !snapshot.participant_name.is_empty() {
            writeln!(
                self.out,
                "Participant: {} <{}>",
                snapshot.participant_name, snapshot.participant_email
            )?;
            writeln!(self.out, "Topic: {} ({} style)", snapshot.topic, snapshot.style)?;
        }
        writeln!(self.out, "Messages: {}", snapshot.message_count)?;
        if let Some(conclusion) = snapshot.conclusion {
            writeln!(self.out, "Conclusion: {}", conclusion)?;
        }
        if !self.controller.has_generator() {
            writeln!(self.out, "LLM: not configured")?;
        }
        Ok(())
    }
}
