//! Line parser for the interactive debate loop.
//!
//! Plain text is an argument; lines starting with `/` are commands.

use std::path::PathBuf;

use debate_chat::{ChatError, ChatResult, DebateAction, DebateStyle, Onboarding};

pub const HELP: &str = r#"Commands:
  <text>                                   Submit an argument
  /start <name> | <email> | <topic> [| <style>]
                                           Start a debate (style: Formal, Casual, Academic, Friendly)
  /end                                     End the debate with a conclusion
  /export [path]                           Save the transcript
  /clear                                   Clear history and return to onboarding
  /status                                  Show the session state
  /help                                    Show this help
  /quit                                    Leave"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Action(DebateAction),
    /// Export, optionally to a specific path
    Export(Option<PathBuf>),
    Status,
    Help,
    Quit,
    Empty,
}

pub fn parse_line(line: &str) -> ChatResult<ReplCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(ReplCommand::Empty);
    }

    let Some(command) = trimmed.strip_prefix('/') else {
        return Ok(ReplCommand::Action(DebateAction::SubmitArgument(
            trimmed.to_string(),
        )));
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "start" => parse_start(rest).map(|form| ReplCommand::Action(DebateAction::StartDebate(form))),
        "end" => Ok(ReplCommand::Action(DebateAction::EndDebate)),
        "clear" => Ok(ReplCommand::Action(DebateAction::ClearHistory)),
        "export" => Ok(ReplCommand::Export(
            (!rest.is_empty()).then(|| PathBuf::from(rest)),
        )),
        "status" => Ok(ReplCommand::Status),
        "help" | "?" => Ok(ReplCommand::Help),
        "quit" | "exit" => Ok(ReplCommand::Quit),
        other => Err(ChatError::Validation(format!(
            "Unknown command '/{}'. Type /help for the list",
            other
        ))),
    }
}

/// `name | email | topic [| style]`. Blank fields are passed through so the
/// controller reports them.
fn parse_start(rest: &str) -> ChatResult<Onboarding> {
    let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
    if fields.len() < 3 || fields.len() > 4 {
        return Err(ChatError::Validation(
            "Usage: /start <name> | <email> | <topic> [| <style>]".to_string(),
        ));
    }

    let style = match fields.get(3) {
        Some(style) if !style.is_empty() => style.parse::<DebateStyle>()?,
        _ => DebateStyle::default(),
    };

    Ok(Onboarding::new(fields[0], fields[1], fields[2], style))
}
