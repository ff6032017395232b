//! Core types for the debate chat system.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// Message role in a debate transcript
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Capitalized label used in transcripts and exports
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }

    /// Wire name used by chat-completion APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single transcript message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID (UUID)
    pub id: String,
    /// Role of the message sender
    pub role: MessageRole,
    /// Message content
    pub content: String,
    /// When the message was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// `"<Role>: <content>"`, the line format shared by summaries and exports
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }
}

/// Debate tone, chosen at onboarding and fixed for the session
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DebateStyle {
    #[default]
    Formal,
    Casual,
    Academic,
    Friendly,
}

impl DebateStyle {
    /// All styles in the order they are offered at onboarding
    pub const ALL: [DebateStyle; 4] = [
        DebateStyle::Formal,
        DebateStyle::Casual,
        DebateStyle::Academic,
        DebateStyle::Friendly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Formal => "Formal",
            Self::Casual => "Casual",
            Self::Academic => "Academic",
            Self::Friendly => "Friendly",
        }
    }
}

impl fmt::Display for DebateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DebateStyle {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ChatError::Validation(format!(
                    "Unknown debate style '{}'. Expected one of: Formal, Casual, Academic, Friendly",
                    wanted
                ))
            })
    }
}

/// Onboarding form submitted to start a debate
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Onboarding {
    pub name: String,
    pub email: String,
    pub topic: String,
    pub style: DebateStyle,
}

impl Onboarding {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        topic: impl Into<String>,
        style: DebateStyle,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            topic: topic.into(),
            style,
        }
    }

    /// Names of the required fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.topic.trim().is_empty() {
            missing.push("topic");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_parsing_is_case_insensitive() {
        assert_eq!("academic".parse::<DebateStyle>().unwrap(), DebateStyle::Academic);
        assert_eq!(" Friendly ".parse::<DebateStyle>().unwrap(), DebateStyle::Friendly);
        assert!("sarcastic".parse::<DebateStyle>().is_err());
    }

    #[test]
    fn test_transcript_line() {
        assert_eq!(Message::user("Cats win").transcript_line(), "User: Cats win");
        assert_eq!(
            Message::assistant("Dogs win").transcript_line(),
            "Assistant: Dogs win"
        );
    }

    #[test]
    fn test_missing_fields() {
        let form = Onboarding::new("Ana", " ", "", DebateStyle::Casual);
        assert_eq!(form.missing_fields(), vec!["email", "topic"]);
        assert!(Onboarding::new("Ana", "a@x.com", "AI", DebateStyle::Formal)
            .missing_fields()
            .is_empty());
    }

    #[test]
    fn test_message_role_serializes_lowercase() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
