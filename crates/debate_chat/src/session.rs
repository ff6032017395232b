//! Session state for a single debate.
//!
//! Holds the onboarding fields, the active flag and the optional conclusion.
//! Only the controller mutates it; front ends read it through
//! [`SessionState::snapshot`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{DebateStyle, Onboarding};

/// Phase derived from the session flags
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebatePhase {
    /// Waiting for name, email, topic and style
    Onboarding,
    /// Accepting arguments
    Active,
    /// Ended with a conclusion; only export and clear are legal
    Concluded,
}

impl fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Onboarding => "Onboarding",
            Self::Active => "Active",
            Self::Concluded => "Concluded",
        };
        f.write_str(name)
    }
}

/// Mutable per-session fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(rename = "participantName")]
    pub(crate) participant_name: String,
    #[serde(rename = "participantEmail")]
    pub(crate) participant_email: String,
    pub(crate) topic: String,
    pub(crate) style: DebateStyle,
    #[serde(rename = "debateActive")]
    pub(crate) debate_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) conclusion: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DebatePhase {
        if self.debate_active {
            DebatePhase::Active
        } else if self.conclusion.is_some() {
            DebatePhase::Concluded
        } else {
            DebatePhase::Onboarding
        }
    }

    pub fn participant_name(&self) -> &str {
        &self.participant_name
    }

    pub fn participant_email(&self) -> &str {
        &self.participant_email
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn style(&self) -> DebateStyle {
        self.style
    }

    pub fn is_active(&self) -> bool {
        self.debate_active
    }

    pub fn conclusion(&self) -> Option<&str> {
        self.conclusion.as_deref()
    }

    /// Store the onboarding fields verbatim and open the debate
    pub(crate) fn begin(&mut self, form: Onboarding) {
        self.participant_name = form.name;
        self.participant_email = form.email;
        self.topic = form.topic;
        self.style = form.style;
        self.conclusion = None;
        self.debate_active = true;
    }

    pub(crate) fn conclude(&mut self, conclusion: String) {
        self.conclusion = Some(conclusion);
        self.debate_active = false;
    }

    /// Back to onboarding. Participant fields are kept so a front end can
    /// prefill the next form; they are overwritten by the next `begin`.
    pub(crate) fn reset(&mut self) {
        self.conclusion = None;
        self.debate_active = false;
    }

    pub fn snapshot(&self, transcript_len: usize) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase(),
            participant_name: self.participant_name.clone(),
            participant_email: self.participant_email.clone(),
            topic: self.topic.clone(),
            style: self.style,
            conclusion: self.conclusion.clone(),
            message_count: transcript_len,
        }
    }
}

/// Read-only view of the session for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: DebatePhase,
    #[serde(rename = "participantName")]
    pub participant_name: String,
    #[serde(rename = "participantEmail")]
    pub participant_email: String,
    pub topic: String,
    pub style: DebateStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
    #[serde(rename = "messageCount")]
    pub message_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        let mut state = SessionState::new();
        assert_eq!(state.phase(), DebatePhase::Onboarding);

        state.begin(Onboarding::new("Ana", "a@x.com", "AI ethics", DebateStyle::Academic));
        assert_eq!(state.phase(), DebatePhase::Active);
        assert_eq!(state.style(), DebateStyle::Academic);

        state.conclude("Balanced view.".to_string());
        assert_eq!(state.phase(), DebatePhase::Concluded);
        assert!(!state.is_active());

        state.reset();
        assert_eq!(state.phase(), DebatePhase::Onboarding);
        assert!(state.conclusion().is_none());
        assert_eq!(state.participant_name(), "Ana");
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let mut state = SessionState::new();
        state.begin(Onboarding::new("Ana", "a@x.com", "AI ethics", DebateStyle::Formal));

        let json = serde_json::to_value(state.snapshot(2)).unwrap();
        assert_eq!(json["phase"], "active");
        assert_eq!(json["participantName"], "Ana");
        assert_eq!(json["messageCount"], 2);
        assert!(json.get("conclusion").is_none());
    }
}
