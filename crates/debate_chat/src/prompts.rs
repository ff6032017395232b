//! Prompt text sent to the LLM provider.

use crate::types::{DebateStyle, Message};

/// Prefix that marks the conclusion entry in the transcript
pub const CONCLUSION_PREFIX: &str = "**Conclusion:**";

const SUMMARIZER_PROMPT: &str = r#"You are a Debate Summarizer Bot.
Your job is to read the entire debate and give a short, balanced conclusion (3-5 lines).
Be neutral, fair, and ensure the conclusion feels like a proper ending."#;

/// System prompt for a single rebuttal turn
pub fn rebuttal_system_prompt(topic: &str, style: DebateStyle) -> String {
    format!(
        r#"You are a Debate Partner Bot.
Your role is to always take the OPPOSITE stance of the user.
Debate topic: {topic}
Debate style: {style}.
Be respectful, logical, and engaging.

Important: Keep responses short (2-5 lines max).
Always finish with a complete thought or closing sentence.
Never leave the response hanging or incomplete."#,
        topic = topic,
        style = style,
    )
}

/// System prompt for the end-of-debate summary
pub fn summarizer_system_prompt() -> &'static str {
    SUMMARIZER_PROMPT
}

/// Whole transcript as `"<Role>: <content>"` lines
pub fn transcript_text(messages: &[Message]) -> String {
    messages
        .iter()
        .map(Message::transcript_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Transcript entry that records the conclusion
pub fn format_conclusion(conclusion: &str) -> String {
    format!("{} {}", CONCLUSION_PREFIX, conclusion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuttal_prompt_mentions_topic_and_style() {
        let prompt = rebuttal_system_prompt("Remote work", DebateStyle::Casual);
        assert!(prompt.contains("OPPOSITE stance"));
        assert!(prompt.contains("Debate topic: Remote work"));
        assert!(prompt.contains("Debate style: Casual."));
    }

    #[test]
    fn test_transcript_text_joins_lines() {
        let messages = vec![
            Message::user("Tabs are better"),
            Message::assistant("Spaces are more portable"),
        ];
        assert_eq!(
            transcript_text(&messages),
            "User: Tabs are better\nAssistant: Spaces are more portable"
        );
        assert_eq!(transcript_text(&[]), "");
    }

    #[test]
    fn test_format_conclusion() {
        assert_eq!(format_conclusion("Balanced view."), "**Conclusion:** Balanced view.");
    }
}
