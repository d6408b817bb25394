use schemars::JsonSchema;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Function,
    Tool,
    Data,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
            Self::Function => "function",
            Self::Tool => "tool",
            Self::Data => "data",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, JsonSchema)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    fn transcript_line(&self) -> String {
        match self.role {
            Role::User => format!("Human: {}", self.content),
            Role::Assistant => format!("Assistant: {}", self.content),
            role => format!("{role}: {}", self.content),
        }
    }
}

/// Renders previous dialogue turns as a plain-text transcript, one line per message.
#[must_use]
pub fn format_chat_history(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(ChatMessage::transcript_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_each_turn_by_role() {
        let history = vec![
            ChatMessage::user("Who wrote Hamlet?"),
            ChatMessage::assistant("William Shakespeare."),
            ChatMessage {
                role: Role::System,
                content: "Be brief.".to_string(),
            },
        ];

        assert_eq!(
            format_chat_history(&history),
            "Human: Who wrote Hamlet?\nAssistant: William Shakespeare.\nsystem: Be brief."
        );
    }

    #[test]
    fn empty_history_renders_empty_transcript() {
        assert_eq!(format_chat_history(&[]), "");
    }

    #[test]
    fn deserializes_lowercase_roles() {
        let message: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"hi"}"#).unwrap();

        assert_eq!(message, ChatMessage::assistant("hi"));
        assert!(serde_json::from_str::<ChatMessage>(r#"{"role":"robot","content":"hi"}"#).is_err());
    }
}
