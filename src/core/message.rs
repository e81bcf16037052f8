use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";
pub const ROLE_SYSTEM: &str = "system";

/// Greeting shown as the first assistant turn of every conversation.
pub const GREETING: &str =
    "Hi there! I'm your health assistant powered by Gemini AI. How can I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => ROLE_USER,
            ChatRole::Assistant => ROLE_ASSISTANT,
            ChatRole::System => ROLE_SYSTEM,
        }
    }

    pub fn is_user(self) -> bool {
        self == ChatRole::User
    }
}

impl AsRef<str> for ChatRole {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ChatRole {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            ROLE_USER => Ok(ChatRole::User),
            ROLE_ASSISTANT => Ok(ChatRole::Assistant),
            ROLE_SYSTEM => Ok(ChatRole::System),
            other => Err(format!("unknown chat role: {other}")),
        }
    }
}

impl TryFrom<String> for ChatRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<ChatRole> for String {
    fn from(role: ChatRole) -> Self {
        role.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }
}

/// A message as the conversation keeps it: stamped with an id and the time
/// it was appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: String,
    pub message: ChatMessage,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(message: ChatMessage) -> Self {
        Self {
            id: generate_turn_id(),
            message,
            timestamp: Utc::now(),
        }
    }

    pub fn role(&self) -> ChatRole {
        self.message.role
    }

    pub fn content(&self) -> &str {
        &self.message.content
    }
}

fn generate_turn_id() -> String {
    let mut bytes = [0u8; 8];
    if getrandom::fill(&mut bytes).is_err() {
        // Entropy is only used to disambiguate turns; fall back to the clock.
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        bytes = nanos.to_le_bytes();
    }
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_round_trip_through_json() {
        let message = ChatMessage::assistant("hello");
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hello"}"#);

        let parsed: ChatMessage = serde_json::from_str(r#"{"role":"system","content":"x"}"#).unwrap();
        assert_eq!(parsed.role, ChatRole::System);
    }

    #[test]
    fn unknown_roles_are_rejected() {
        let parsed = serde_json::from_str::<ChatMessage>(r#"{"role":"tool","content":"x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn turns_get_distinct_ids() {
        let first = ChatTurn::new(ChatMessage::user("a"));
        let second = ChatTurn::new(ChatMessage::user("a"));
        assert_eq!(first.id.len(), 16);
        assert_ne!(first.id, second.id);
        assert!(first.role().is_user());
        assert_eq!(first.content(), "a");
    }
}
