use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

const TIMEOUT_NOTICE: &str =
    "The request took too long to complete. Please try again or check your internet connection.";
const FAILURE_NOTICE: &str =
    "Failed to get a response from the assistant. Please check your API key and try again.";
const NO_USER_MESSAGE_NOTICE: &str = "Please enter a message first.";

/// Failures surfaced by the chat-completion core.
///
/// External failures are normalized at the HTTP boundary into one of these
/// variants; callers decide how to present them (see [`ChatError::user_message`]).
#[derive(Debug)]
pub enum ChatError {
    /// The conversation handed to the client has no user turn.
    NoUserMessage,
    /// The endpoint did not answer before the deadline. The in-flight request
    /// has been dropped.
    Timeout { after: Duration },
    /// The endpoint answered with a non-success status.
    Api { status: u16, body: String },
    /// The request never produced a response (DNS, TLS, connection reset).
    Transport(reqwest::Error),
    /// A success status whose body was not JSON at all.
    Decode(String),
}

impl ChatError {
    /// True when re-sending the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ChatError::Timeout { .. } | ChatError::Transport(_))
    }

    /// Status code for `Api` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ChatError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Copy suitable for showing to the person chatting. Never includes the
    /// response body or the credential.
    pub fn user_message(&self) -> &'static str {
        match self {
            ChatError::NoUserMessage => NO_USER_MESSAGE_NOTICE,
            ChatError::Timeout { .. } => TIMEOUT_NOTICE,
            ChatError::Api { .. } | ChatError::Transport(_) | ChatError::Decode(_) => {
                FAILURE_NOTICE
            }
        }
    }

    /// One-line description of an `Api` body, for logs.
    pub fn summary(&self) -> Option<String> {
        match self {
            ChatError::Api { body, .. } => Some(summarize_error_body(body)),
            _ => None,
        }
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::NoUserMessage => write!(f, "No user message found"),
            ChatError::Timeout { after } => {
                write!(f, "Request timed out after {} ms", after.as_millis())
            }
            ChatError::Api { status, body } => {
                write!(f, "API error: {status} - {}", summarize_error_body(body))
            }
            ChatError::Transport(err) => write!(f, "Transport error: {err}"),
            ChatError::Decode(detail) => write!(f, "Could not decode response: {detail}"),
        }
    }
}

impl StdError for ChatError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ChatError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

/// The URL carries the credential as a query parameter, so it is dropped.
impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Transport(err.without_url())
    }
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value.get("error").and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.to_string()),
                _ => None,
            })
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary.map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    if let Ok(json_value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(summary) = extract_error_summary(&json_value) {
            if !summary.is_empty() {
                return summary;
            }
        }
    }

    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}
