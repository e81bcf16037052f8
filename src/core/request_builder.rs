use crate::api::{Content, GenerateContentRequest, GenerationConfig, Part};
use crate::core::error::ChatError;
use crate::core::message::ChatMessage;

/// Persona and tone instructions placed ahead of every question.
pub const SYSTEM_FRAMING: &str = "You are a helpful health and wellness assistant. \
Provide concise, well-formatted answers about nutrition, fitness, wellness, or medical information.\n\
Use paragraphs for better readability. Always be friendly and supportive.";

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 1024;
pub const TOP_P: f32 = 0.95;

pub const GENERATION_CONFIG: GenerationConfig = GenerationConfig {
    temperature: TEMPERATURE,
    max_output_tokens: MAX_OUTPUT_TOKENS,
    top_p: TOP_P,
};

/// A payload ready to send, plus the cache key of the question it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRequest {
    pub cache_key: String,
    pub body: GenerateContentRequest,
}

/// The most recent user turn, if any.
pub fn latest_user_message(messages: &[ChatMessage]) -> Option<&ChatMessage> {
    messages.iter().rev().find(|message| message.role.is_user())
}

/// Normalized cache key for a question: trimmed and lower-cased.
pub fn cache_key(text: &str) -> String {
    text.trim().to_lowercase()
}

pub fn frame_prompt(question: &str) -> String {
    format!("{SYSTEM_FRAMING}\n\nUser question: {question}")
}

pub fn build_request(messages: &[ChatMessage]) -> Result<BuiltRequest, ChatError> {
    let question = latest_user_message(messages).ok_or(ChatError::NoUserMessage)?;

    Ok(BuiltRequest {
        cache_key: cache_key(&question.content),
        body: GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: frame_prompt(&question.content),
                }],
            }],
            generation_config: GENERATION_CONFIG,
        },
    })
}
