//! The chat-completion entry point used by the conversation front ends.
//!
//! [`ChatClient::get_chat_completion`] validates the conversation, answers
//! repeated questions from the injected [`ResponseCache`], and otherwise sends
//! one request through [`GeminiClient`]. Timeouts and endpoint failures are
//! always returned as typed [`ChatError`]s; the caller picks the copy shown to
//! the user.

use std::sync::Arc;

use tracing::debug;

use crate::core::error::ChatError;
use crate::core::gemini_client::{GeminiClient, GenerationOutcome};
use crate::core::message::ChatMessage;
use crate::core::request_builder::build_request;
use crate::core::response_cache::ResponseCache;

/// Returned when the endpoint answers successfully but without any text.
pub const FALLBACK_RESPONSE: &str =
    "I apologize, but I couldn't generate a response at the moment. Please try again.";

/// Number of trailing turns the front ends send as context.
pub const DEFAULT_CONTEXT_WINDOW: usize = 5;

#[derive(Debug, Clone)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletionResponse {
    pub response: String,
}

#[derive(Clone)]
pub struct ChatClient {
    gemini: GeminiClient,
    cache: Arc<ResponseCache>,
}

impl ChatClient {
    pub fn new(gemini: GeminiClient, cache: Arc<ResponseCache>) -> Self {
        Self { gemini, cache }
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    pub fn gemini(&self) -> &GeminiClient {
        &self.gemini
    }

    pub async fn get_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ChatError> {
        let built = build_request(&request.messages)?;

        if let Some(cached) = self.cache.lookup(&built.cache_key) {
            debug!(cache_size = self.cache.len(), "using cached response");
            return Ok(ChatCompletionResponse { response: cached });
        }

        let response = match self.gemini.generate(&built.body, &request.api_key).await? {
            GenerationOutcome::Text(text) => {
                self.cache.store(built.cache_key, text.clone());
                text
            }
            GenerationOutcome::Fallback => FALLBACK_RESPONSE.to_string(),
        };

        Ok(ChatCompletionResponse { response })
    }
}

/// The last `size` messages of a conversation.
pub fn context_window(messages: &[ChatMessage], size: usize) -> &[ChatMessage] {
    let start = messages.len().saturating_sub(size);
    &messages[start..]
}
