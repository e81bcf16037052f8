use crate::core::chat_client::{context_window, ChatCompletionRequest, DEFAULT_CONTEXT_WINDOW};
use crate::core::message::{ChatMessage, ChatTurn, GREETING};

/// In-memory transcript of one conversation. Nothing here is persisted.
pub struct Conversation {
    turns: Vec<ChatTurn>,
    context_window: usize,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_WINDOW)
    }
}

impl Conversation {
    /// Start a conversation with the assistant greeting as its first turn.
    /// The window always includes at least the latest turn.
    pub fn new(context_window: usize) -> Self {
        Self {
            turns: vec![ChatTurn::new(ChatMessage::assistant(GREETING))],
            context_window: context_window.max(1),
        }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn last_turn(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatTurn {
        self.push(ChatMessage::user(content))
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> &ChatTurn {
        self.push(ChatMessage::assistant(content))
    }

    /// Drop everything except a fresh greeting.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.turns.push(ChatTurn::new(ChatMessage::assistant(GREETING)));
    }

    /// Messages sent as context: the trailing window of the transcript.
    pub fn context_messages(&self) -> Vec<ChatMessage> {
        let messages: Vec<ChatMessage> = self.turns.iter().map(|t| t.message.clone()).collect();
        context_window(&messages, self.context_window).to_vec()
    }

    pub fn completion_request(&self, api_key: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            messages: self.context_messages(),
            api_key: api_key.to_string(),
        }
    }

    fn push(&mut self, message: ChatMessage) -> &ChatTurn {
        self.turns.push(ChatTurn::new(message));
        &self.turns[self.turns.len() - 1]
    }
}
