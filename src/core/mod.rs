pub mod chat_client;
pub mod config;
pub mod conversation;
pub mod credentials;
pub mod error;
pub mod gemini_client;
pub mod keyring;
pub mod message;
pub mod request_builder;
pub mod response_cache;
