//! Wellchat is a terminal health and wellness assistant that answers questions
//! through Google's Gemini generative-language API.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`api`] defines the `generateContent` request payload and the helpers
//!   used to pull the answer text out of a response.
//! - [`core`] owns request building, the bounded response cache, the Gemini
//!   HTTP client, the composing chat client, credentials and configuration.
//! - [`cli`] parses arguments and runs the interactive and one-shot front ends.
//! - [`utils`] holds URL construction and logging setup.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod utils;
