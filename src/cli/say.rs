//! One-shot `say` command

use std::error::Error;

use crate::cli::Session;
use crate::core::conversation::Conversation;

pub async fn run_say(session: Session, prompt: Vec<String>) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: wellchat say <prompt>");
        std::process::exit(1);
    }

    let mut conversation = Conversation::new(session.config.effective_context_window());
    conversation.push_user(prompt);
    let request = conversation.completion_request(&session.credential.api_key);

    match session.client.get_chat_completion(&request).await {
        Ok(reply) => {
            println!("{}", reply.response);
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ {}", err.user_message());
            if let Some(status) = err.status() {
                eprintln!("   (HTTP {status})");
            }
            std::process::exit(1);
        }
    }
}
