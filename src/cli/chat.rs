//! Interactive line-based conversation

use std::error::Error;
use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::cli::Session;
use crate::core::conversation::Conversation;
use crate::core::message::ChatTurn;
use crate::utils::logging::LoggingState;

const HELP_TEXT: &str = "Commands:\n\
  /help             Show this help\n\
  /log <filename>   Enable transcript logging to the given file\n\
  /log              Toggle transcript logging pause/resume\n\
  /clear            Start a new conversation\n\
  /quit, /exit      Leave the chat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Empty,
    Message(String),
    Help,
    Clear,
    Log(Option<String>),
    Quit,
    Unknown(String),
}

pub fn parse_chat_input(line: &str) -> ChatInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ChatInput::Empty;
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return ChatInput::Message(trimmed.to_string());
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    match name.to_lowercase().as_str() {
        "help" => ChatInput::Help,
        "clear" => ChatInput::Clear,
        "quit" | "exit" => ChatInput::Quit,
        "log" if rest.is_empty() => ChatInput::Log(None),
        "log" => ChatInput::Log(Some(rest.to_string())),
        _ => ChatInput::Unknown(format!("/{name}")),
    }
}

pub async fn run_chat(session: Session, log_file: Option<String>) -> Result<(), Box<dyn Error>> {
    let mut logging = LoggingState::new(log_file)?;
    let mut conversation = Conversation::new(session.config.effective_context_window());

    println!("🩺 Wellchat: health assistant");
    println!(
        "📡 Using model: {} (key from {})",
        session.config.effective_model(),
        session.credential.source
    );
    println!("💡 Type /help for commands, /quit to leave");
    greet(&conversation, &logging);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match parse_chat_input(&line) {
            ChatInput::Empty => continue,
            ChatInput::Quit => break,
            ChatInput::Help => {
                println!("{HELP_TEXT}");
                println!("Transcript logging: {}", logging.get_status_string());
            }
            ChatInput::Clear => {
                conversation.clear();
                greet(&conversation, &logging);
            }
            ChatInput::Log(None) => report(logging.toggle_logging()),
            ChatInput::Log(Some(path)) => report(logging.set_log_file(path)),
            ChatInput::Unknown(command) => {
                eprintln!("Unknown command: {command}. Type /help for a list of commands.")
            }
            ChatInput::Message(text) => {
                log_turn(&logging, conversation.push_user(text));
                let request = conversation.completion_request(&session.credential.api_key);

                match session.client.get_chat_completion(&request).await {
                    Ok(reply) => {
                        println!();
                        println!("{}", reply.response);
                        println!();
                        log_turn(&logging, conversation.push_assistant(reply.response));
                    }
                    Err(err) => {
                        warn!(error = %err, "chat completion failed");
                        eprintln!("❌ {}", err.user_message());
                    }
                }
            }
        }
    }

    Ok(())
}

fn greet(conversation: &Conversation, logging: &LoggingState) {
    if let Some(greeting) = conversation.last_turn() {
        println!();
        println!("{}", greeting.content());
        println!();
        log_turn(logging, greeting);
    }
}

fn log_turn(logging: &LoggingState, turn: &ChatTurn) {
    if let Err(err) = logging.log_turn(turn) {
        eprintln!("⚠️  Could not write transcript: {err}");
    }
}

fn report(result: Result<String, Box<dyn Error>>) {
    match result {
        Ok(message) => println!("{message}"),
        Err(err) => eprintln!("⚠️  {err}"),
    }
}
