//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod auth;
pub mod chat;
pub mod say;

use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::core::chat_client::ChatClient;
use crate::core::config::data::Config;
use crate::core::config::defaults::CONFIG_KEYS;
use crate::core::credentials::{
    CredentialError, CredentialStatus, CredentialStore, ResolvedCredential, API_KEY_ENV,
};
use crate::core::gemini_client::GeminiClient;
use crate::core::response_cache::ResponseCache;
use crate::utils::logging::init_tracing;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("VERGEN_GIT_DESCRIBE"),
    "\nbuilt: ",
    env!("VERGEN_BUILD_DATE"),
    "\nrustc: ",
    env!("VERGEN_RUSTC_SEMVER"),
);

#[derive(Parser)]
#[command(name = "wellchat")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "A terminal health and wellness assistant backed by Gemini")]
#[command(
    long_about = "Wellchat is a terminal chat assistant for nutrition, fitness, sleep and general \
wellness questions. Answers come from Google's Gemini generative-language API.\n\n\
Authentication:\n\
  Use 'wellchat auth' to store your Gemini API key in the system keyring.\n\n\
Environment Variables:\n\
  GEMINI_API_KEY    API key (used when no --api-key flag is given)\n\
  WELLCHAT_LOG      Diagnostic log filter, e.g. 'wellchat=debug' (default: warn)\n\n\
Commands inside a chat:\n\
  /help             Show available commands\n\
  /log <filename>   Enable transcript logging to the given file\n\
  /log              Toggle transcript logging pause/resume\n\
  /clear            Start a new conversation\n\
  /quit             Leave the chat"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Gemini API key for this run (overrides the environment and keyring)
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Model to use for this run
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Enable transcript logging to specified file
    #[arg(short = 'l', long, global = true)]
    pub log: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive conversation (default)
    Chat,
    /// Ask a single question and print the answer
    Say {
        /// The question to ask
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Store a Gemini API key in the system keyring
    Auth,
    /// Remove the stored Gemini API key
    Deauth,
    /// Show credential status and effective configuration
    Status,
    /// Set configuration values (prints the configuration when no key is given)
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key
        value: Option<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let session = Session::resolve(args.api_key.as_deref(), args.model)?;
            chat::run_chat(session, args.log).await
        }
        Commands::Say { prompt } => {
            let session = Session::resolve(args.api_key.as_deref(), args.model)?;
            say::run_say(session, prompt).await
        }
        Commands::Auth => auth::run_auth(&CredentialStore::new()),
        Commands::Deauth => auth::run_deauth(&CredentialStore::new()),
        Commands::Status => {
            print_status(&CredentialStore::new(), args.api_key.as_deref());
            Config::load()?.print_all();
            Ok(())
        }
        Commands::Set { key, value } => {
            let Some(key) = key else {
                Config::load()?.print_all();
                return Ok(());
            };
            let Some(value) = value else {
                eprintln!("⚠️  To set {key}, provide a value:");
                eprintln!("Example: wellchat set {key} <value>");
                std::process::exit(1);
            };
            Config::mutate(|config| config.set_value(&key, &value).map_err(Into::into))?;
            println!("✅ Set {key} to: {}", value.trim());
            Ok(())
        }
        Commands::Unset { key } => {
            Config::mutate(|config| config.unset_value(&key).map_err(Into::into))?;
            println!("✅ Unset {key}");
            Ok(())
        }
    }
}

/// Everything a conversation front end needs: a client wired to the
/// configured endpoint plus the resolved credential.
pub struct Session {
    pub client: ChatClient,
    pub credential: ResolvedCredential,
    pub config: Config,
}

impl Session {
    pub fn resolve(api_key: Option<&str>, model: Option<String>) -> Result<Self, Box<dyn Error>> {
        let mut config = Config::load()?;
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            config.model = Some(model.trim().to_string());
        }

        let credential = match CredentialStore::new().resolve(api_key) {
            Ok(credential) => credential,
            Err(CredentialError::NotConfigured) => {
                eprintln!("❌ {}", CredentialError::NotConfigured);
                eprintln!();
                eprintln!("💡 Quick fixes:");
                eprintln!("  • wellchat auth");
                eprintln!("  • export {API_KEY_ENV}=<your key>");
                eprintln!("  • wellchat --api-key <your key> chat");
                std::process::exit(2);
            }
            Err(err) => return Err(Box::new(err)),
        };

        Ok(Self::new(config, credential))
    }

    pub fn new(config: Config, credential: ResolvedCredential) -> Self {
        let cache = Arc::new(ResponseCache::new(config.effective_cache_capacity()));
        let client = ChatClient::new(GeminiClient::new(config.gemini_settings()), cache);
        Self {
            client,
            credential,
            config,
        }
    }
}

fn print_status(store: &CredentialStore, api_key: Option<&str>) {
    match store.status(api_key) {
        CredentialStatus::Configured {
            source,
            well_formed: true,
        } => println!("API key: configured ({source})"),
        CredentialStatus::Configured {
            source,
            well_formed: false,
        } => println!("API key: configured ({source}), but it does not look like a Gemini key"),
        CredentialStatus::NotConfigured => {
            println!("API key: not configured. Run 'wellchat auth' or set {API_KEY_ENV}.")
        }
        CredentialStatus::Unavailable(reason) => {
            println!("API key: keyring unavailable ({reason})")
        }
    }
    println!("Config keys: {}", CONFIG_KEYS.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn say_collects_trailing_words() {
        let args = Args::try_parse_from(["wellchat", "say", "is", "-5", "degrees", "too", "cold?"])
            .unwrap();
        match args.command {
            Some(Commands::Say { prompt }) => {
                assert_eq!(prompt.join(" "), "is -5 degrees too cold?")
            }
            _ => panic!("expected say command"),
        }
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let args = Args::try_parse_from([
            "wellchat",
            "chat",
            "--api-key",
            "abc",
            "-m",
            "gemini-1.5-pro",
            "--log",
            "chat.log",
        ])
        .unwrap();
        assert!(matches!(args.command, Some(Commands::Chat)));
        assert_eq!(args.api_key.as_deref(), Some("abc"));
        assert_eq!(args.model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(args.log.as_deref(), Some("chat.log"));
    }

    #[test]
    fn no_subcommand_defaults_to_none() {
        let args = Args::try_parse_from(["wellchat"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn session_uses_configured_endpoint() {
        let config = Config {
            model: Some("gemini-1.5-flash".to_string()),
            base_url: Some("http://localhost:9999/v1beta".to_string()),
            cache_capacity: Some(3),
            ..Default::default()
        };
        let credential = ResolvedCredential {
            api_key: "k".to_string(),
            source: crate::core::credentials::CredentialSource::Flag,
        };
        let session = Session::new(config, credential);

        assert_eq!(
            session.client.gemini().endpoint(),
            "http://localhost:9999/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(session.client.cache().capacity(), 3);
    }
}
