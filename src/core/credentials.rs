//! Resolution and storage of the Gemini API key.
//!
//! The key is looked up in order: an explicit value (the `--api-key` flag),
//! the `GEMINI_API_KEY` environment variable, then the system keyring. There
//! is no built-in fallback key.

use std::error::Error;
use std::fmt;

use tracing::debug;

use crate::core::keyring::{delete_secret, read_secret, write_secret, KeyringAccessError};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const KEYRING_USER: &str = "gemini";

const MIN_KEY_LEN: usize = 30;

/// Conservative format check: at least 30 characters of `[A-Za-z0-9_-]`.
///
/// Only used to decide what status to show; a key that fails the check is
/// still sent as-is.
pub fn validate_api_key(key: &str) -> bool {
    key.len() >= MIN_KEY_LEN
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Flag,
    Environment,
    Keyring,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CredentialSource::Flag => "command line",
            CredentialSource::Environment => API_KEY_ENV,
            CredentialSource::Keyring => "system keyring",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedCredential {
    pub api_key: String,
    pub source: CredentialSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    Configured {
        source: CredentialSource,
        well_formed: bool,
    },
    NotConfigured,
    Unavailable(String),
}

#[derive(Debug)]
pub enum CredentialError {
    Empty,
    NotConfigured,
    Keyring(KeyringAccessError),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::Empty => write!(f, "API key cannot be empty"),
            CredentialError::NotConfigured => write!(
                f,
                "No Gemini API key configured. Run 'wellchat auth' or set {API_KEY_ENV}."
            ),
            CredentialError::Keyring(err) => write!(f, "Keyring access failed: {err}"),
        }
    }
}

impl Error for CredentialError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CredentialError::Keyring(err) => Some(err),
            _ => None,
        }
    }
}

impl From<KeyringAccessError> for CredentialError {
    fn from(err: KeyringAccessError) -> Self {
        CredentialError::Keyring(err)
    }
}

pub struct CredentialStore {
    use_keyring: bool,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::new_with_keyring(true)
    }

    /// Construct a store, optionally disabling keyring access (useful for tests)
    pub fn new_with_keyring(use_keyring: bool) -> Self {
        Self { use_keyring }
    }

    pub fn stored_key(&self) -> Result<Option<String>, KeyringAccessError> {
        if !self.use_keyring {
            return Ok(None);
        }
        let key = read_secret(KEYRING_USER)?;
        debug!(found = key.is_some(), "keyring lookup");
        Ok(key)
    }

    pub fn store_key(&self, key: &str) -> Result<(), CredentialError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CredentialError::Empty);
        }
        if !self.use_keyring {
            return Ok(());
        }
        write_secret(KEYRING_USER, key)?;
        Ok(())
    }

    /// Returns false when no key was stored.
    pub fn remove_key(&self) -> Result<bool, CredentialError> {
        if !self.use_keyring {
            return Ok(false);
        }
        Ok(delete_secret(KEYRING_USER)?)
    }

    pub fn resolve(&self, explicit: Option<&str>) -> Result<ResolvedCredential, CredentialError> {
        self.resolve_with_env(explicit, std::env::var(API_KEY_ENV).ok())
    }

    pub fn status(&self, explicit: Option<&str>) -> CredentialStatus {
        match self.resolve(explicit) {
            Ok(resolved) => CredentialStatus::Configured {
                source: resolved.source,
                well_formed: validate_api_key(&resolved.api_key),
            },
            Err(CredentialError::Keyring(err)) => CredentialStatus::Unavailable(err.to_string()),
            Err(_) => CredentialStatus::NotConfigured,
        }
    }

    fn resolve_with_env(
        &self,
        explicit: Option<&str>,
        env_value: Option<String>,
    ) -> Result<ResolvedCredential, CredentialError> {
        let non_blank = |value: &str| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        if let Some(api_key) = explicit.and_then(non_blank) {
            return Ok(ResolvedCredential {
                api_key,
                source: CredentialSource::Flag,
            });
        }
        if let Some(api_key) = env_value.as_deref().and_then(non_blank) {
            return Ok(ResolvedCredential {
                api_key,
                source: CredentialSource::Environment,
            });
        }
        match self.stored_key()?.as_deref().and_then(non_blank) {
            Some(api_key) => Ok(ResolvedCredential {
                api_key,
                source: CredentialSource::Keyring,
            }),
            None => Err(CredentialError::NotConfigured),
        }
    }
}
