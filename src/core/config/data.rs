use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings persisted in `config.toml`. Every field is optional; unset
/// fields resolve to the built-in defaults (see `defaults.rs`).
/// Keys use the same kebab-case spelling as `wellchat set`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Gemini model name (e.g., "gemini-2.0-flash")
    pub model: Option<String>,
    /// API base URL up to and including the version segment
    pub base_url: Option<String>,
    /// Hard deadline for one completion request, in milliseconds
    pub timeout_ms: Option<u64>,
    /// Number of answers kept in the response cache
    pub cache_capacity: Option<usize>,
    /// Number of trailing conversation turns sent as context
    pub context_window: Option<usize>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
///
/// # Examples
/// - Unix: `/home/user/.config/wellchat/config.toml` → `~/.config/wellchat/config.toml`
/// - macOS: `/Users/user/Library/Application Support/...` → `~/Library/Application Support/...`
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
