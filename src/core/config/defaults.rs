use std::time::Duration;

use crate::core::chat_client::DEFAULT_CONTEXT_WINDOW;
use crate::core::config::data::Config;
use crate::core::gemini_client::{GeminiSettings, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use crate::core::response_cache::DEFAULT_CACHE_CAPACITY;
use crate::utils::url::normalize_base_url;

/// Keys accepted by `wellchat set` / `wellchat unset`.
pub const CONFIG_KEYS: [&str; 5] = [
    "model",
    "base-url",
    "timeout-ms",
    "cache-capacity",
    "context-window",
];

// A zero read from a hand-edited file falls back to the default, the same as
// an unset key.
impl Config {
    pub fn effective_model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn effective_timeout(&self) -> Duration {
        self.timeout_ms
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn effective_cache_capacity(&self) -> usize {
        self.cache_capacity
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_CACHE_CAPACITY)
    }

    pub fn effective_context_window(&self) -> usize {
        self.context_window
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_CONTEXT_WINDOW)
    }

    pub fn gemini_settings(&self) -> GeminiSettings {
        GeminiSettings {
            base_url: self.effective_base_url().to_string(),
            model: self.effective_model().to_string(),
            timeout: self.effective_timeout(),
        }
    }

    /// Set a value by its CLI key, validating numeric and URL values.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for {key}"));
        }
        match key {
            "model" => self.model = Some(value.to_string()),
            "base-url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(format!("base-url must start with http:// or https://: {value}"));
                }
                self.base_url = Some(normalize_base_url(value));
            }
            "timeout-ms" => self.timeout_ms = Some(parse_positive(key, value)?),
            "cache-capacity" => self.cache_capacity = Some(parse_positive(key, value)?),
            "context-window" => self.context_window = Some(parse_positive(key, value)?),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: &str) -> Result<(), String> {
        match key {
            "model" => self.model = None,
            "base-url" => self.base_url = None,
            "timeout-ms" => self.timeout_ms = None,
            "cache-capacity" => self.cache_capacity = None,
            "context-window" => self.context_window = None,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T, String>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(format!("{key} must be a positive whole number, got: {value}")),
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key: {key} (expected one of: {})",
        CONFIG_KEYS.join(", ")
    )
}
