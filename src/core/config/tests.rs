use super::data::{path_display, Config};
use super::io::ConfigError;
use super::orchestrator::ConfigOrchestrator;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn config_orchestrator_detects_external_updates() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    let orchestrator = ConfigOrchestrator::new(config_path.clone());

    orchestrator
        .mutate(|config| {
            config.model = Some("gemini-1.5-pro".to_string());
            Ok(())
        })
        .expect("mutate failed");

    let persisted = Config::load_from_path(&config_path).expect("load failed");
    assert_eq!(persisted.model.as_deref(), Some("gemini-1.5-pro"));

    let cached = orchestrator.load_with_cache().expect("cached load failed");
    assert_eq!(cached.model.as_deref(), Some("gemini-1.5-pro"));

    std::thread::sleep(Duration::from_millis(1100));

    let external = Config {
        model: Some("gemini-2.0-flash-lite".to_string()),
        ..Default::default()
    };
    external
        .save_to_path(&config_path)
        .expect("external save failed");

    let reloaded = orchestrator.load_with_cache().expect("reload failed");
    assert_eq!(reloaded.model.as_deref(), Some("gemini-2.0-flash-lite"));
}

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
}

#[test]
fn save_and_load_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config {
        model: Some("gemini-2.0-flash".to_string()),
        timeout_ms: Some(5_000),
        cache_capacity: Some(10),
        ..Default::default()
    };
    config
        .save_to_path(&config_path)
        .expect("Failed to save config");

    let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded, config);
}

#[test]
fn invalid_toml_reports_parse_error_with_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "timeout-ms = \"soon\"").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("Failed to parse config at"));
}

#[test]
fn defaults_apply_when_unset() {
    let config = Config::default();
    let settings = config.gemini_settings();

    assert_eq!(settings.model, "gemini-2.0-flash");
    assert_eq!(
        settings.base_url,
        "https://generativelanguage.googleapis.com/v1beta"
    );
    assert_eq!(settings.timeout, Duration::from_millis(15_000));
    assert_eq!(config.effective_cache_capacity(), 100);
    assert_eq!(config.effective_context_window(), 5);
}

#[test]
fn set_value_validates_input() {
    let mut config = Config::default();

    config.set_value("timeout-ms", "2500").unwrap();
    config.set_value("base-url", "http://localhost:8080/v1beta/").unwrap();
    config.set_value("model", " gemini-1.5-flash ").unwrap();
    assert_eq!(config.effective_timeout(), Duration::from_millis(2500));
    assert_eq!(config.effective_base_url(), "http://localhost:8080/v1beta");
    assert_eq!(config.effective_model(), "gemini-1.5-flash");

    assert!(config.set_value("timeout-ms", "0").is_err());
    assert!(config.set_value("cache-capacity", "-3").is_err());
    assert!(config.set_value("context-window", "many").is_err());
    assert!(config.set_value("base-url", "ftp://example.com").is_err());
    assert!(config.set_value("model", "  ").is_err());
    assert!(config.set_value("theme", "dark").is_err());
}

#[test]
fn unset_value_restores_default() {
    let mut config = Config::default();
    config.set_value("context-window", "9").unwrap();
    assert_eq!(config.effective_context_window(), 9);

    config.unset_value("context-window").unwrap();
    assert_eq!(config.effective_context_window(), 5);
    assert!(config.unset_value("nope").is_err());
}

#[cfg(unix)]
#[test]
fn path_display_abbreviates_home() {
    if let Some(home) = std::env::var_os("HOME") {
        let path = std::path::PathBuf::from(home).join(".config/wellchat/config.toml");
        assert_eq!(path_display(&path), "~/.config/wellchat/config.toml");
    }
}

#[test]
fn file_keys_use_kebab_case() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.set_value("base-url", "http://localhost:8080/v1beta").unwrap();
    config.set_value("timeout-ms", "2500").unwrap();
    config.set_value("cache-capacity", "7").unwrap();
    config.set_value("context-window", "3").unwrap();
    config.save_to_path(&config_path).expect("save failed");

    let written = std::fs::read_to_string(&config_path).unwrap();
    for key in super::defaults::CONFIG_KEYS.iter().filter(|k| **k != "model") {
        assert!(written.contains(&format!("{key} = ")), "missing {key} in:\n{written}");
    }

    let parsed: Config =
        toml::from_str("base-url = \"http://127.0.0.1:9000\"\ncontext-window = 2").unwrap();
    assert_eq!(parsed.effective_base_url(), "http://127.0.0.1:9000");
    assert_eq!(parsed.effective_context_window(), 2);
}

#[test]
fn hand_edited_zeros_fall_back_to_defaults() {
    use crate::core::conversation::Conversation;
    use crate::core::request_builder::build_request;

    let config: Config =
        toml::from_str("context-window = 0\ntimeout-ms = 0\ncache-capacity = 0").unwrap();
    assert_eq!(config.effective_context_window(), 5);
    assert_eq!(config.effective_timeout(), Duration::from_millis(15_000));
    assert_eq!(config.effective_cache_capacity(), 100);

    let mut conversation = Conversation::new(config.effective_context_window());
    conversation.push_user("How much water?");
    let request = conversation.completion_request("k");

    assert_eq!(
        request.messages.last().map(|m| m.content.as_str()),
        Some("How much water?")
    );
    let built = build_request(&request.messages).expect("user turn should be sent");
    assert_eq!(built.cache_key, "how much water?");
}
