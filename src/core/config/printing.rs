use crate::core::config::data::{path_display, Config};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration ({}):", path_display(Config::location()));
        print_entry("model", self.model.as_deref(), self.effective_model());
        print_entry("base-url", self.base_url.as_deref(), self.effective_base_url());
        print_entry(
            "timeout-ms",
            self.timeout_ms.map(|v| v.to_string()).as_deref(),
            &self.effective_timeout().as_millis().to_string(),
        );
        print_entry(
            "cache-capacity",
            self.cache_capacity.map(|v| v.to_string()).as_deref(),
            &self.effective_cache_capacity().to_string(),
        );
        print_entry(
            "context-window",
            self.context_window.map(|v| v.to_string()).as_deref(),
            &self.effective_context_window().to_string(),
        );
    }
}

fn print_entry(key: &str, configured: Option<&str>, effective: &str) {
    match configured {
        Some(value) => println!("  {key}: {value}"),
        None => println!("  {key}: {effective} (default)"),
    }
}
