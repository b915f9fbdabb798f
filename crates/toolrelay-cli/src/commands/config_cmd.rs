//! `relay config` -- display resolved configuration.
//!
//! The API key is redacted.

use toolrelay_types::config::Config;

/// Display the resolved configuration as formatted JSON.
pub fn config_show(config: &Config) {
    match render(config) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("error: failed to serialize config: {e}"),
    }
}

fn render(config: &Config) -> serde_json::Result<String> {
    serde_json::to_string_pretty(config)
}

#[cfg(test)]
mod tests {
    use toolrelay_types::SecretString;

    use super::*;

    #[test]
    fn render_includes_sections() {
        let json = render(&Config::default()).unwrap();
        assert!(json.contains("\"platform\""));
        assert!(json.contains("\"agent\""));
        assert!(json.contains("openai/gpt-4o-2024-08-06"));
    }

    #[test]
    fn render_redacts_api_key() {
        let mut config = Config::default();
        config.platform.api_key = SecretString::new("arc_live_secret");
        let json = render(&config).unwrap();
        assert!(!json.contains("arc_live_secret"));
    }

    #[test]
    fn config_show_does_not_panic() {
        config_show(&Config::default());
    }
}
