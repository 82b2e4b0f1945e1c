//! Settings resolution: defaults, then dashboard.toml, then APP__ environment
//! variables, then the command line.

use serde::Deserialize;

const CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:3000".to_string(),
        }
    }
}

pub fn load_settings(cli_server_url: Option<String>) -> Settings {
    let mut settings = match std::fs::read_to_string(CONFIG_FILE) {
        Ok(raw) => match toml::from_str::<Settings>(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!("ignoring malformed {CONFIG_FILE}: {err}");
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    };

    if let Ok(value) = std::env::var("APP__SERVER_URL") {
        settings.server_url = value;
    }
    if let Some(value) = cli_server_url {
        settings.server_url = value;
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_file_is_present() {
        let settings = Settings::default();
        assert_eq!(settings.server_url, "http://127.0.0.1:3000");
    }

    #[test]
    fn file_values_parse_over_defaults() {
        let settings: Settings =
            toml::from_str(r#"server_url = "https://api.akucuciin.example""#).expect("parse");
        assert_eq!(settings.server_url, "https://api.akucuciin.example");
    }

    #[test]
    fn cli_override_wins() {
        let settings = load_settings(Some("http://10.0.0.5:8080".to_string()));
        assert_eq!(settings.server_url, "http://10.0.0.5:8080");
    }
}
