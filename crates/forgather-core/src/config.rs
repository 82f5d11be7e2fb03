use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use forgather_models::Language;

fn default_backend_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_language() -> Language {
    Language::Ar
}

/// Client configuration, loaded from a TOML file with the
/// `FORGATHER_BACKEND_URL` environment variable taking precedence for the
/// backend address.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_language")]
    pub default_language: Language,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            api_key: String::new(),
            request_timeout_secs: default_timeout_secs(),
            default_language: default_language(),
        }
    }
}

impl ClientConfig {
    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            toml::from_str(&raw)?
        } else {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };
        if let Ok(url) = std::env::var("FORGATHER_BACKEND_URL") {
            if !url.trim().is_empty() {
                config.backend_url = url;
            }
        }
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
