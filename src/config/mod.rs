//! Configuration file management and credential resolution.
//!
//! Settings live in `~/.config/chatterbox/config.toml`. Every field has a
//! default covering the hosted Gemini OpenAI-compatibility endpoint, so the
//! tool runs with no config file at all.

use anyhow::{Context, Result, bail};
use inquire::Password;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::paths;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Settings in the `[chat]` section of config.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// Model name sent with every request.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

/// The complete configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub chat: ChatConfig,
}

fn config_path() -> PathBuf {
    paths::config_dir().join("config.toml")
}

/// Loads the config file, falling back to defaults when it doesn't exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolves the API key: the configured environment variable first, then an
/// interactive no-echo prompt. A blank answer is a fatal credential error.
pub fn resolve_api_key(env_var: &str) -> Result<String> {
    if let Ok(key) = std::env::var(env_var)
        && !key.trim().is_empty()
    {
        return Ok(key);
    }

    let key = Password::new(&format!("Enter your API key ({env_var} is unset):"))
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if key.trim().is_empty() {
        bail!("No API key provided");
    }

    Ok(key)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = ChatConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_key_env, DEFAULT_API_KEY_ENV);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: ConfigFile = toml::from_str(
            r#"
            [chat]
            model = "llama3.2"
            "#,
        )
        .unwrap();

        assert_eq!(config.chat.model, "llama3.2");
        // Unspecified fields keep their defaults.
        assert_eq!(config.chat.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(config.chat.model, DEFAULT_MODEL);
    }

    #[test]
    #[serial]
    fn test_resolve_api_key_from_env() {
        unsafe { std::env::set_var("CHATTERBOX_TEST_KEY", "secret-123") };

        let key = resolve_api_key("CHATTERBOX_TEST_KEY").unwrap();
        assert_eq!(key, "secret-123");

        unsafe { std::env::remove_var("CHATTERBOX_TEST_KEY") };
    }
}
