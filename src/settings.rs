//! Startup settings for the chat assistant.
//!
//! Non-secret defaults may be stored in `settings.json` inside the
//! platform-specific config directory (via `directories::ProjectDirs`).
//! Environment variables override the file, and the API key is only ever
//! read from the environment.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::model::{
    ModelConfig, RetryPolicy, DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_SECS,
    DEFAULT_TIMEOUT_SECS,
};

/// Environment variable holding the service credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Startup configuration errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is missing or empty")]
    MissingApiKey(&'static str),
}

/// Settings that can be kept in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Model API base URL
    pub base_url: String,
    /// Language code ("es" or "en")
    pub lang: String,
    /// Maximum attempts per prompt
    pub max_attempts: u32,
    /// Retry delay in seconds
    pub retry_delay: u64,
    /// HTTP timeout in seconds
    pub timeout: u64,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: "es".to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY_SECS,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FileSettings {
    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "chat-assistant", "chat-assistant")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path.
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.json"))
    }

    /// Load settings from the config file, falling back to defaults when the
    /// file is absent or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        let Ok(content) = fs::read_to_string(&path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Ignoring malformed settings file"
                );
                Self::default()
            }
        }
    }
}

/// Fully resolved settings used to build the client and the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub api_key: String,
    pub base_url: String,
    pub lang: String,
    pub max_attempts: u32,
    pub retry_delay: u64,
    pub timeout: u64,
}

impl AppSettings {
    /// Resolve settings from the process environment on top of the config file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(FileSettings::load(), |key| std::env::var(key).ok())
    }

    /// Resolve settings from `base` plus whatever `lookup` returns for each
    /// environment variable.
    pub fn resolve<F>(base: FileSettings, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_VAR))?;

        Ok(Self {
            api_key,
            base_url: lookup("OPENAI_BASE_URL").unwrap_or(base.base_url),
            lang: lookup("ASSISTANT_LANG").unwrap_or(base.lang),
            max_attempts: parse_var(&lookup, "ASSISTANT_MAX_ATTEMPTS").unwrap_or(base.max_attempts),
            retry_delay: parse_var(&lookup, "ASSISTANT_RETRY_DELAY").unwrap_or(base.retry_delay),
            timeout: parse_var(&lookup, "ASSISTANT_TIMEOUT").unwrap_or(base.timeout),
        })
    }

    /// Client configuration derived from these settings.
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig::default()
            .with_base_url(&self.base_url)
            .with_api_key(&self.api_key)
            .with_timeout(self.timeout)
    }

    /// Retry policy derived from these settings.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_attempts(self.max_attempts)
            .with_delay_secs(self.retry_delay)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key() {
        let result = AppSettings::resolve(FileSettings::default(), env(&[]));
        assert_eq!(result, Err(ConfigError::MissingApiKey("OPENAI_API_KEY")));
    }

    #[test]
    fn test_empty_api_key_is_missing() {
        let result =
            AppSettings::resolve(FileSettings::default(), env(&[("OPENAI_API_KEY", "  ")]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey(_))));
    }

    #[test]
    fn test_defaults() {
        let settings =
            AppSettings::resolve(FileSettings::default(), env(&[("OPENAI_API_KEY", "sk-test")]))
                .unwrap();
        assert_eq!(settings.api_key, "sk-test");
        assert_eq!(settings.base_url, "https://api.openai.com/v1");
        assert_eq!(settings.lang, "es");
        assert_eq!(settings.retry_policy(), RetryPolicy::default());
        assert_eq!(settings.model_config().timeout_secs, 30);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileSettings {
            base_url: "http://localhost:8000/v1".to_string(),
            lang: "en".to_string(),
            max_attempts: 5,
            retry_delay: 1,
            timeout: 10,
        };
        let settings = AppSettings::resolve(
            file,
            env(&[
                ("OPENAI_API_KEY", "sk-test"),
                ("ASSISTANT_MAX_ATTEMPTS", "2"),
                ("ASSISTANT_RETRY_DELAY", "not-a-number"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.base_url, "http://localhost:8000/v1");
        assert_eq!(settings.lang, "en");
        assert_eq!(settings.max_attempts, 2);
        assert_eq!(settings.retry_delay, 1);
        assert_eq!(settings.model_config().timeout_secs, 10);
    }

    #[test]
    fn test_file_settings_partial_json() {
        let parsed: FileSettings = serde_json::from_str(r#"{"lang":"en"}"#).unwrap();
        assert_eq!(parsed.lang, "en");
        assert_eq!(parsed.max_attempts, 3);
        assert_eq!(parsed.timeout, 30);
    }
}
