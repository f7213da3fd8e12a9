//! Configuration for the taskdeck CLI.
//!
//! Values come from `taskdeck.toml` in the working directory, overridden
//! by `TASKDECK_*` environment variables. Missing tracker credentials
//! are not an error here; fetches fail with a clear message instead.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "taskdeck.toml";

/// Minimum polling interval in minutes.
const MIN_POLL_MINUTES: u64 = 1;

/// Default polling interval in minutes.
const DEFAULT_POLL_MINUTES: u64 = 5;

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tracker base URL, e.g. `https://example.atlassian.net`
    pub base_url: String,
    pub email: Option<String>,
    pub api_token: Option<String>,
    /// Polling interval in minutes, floored at 1
    pub polling_interval_minutes: u64,
    pub notifications_enabled: bool,
    /// Directory the checklist store is rooted at
    pub checklist_root: PathBuf,
}

/// On-disk shape of `taskdeck.toml`; every field optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    api_token: Option<String>,
    #[serde(default)]
    polling_interval_minutes: Option<u64>,
    #[serde(default)]
    notifications_enabled: Option<bool>,
    #[serde(default)]
    checklist_root: Option<String>,
}

impl Config {
    /// Load configuration from `taskdeck.toml` (when present) and the
    /// process environment.
    #[must_use]
    pub fn load() -> Self {
        let file = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(content) => match toml::from_str::<FileConfig>(&content) {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!(error = %e, "Ignoring malformed {CONFIG_FILE}");
                    None
                }
            },
            Err(_) => None,
        };

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Combine file values with an environment lookup; env wins.
    fn resolve(file: Option<FileConfig>, env: impl Fn(&str) -> Option<String>) -> Self {
        let file = file.unwrap_or_default();

        let minutes = env("TASKDECK_POLL_MINUTES")
            .and_then(|v| v.parse().ok())
            .or(file.polling_interval_minutes)
            .unwrap_or(DEFAULT_POLL_MINUTES)
            .max(MIN_POLL_MINUTES);

        let notifications_enabled = env("TASKDECK_NOTIFICATIONS")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .or(file.notifications_enabled)
            .unwrap_or(true);

        Self {
            base_url: env("TASKDECK_BASE_URL")
                .or(file.base_url)
                .unwrap_or_default(),
            email: env("TASKDECK_EMAIL").or(file.email).filter(|s| !s.is_empty()),
            api_token: env("TASKDECK_API_TOKEN")
                .or(file.api_token)
                .filter(|s| !s.is_empty()),
            polling_interval_minutes: minutes,
            notifications_enabled,
            checklist_root: env("TASKDECK_CHECKLIST_ROOT")
                .or(file.checklist_root)
                .map_or_else(|| PathBuf::from("."), PathBuf::from),
        }
    }

    /// Polling interval as a duration.
    #[must_use]
    pub fn polling_interval(&self) -> Duration {
        Duration::from_secs(self.polling_interval_minutes * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = Config::resolve(None, no_env);
        assert!(config.base_url.is_empty());
        assert_eq!(config.polling_interval_minutes, 5);
        assert!(config.notifications_enabled);
        assert_eq!(config.checklist_root, PathBuf::from("."));
    }

    #[test]
    fn test_file_values_apply() {
        let file: FileConfig = toml::from_str(
            r#"
            base_url = "https://tracker.example.com"
            email = "dev@example.com"
            api_token = "secret"
            polling_interval_minutes = 10
            notifications_enabled = false
            checklist_root = "/tmp/project"
            "#,
        )
        .unwrap();

        let config = Config::resolve(Some(file), no_env);
        assert_eq!(config.base_url, "https://tracker.example.com");
        assert_eq!(config.polling_interval_minutes, 10);
        assert!(!config.notifications_enabled);
        assert_eq!(config.checklist_root, PathBuf::from("/tmp/project"));
    }

    #[test]
    fn test_env_overrides_file() {
        let file: FileConfig = toml::from_str(
            r#"
            base_url = "https://from-file.example.com"
            polling_interval_minutes = 10
            "#,
        )
        .unwrap();

        let config = Config::resolve(Some(file), |key| match key {
            "TASKDECK_BASE_URL" => Some("https://from-env.example.com".to_string()),
            "TASKDECK_POLL_MINUTES" => Some("2".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "https://from-env.example.com");
        assert_eq!(config.polling_interval_minutes, 2);
    }

    #[test]
    fn test_interval_floor_is_one_minute() {
        let config = Config::resolve(None, |key| {
            (key == "TASKDECK_POLL_MINUTES").then(|| "0".to_string())
        });
        assert_eq!(config.polling_interval_minutes, 1);
    }

    #[test]
    fn test_blank_credentials_become_none() {
        let file: FileConfig = toml::from_str(r#"email = """#).unwrap();
        let config = Config::resolve(Some(file), no_env);
        assert_eq!(config.email, None);
    }
}
