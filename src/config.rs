use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::clients::record_api::RecordApiConfig;

pub const ENV_PROJECT_ID: &str = "STAFFDESK_PROJECT_ID";
pub const ENV_PUBLIC_KEY: &str = "STAFFDESK_PUBLIC_KEY";
pub const ENV_SMS_FUNCTION: &str = "STAFFDESK_SMS_FUNCTION";
pub const ENV_BASE_URL: &str = "STAFFDESK_BASE_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub remote: RemoteConfig,

    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// `pretty` for terminals, `json` for log shippers
    pub log_format: LogFormat,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// The hosted record API.
    Remote,
    /// Bundled demo data held in process memory.
    #[default]
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub mode: StorageMode,

    pub base_url: String,

    pub project_id: String,

    pub public_key: String,

    pub timeout_seconds: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        let api = RecordApiConfig::default();
        Self {
            mode: StorageMode::default(),
            base_url: api.base_url,
            project_id: String::new(),
            public_key: String::new(),
            timeout_seconds: api.timeout_seconds,
        }
    }
}

impl RemoteConfig {
    #[must_use]
    pub fn api_config(&self) -> RecordApiConfig {
        RecordApiConfig {
            base_url: self.base_url.clone(),
            project_id: self.project_id.clone(),
            public_key: self.public_key.clone(),
            timeout_seconds: self.timeout_seconds,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Write an activity-log entry for every employee mutation.
    pub activity_log: bool,

    /// Server-side function that sends the welcome SMS. Empty disables it.
    pub sms_function: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            activity_log: true,
            sms_function: String::new(),
        }
    }
}

impl Config {
    /// Loads `.env`, the first config file found, then environment overrides.
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from: {}", path.display());
        }

        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Non-empty values returned by `lookup` replace the file settings.
    /// Setting a project id switches to remote mode.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(project_id) = get(ENV_PROJECT_ID) {
            self.remote.project_id = project_id;
            self.remote.mode = StorageMode::Remote;
        }
        if let Some(public_key) = get(ENV_PUBLIC_KEY) {
            self.remote.public_key = public_key;
        }
        if let Some(base_url) = get(ENV_BASE_URL) {
            self.remote.base_url = base_url;
        }
        if let Some(function) = get(ENV_SMS_FUNCTION) {
            self.notifications.sms_function = function;
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_config_path();
        self.save_to_path(&path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("staffdesk").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".staffdesk").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.remote.mode == StorageMode::Remote {
            if self.remote.project_id.is_empty() {
                anyhow::bail!("remote.project_id is required in remote mode (or set {ENV_PROJECT_ID})");
            }
            if self.remote.public_key.is_empty() {
                anyhow::bail!("remote.public_key is required in remote mode (or set {ENV_PUBLIC_KEY})");
            }
            url::Url::parse(&self.remote.base_url)
                .with_context(|| format!("Invalid remote.base_url: {}", self.remote.base_url))?;
        }

        if self.remote.timeout_seconds == 0 {
            anyhow::bail!("remote.timeout_seconds must be > 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.worker_threads, 2);
        assert_eq!(config.remote.mode, StorageMode::Memory);
        assert_eq!(config.remote.timeout_seconds, 30);
        assert!(config.notifications.activity_log);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[remote]"));
        assert!(toml_str.contains("[notifications]"));
        assert!(toml_str.contains("mode = \"memory\""));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"
            log_format = "json"

            [remote]
            mode = "remote"
            project_id = "abc123"
            public_key = "pk_live"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.log_format, LogFormat::Json);
        assert_eq!(config.remote.mode, StorageMode::Remote);
        assert_eq!(config.remote.base_url, "http://localhost:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_remote_mode_requires_credentials() {
        let mut config = Config::default();
        config.remote.mode = StorageMode::Remote;
        assert!(config.validate().is_err());

        config.remote.project_id = "abc".to_string();
        config.remote.public_key = "key".to_string();
        config.remote.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_PROJECT_ID, "proj"),
            (ENV_PUBLIC_KEY, "key"),
            (ENV_SMS_FUNCTION, "send_sms"),
            (ENV_BASE_URL, "  "),
        ]);

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.remote.mode, StorageMode::Remote);
        assert_eq!(config.remote.project_id, "proj");
        assert_eq!(config.remote.public_key, "key");
        assert_eq!(config.notifications.sms_function, "send_sms");
        assert_eq!(config.remote.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = std::env::temp_dir().join(format!("staffdesk-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let mut config = Config::default();
        config.notifications.sms_function = "welcome".to_string();
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.notifications.sms_function, "welcome");
        std::fs::remove_dir_all(dir).ok();
    }
}
