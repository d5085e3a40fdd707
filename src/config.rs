//! Top-level application configuration.
//!
//! Configuration is stored in `config.yaml` under the platform config
//! directory (override with `TURNOS_CONFIG`) and includes:
//! - Backing store connection (URL, API key, table name)
//! - Display tuning (refresh period, snapshot limit, hide delay)
//! - Speech synthesis settings
//!
//! Store credentials can also come from `TURNOS_STORE_URL` and
//! `TURNOS_STORE_API_KEY`; environment variables win over the file.

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TurnosError};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backing store connection
    #[serde(default, skip_serializing_if = "StoreConfig::is_default")]
    pub store: StoreConfig,

    /// Display tuning
    #[serde(default, skip_serializing_if = "DisplayConfig::is_default")]
    pub display: DisplayConfig,

    /// Speech synthesis settings
    #[serde(default, skip_serializing_if = "SpeechConfig::is_default")]
    pub speech: SpeechConfig,
}

/// Backing store connection configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the hosted store's REST endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// API key sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Tickets relation name (default: "tickets")
    #[serde(default = "default_table")]
    pub table: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_store_timeout")]
    pub timeout: u64,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("table", &self.table)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn default_table() -> String {
    crate::types::TICKETS_TABLE.to_string()
}

fn default_store_timeout() -> u64 {
    30
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            table: default_table(),
            timeout: default_store_timeout(),
        }
    }
}

impl StoreConfig {
    /// Check if this config has default values (for serialization skip)
    pub fn is_default(&self) -> bool {
        self.url.is_none()
            && self.api_key.is_none()
            && self.table == default_table()
            && self.timeout == default_store_timeout()
    }
}

/// Display tuning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Poll period for clock tick and snapshot re-fetch, in seconds (default: 5)
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    /// Maximum rows fetched per snapshot (default: 60)
    #[serde(default = "default_snapshot_limit")]
    pub snapshot_limit: usize,

    /// Seconds an announced ticket stays visible before the client-side hide (default: 15)
    #[serde(default = "default_hide_delay_secs")]
    pub hide_delay_secs: u64,

    /// Business name shown in the board header
    #[serde(default = "default_business_name")]
    pub business_name: String,
}

fn default_refresh_secs() -> u64 {
    5
}

fn default_snapshot_limit() -> usize {
    crate::store::SNAPSHOT_LIMIT
}

fn default_hide_delay_secs() -> u64 {
    15
}

fn default_business_name() -> String {
    "Turnos".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
            snapshot_limit: default_snapshot_limit(),
            hide_delay_secs: default_hide_delay_secs(),
            business_name: default_business_name(),
        }
    }
}

impl DisplayConfig {
    /// Check if this config has default values (for serialization skip)
    pub fn is_default(&self) -> bool {
        self.refresh_secs == default_refresh_secs()
            && self.snapshot_limit == default_snapshot_limit()
            && self.hide_delay_secs == default_hide_delay_secs()
            && self.business_name == default_business_name()
    }
}

/// Speech synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Whether spoken announcements are enabled (default: true)
    #[serde(default = "default_speech_enabled")]
    pub enabled: bool,

    /// Speech synthesizer command (default: "espeak-ng")
    #[serde(default = "default_speech_command")]
    pub command: String,

    /// Voice / locale passed to the synthesizer (default: "es")
    #[serde(default = "default_speech_voice")]
    pub voice: String,

    /// Speaking rate in words per minute (default: 150)
    #[serde(default = "default_speech_rate")]
    pub rate: u32,
}

fn default_speech_enabled() -> bool {
    true
}

fn default_speech_command() -> String {
    "espeak-ng".to_string()
}

fn default_speech_voice() -> String {
    "es".to_string()
}

fn default_speech_rate() -> u32 {
    150
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_speech_enabled(),
            command: default_speech_command(),
            voice: default_speech_voice(),
            rate: default_speech_rate(),
        }
    }
}

impl SpeechConfig {
    /// Check if this config has default values (for serialization skip)
    pub fn is_default(&self) -> bool {
        self.enabled == default_speech_enabled()
            && self.command == default_speech_command()
            && self.voice == default_speech_voice()
            && self.rate == default_speech_rate()
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("TURNOS_CONFIG")
            && !path.is_empty()
        {
            return PathBuf::from(path);
        }
        directories::ProjectDirs::from("", "", "turnos")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from("turnos.yaml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            TurnosError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TurnosError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            TurnosError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        // Restrictive permissions: the file may hold an API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, permissions).map_err(|e| {
                TurnosError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to set permissions on config at {}: {}",
                        path.display(),
                        e
                    ),
                ))
            })?;
        }

        Ok(())
    }

    /// Get the store URL from the environment or the config file
    pub fn store_url(&self) -> Option<String> {
        if let Ok(url) = env::var("TURNOS_STORE_URL")
            && !url.is_empty()
        {
            return Some(url);
        }
        self.store.url.clone()
    }

    /// Get the store API key from the environment or the config file
    pub fn store_api_key(&self) -> Option<String> {
        if let Ok(key) = env::var("TURNOS_STORE_API_KEY")
            && !key.is_empty()
        {
            return Some(key);
        }
        self.store.api_key.clone()
    }

    /// Get the store request timeout duration
    pub fn store_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.store.timeout)
    }

    /// Get a configuration value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "store.url" => Ok(self.store.url.clone().unwrap_or_default()),
            "store.api_key" => Ok(self.store.api_key.clone().unwrap_or_default()),
            "store.table" => Ok(self.store.table.clone()),
            "store.timeout" => Ok(self.store.timeout.to_string()),
            "display.refresh_secs" => Ok(self.display.refresh_secs.to_string()),
            "display.snapshot_limit" => Ok(self.display.snapshot_limit.to_string()),
            "display.hide_delay_secs" => Ok(self.display.hide_delay_secs.to_string()),
            "display.business_name" => Ok(self.display.business_name.clone()),
            "speech.enabled" => Ok(self.speech.enabled.to_string()),
            "speech.command" => Ok(self.speech.command.clone()),
            "speech.voice" => Ok(self.speech.voice.clone()),
            "speech.rate" => Ok(self.speech.rate.to_string()),
            _ => Err(TurnosError::Config(format!("unknown config key '{key}'"))),
        }
    }

    /// Set a configuration value by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "store.url" => self.store.url = Some(value.to_string()),
            "store.api_key" => self.store.api_key = Some(value.to_string()),
            "store.table" => self.store.table = value.to_string(),
            "store.timeout" => self.store.timeout = parse_num(key, value)?,
            "display.refresh_secs" => self.display.refresh_secs = parse_num(key, value)?,
            "display.snapshot_limit" => self.display.snapshot_limit = parse_num(key, value)?,
            "display.hide_delay_secs" => self.display.hide_delay_secs = parse_num(key, value)?,
            "display.business_name" => self.display.business_name = value.to_string(),
            "speech.enabled" => {
                self.speech.enabled = value.parse().map_err(|_| {
                    TurnosError::Config(format!("'{key}' expects true or false, got '{value}'"))
                })?
            }
            "speech.command" => self.speech.command = value.to_string(),
            "speech.voice" => self.speech.voice = value.to_string(),
            "speech.rate" => self.speech.rate = parse_num(key, value)?,
            _ => return Err(TurnosError::Config(format!("unknown config key '{key}'"))),
        }
        Ok(())
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| TurnosError::Config(format!("'{key}' expects a number, got '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.store.url.is_none());
        assert_eq!(config.store.table, "tickets");
        assert_eq!(config.display.refresh_secs, 5);
        assert_eq!(config.display.snapshot_limit, 60);
        assert_eq!(config.display.hide_delay_secs, 15);
        assert!(config.speech.enabled);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = Config::default();
        config.store.url = Some("https://example.supabase.co/rest/v1".to_string());
        config.store.api_key = Some("sk_test123".to_string());
        config.display.hide_delay_secs = 20;

        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        let parsed: Config = serde_yaml_ng::from_str(&yaml).unwrap();

        assert_eq!(
            parsed.store.url.as_deref(),
            Some("https://example.supabase.co/rest/v1")
        );
        assert_eq!(parsed.display.hide_delay_secs, 20);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
store:
  url: https://example.supabase.co/rest/v1
"#;
        let config: Config = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.store.table, "tickets");
        assert_eq!(config.store.timeout, 30);
        assert_eq!(config.display.refresh_secs, 5);
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut config = Config::default();
        config.set("display.refresh_secs", "10").unwrap();
        assert_eq!(config.get("display.refresh_secs").unwrap(), "10");

        config.set("speech.enabled", "false").unwrap();
        assert_eq!(config.get("speech.enabled").unwrap(), "false");
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let mut config = Config::default();
        assert!(config.set("display.color", "blue").is_err());
        assert!(config.get("display.color").is_err());
    }

    #[test]
    fn test_set_rejects_bad_number() {
        let mut config = Config::default();
        assert!(config.set("display.refresh_secs", "soon").is_err());
        assert!(config.set("speech.enabled", "maybe").is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = Config::default();
        config.store.api_key = Some("sk_secret".to_string());
        let debug = format!("{:?}", config.store);
        assert!(!debug.contains("sk_secret"));
        assert!(debug.contains("REDACTED"));
    }
}
