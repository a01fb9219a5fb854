//! Configuration for the maklink bridge and CLI.
//!
//! TOML file + `MAKLINK_*` environment variables (env wins), credential
//! resolution, and translation to the settings the bridge needs at
//! startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use maklink_api::DEFAULT_BASE_URL;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no account credentials configured (set username/password or MAKLINK_USERNAME/MAKLINK_PASSWORD)")]
    NoCredentials,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the MAK Mobile service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Account username.
    pub username: Option<String>,

    /// Account password (plaintext — prefer `MAKLINK_PASSWORD`).
    pub password: Option<String>,

    /// Reconciliation cadence in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: None,
            password: None,
            poll_interval: default_poll_interval(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_poll_interval() -> u64 {
    10
}
fn default_timeout() -> u64 {
    15
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "maklink", "maklink").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("maklink");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from the canonical file plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the config from a specific file plus environment.
///
/// Precedence, lowest to highest: built-in defaults, the TOML file,
/// `MAKLINK_*` environment variables.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MAKLINK_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Serialize the config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Bridge settings ─────────────────────────────────────────────────

/// Validated, ready-to-use settings for constructing the bridge.
pub struct BridgeSettings {
    pub base_url: Url,
    pub username: String,
    pub password: SecretString,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Config {
    /// Validate and resolve everything the bridge needs at startup.
    pub fn bridge_settings(&self) -> Result<BridgeSettings, ConfigError> {
        let base_url: Url = self.base_url.parse().map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {}", self.base_url),
        })?;

        if self.poll_interval == 0 {
            return Err(ConfigError::Validation {
                field: "poll_interval".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let username = self.username.clone().ok_or(ConfigError::NoCredentials)?;
        let password = self
            .password
            .clone()
            .map(SecretString::from)
            .ok_or(ConfigError::NoCredentials)?;

        Ok(BridgeSettings {
            base_url,
            username,
            password,
            poll_interval: Duration::from_secs(self.poll_interval),
            timeout: Duration::from_secs(self.timeout),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_apply_without_file_or_env() {
        figment::Jail::expect_with(|jail| {
            let config = load_config_from(&jail.directory().join("missing.toml")).unwrap();
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            assert_eq!(config.poll_interval, 10);
            assert_eq!(config.timeout, 15);
            assert!(config.username.is_none());
            Ok(())
        });
    }

    #[test]
    fn file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "maklink.toml",
                r#"
                    username = "pitmaster"
                    poll_interval = 30
                "#,
            )?;
            let config = load_config_from(Path::new("maklink.toml")).unwrap();
            assert_eq!(config.username.as_deref(), Some("pitmaster"));
            assert_eq!(config.poll_interval, 30);
            assert_eq!(config.timeout, 15);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "maklink.toml",
                r#"
                    username = "pitmaster"
                    poll_interval = 30
                "#,
            )?;
            jail.set_env("MAKLINK_POLL_INTERVAL", "5");
            jail.set_env("MAKLINK_PASSWORD", "from-env");

            let config = load_config_from(Path::new("maklink.toml")).unwrap();
            assert_eq!(config.poll_interval, 5);
            assert_eq!(config.password.as_deref(), Some("from-env"));
            Ok(())
        });
    }

    #[test]
    fn bridge_settings_require_credentials() {
        let config = Config::default();
        assert!(matches!(
            config.bridge_settings(),
            Err(ConfigError::NoCredentials)
        ));
    }

    #[test]
    fn bridge_settings_validate_fields() {
        let config = Config {
            username: Some("pitmaster".into()),
            password: Some("secret".into()),
            ..Config::default()
        };
        let settings = config.bridge_settings().unwrap();
        assert_eq!(settings.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(settings.poll_interval, Duration::from_secs(10));

        let bad_url = Config {
            base_url: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            bad_url.bridge_settings(),
            Err(ConfigError::Validation { .. })
        ));

        let zero_interval = Config {
            username: Some("pitmaster".into()),
            password: Some("secret".into()),
            poll_interval: 0,
            ..Config::default()
        };
        assert!(matches!(
            zero_interval.bridge_settings(),
            Err(ConfigError::Validation { .. })
        ));
    }
}
