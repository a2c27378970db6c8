//! Configuration loading and typed config structures.
//!
//! The deployment configuration lives in `swim4love.yaml`. Every section
//! and field has a default, so an empty file (or no file at all) gives a
//! server on `0.0.0.0:5000` with an in-memory store.
//!
//! Environment variables override the file for the values that usually
//! differ per machine:
//!
//! - `DATABASE_URL` overrides `database.url`
//! - `SWIM4LOVE_HOST` overrides `server.host`
//! - `SWIM4LOVE_PORT` overrides `server.port`
//! - `SWIM4LOVE_ROOT_DIR` overrides `avatars.root_dir`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value for {var}: {reason}")]
    Env {
        /// Name of the environment variable.
        var: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration. Mirrors `swim4love.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// Listen address.
    #[serde(default)]
    pub server: ServerSection,

    /// Database connection.
    #[serde(default)]
    pub database: DatabaseSection,

    /// Avatar storage.
    #[serde(default)]
    pub avatars: AvatarSection,

    /// Event details shown on the pages.
    #[serde(default)]
    pub event: EventSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl ServiceConfig {
    /// Load configuration from a YAML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Env`] if an override cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Parse configuration from a YAML string, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to `()`, not to a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides looked up through `lookup` (normally `std::env::var`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `SWIM4LOVE_PORT` is not a port number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url);
        }
        if let Some(host) = lookup("SWIM4LOVE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SWIM4LOVE_PORT") {
            self.server.port = port.parse().map_err(|e| ConfigError::Env {
                var: "SWIM4LOVE_PORT",
                reason: format!("{e}"),
            })?;
        }
        if let Some(root) = lookup("SWIM4LOVE_ROOT_DIR") {
            self.avatars.root_dir = PathBuf::from(root);
        }
        Ok(())
    }
}

/// HTTP listen address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    5000
}

/// `PostgreSQL` connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseSection {
    /// Connection URL. When absent the server keeps swimmers in memory.
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl DatabaseSection {
    /// The connect timeout as a [`Duration`].
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_connect_timeout_secs() -> u64 {
    5
}

/// Where avatar images live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AvatarSection {
    /// Application root directory.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Avatar directory, relative to `root_dir`.
    #[serde(default = "default_avatar_dir")]
    pub avatar_dir: PathBuf,

    /// File name of the fallback image inside the avatar directory.
    #[serde(default = "default_avatar_file")]
    pub default_avatar: String,

    /// Largest accepted request body for `/swimmer/add`, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl AvatarSection {
    /// The resolved avatar directory (`root_dir/avatar_dir`).
    pub fn directory(&self) -> PathBuf {
        self.root_dir.join(&self.avatar_dir)
    }
}

impl Default for AvatarSection {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            avatar_dir: default_avatar_dir(),
            default_avatar: default_avatar_file(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_avatar_dir() -> PathBuf {
    PathBuf::from("static/avatars")
}

fn default_avatar_file() -> String {
    String::from("default.jpg")
}

const fn default_max_upload_bytes() -> usize {
    5_242_880
}

/// Event details rendered into the pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventSection {
    /// Event title.
    #[serde(default = "default_event_name")]
    pub name: String,
}

impl Default for EventSection {
    fn default() -> Self {
        Self {
            name: default_event_name(),
        }
    }
}

fn default_event_name() -> String {
    String::from("Swim4Love")
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    String::from("info")
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = ServiceConfig::parse_without_env("").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.server.port, 5000);
        assert!(config.database.url.is_none());
        assert_eq!(
            config.avatars.directory(),
            PathBuf::from("./static/avatars")
        );
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let yaml = r"
server:
  port: 8080
avatars:
  root_dir: /srv/swim4love
  default_avatar: anon.jpg
logging:
  format: json
";
        let config = ServiceConfig::parse_without_env(yaml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(
            config.avatars.directory(),
            PathBuf::from("/srv/swim4love/static/avatars")
        );
        assert_eq!(config.avatars.default_avatar, "anon.jpg");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = ServiceConfig::parse_without_env("server:\n  port: 8080\n").unwrap();
        let env: HashMap<&str, &str> = [
            ("DATABASE_URL", "postgresql://localhost/swim"),
            ("SWIM4LOVE_PORT", "9000"),
            ("SWIM4LOVE_ROOT_DIR", "/data"),
        ]
        .into_iter()
        .collect();
        config
            .apply_overrides(|var| env.get(var).map(|v| (*v).to_owned()))
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgresql://localhost/swim")
        );
        assert_eq!(config.avatars.root_dir, PathBuf::from("/data"));
    }

    #[test]
    fn bad_port_override_is_an_error() {
        let mut config = ServiceConfig::default();
        let err = config
            .apply_overrides(|var| (var == "SWIM4LOVE_PORT").then(|| "harbor".to_owned()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "SWIM4LOVE_PORT", .. }));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = ServiceConfig::parse_without_env("server: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }
}
