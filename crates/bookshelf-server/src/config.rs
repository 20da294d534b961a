//! Configuration loading for the book service.
//!
//! Configuration lives in an optional `bookshelf-config.yaml`. Every key
//! has a default, so an absent file or a partial file is fine.
//! Environment variables override file values for deployment settings.

use std::path::Path;
use std::time::Duration;

use bookshelf_api::ServerConfig;
use bookshelf_db::SqliteConfig;
use bookshelf_db::sqlite::DEFAULT_DATABASE_URL;
use serde::Deserialize;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "bookshelf-config.yaml";

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
    #[error("invalid {name}: {message}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration. Mirrors `bookshelf-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Database settings.
    #[serde(default)]
    pub database: DatabaseSection,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl ServiceConfig {
    /// Resolve and load the service configuration.
    ///
    /// An `explicit` path must exist; a missing file is
    /// [`ConfigError::Io`]. Without one, [`DEFAULT_CONFIG_PATH`] is read
    /// if present, else defaults are used. Environment overrides apply in
    /// every case. The flag reports whether a file was read.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, bool), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, true));
        }

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            Ok((Self::from_file(default_path)?, true))
        } else {
            let mut config = Self::default();
            config.apply_env_overrides()?;
            Ok((config, false))
        }
    }

    /// Load configuration from a YAML file, then apply environment
    /// overrides.
    ///
    /// Environment variables:
    /// - `BOOKSHELF_HOST` overrides `server.host`
    /// - `BOOKSHELF_PORT` overrides `server.port`
    /// - `DATABASE_URL` overrides `database.url`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides
    /// are applied.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("BOOKSHELF_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("BOOKSHELF_PORT") {
            self.server.port = port.trim().parse().map_err(|e| ConfigError::InvalidEnv {
                name: "BOOKSHELF_PORT",
                message: format!("{port:?}: {e}"),
            })?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        Ok(())
    }

    /// HTTP server settings for [`bookshelf_api::start_server`].
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
        }
    }

    /// Pool settings for [`bookshelf_db::Database::connect`].
    pub fn sqlite_config(&self) -> SqliteConfig {
        SqliteConfig::new(&self.database.url)
            .with_max_connections(self.database.max_connections)
            .with_connect_timeout(Duration::from_secs(self.database.connect_timeout_secs))
            .with_idle_timeout(Duration::from_secs(self.database.idle_timeout_secs))
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port.
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

/// Database settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseSection {
    /// `SQLite` URL.
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Seconds before an idle file-database connection is closed.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Filter used when `RUST_LOG` is unset (e.g. `info`, `bookshelf_db=debug`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_host() -> String {
    String::from("127.0.0.1")
}

const fn default_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    String::from(DEFAULT_DATABASE_URL)
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_connect_timeout_secs() -> u64 {
    5
}

const fn default_idle_timeout_secs() -> u64 {
    300
}

fn default_log_level() -> String {
    String::from("info")
}
