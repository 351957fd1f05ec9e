//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `catalog.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use catalog_domain::product::ListOrder;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Catalog behaviour.
    pub catalog: CatalogConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
    /// Drop and recreate the schema when migrations no longer match.
    /// Deletes every stored product.
    pub recreate_on_schema_change: bool,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Catalog settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Order of `GET /api/products`.
    pub list_order: ListOrder,
}

impl Config {
    /// Load configuration from `catalog.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if an
    /// override holds an unusable value.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("catalog.toml")?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("CATALOG_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("CATALOG_PORT") {
            self.server.port = parse_override("CATALOG_PORT", &val)?;
        }
        if let Some(val) = lookup("CATALOG_BIND") {
            let (host, port) = val.rsplit_once(':').ok_or_else(|| {
                ConfigError::Validation(format!("CATALOG_BIND {val:?} is not host:port"))
            })?;
            self.server.port = parse_override("CATALOG_BIND", port)?;
            self.server.host = host.to_string();
        }
        if let Some(val) = lookup("CATALOG_REQUEST_TIMEOUT_SECS") {
            self.server.request_timeout_secs =
                parse_override("CATALOG_REQUEST_TIMEOUT_SECS", &val)?;
        }
        if let Some(val) = lookup("CATALOG_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = lookup("CATALOG_RECREATE_ON_SCHEMA_CHANGE") {
            self.database.recreate_on_schema_change =
                match val.trim().to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" => true,
                    "0" | "false" | "no" => false,
                    _ => {
                        return Err(ConfigError::Validation(format!(
                            "CATALOG_RECREATE_ON_SCHEMA_CHANGE {val:?} is not a boolean"
                        )));
                    }
                };
        }
        if let Some(val) = lookup("CATALOG_LIST_ORDER") {
            self.catalog.list_order = val
                .parse::<ListOrder>()
                .map_err(|err| ConfigError::Validation(err.to_string()))?;
        }
        if let Some(val) = lookup("CATALOG_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Return the per-request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, val: &str) -> Result<T, ConfigError> {
    val.trim()
        .parse()
        .map_err(|_| ConfigError::Validation(format!("{key} {val:?} is not a valid value")))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: 30,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:catalog.db?mode=rwc".to_string(),
            recreate_on_schema_change: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "catalogd=info,catalog=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
