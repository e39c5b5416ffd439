//! Database settings for the insert path.
//!
//! Read from an optional TOML file with a `[database]` table; command-line
//! flags and `EOPEN_DB_*` variables are layered on top by the binary.

use crate::error::EopenError;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DbConfig,
}

impl Config {
    /// Load from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, EopenError> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let content = std::fs::read_to_string(path)
            .map_err(|e| EopenError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, EopenError> {
        toml::from_str(content).map_err(|e| EopenError::Config(e.to_string()))
    }
}

/// Connection settings. Passed explicitly to the sink, never global.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// Schema the eopen tables live in
    pub schema: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig {
            host: "127.0.0.1".to_string(),
            port: 5432,
            database: "eopen".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            schema: "public".to_string(),
        }
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("schema", &self.schema)
            .finish()
    }
}
