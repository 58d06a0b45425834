//! Configuration management for the lodestone server

use anyhow::{Context, Result};
use lodestone_store::sqlite::DEFAULT_DB_PATH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3030;

/// Persisted settings from `<config_dir>/lodestone/config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub database: Option<String>,
    pub bind: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved settings the server starts with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub database_url: String,
    pub bind: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("lodestone");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Merge command-line values over the file, then over built-in defaults
    pub fn resolve(
        &self,
        database: Option<String>,
        bind: Option<String>,
        port: Option<u16>,
    ) -> ServerSettings {
        let database = database
            .or_else(|| self.database.clone())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        ServerSettings {
            database_url: database_url(&database),
            bind: bind
                .or_else(|| self.bind.clone())
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            port: port.or(self.port).unwrap_or(DEFAULT_PORT),
        }
    }
}

/// Turn a bare file path into a SQLite URL; URLs pass through untouched
pub fn database_url(database: &str) -> String {
    if database.contains("://") || database.starts_with("sqlite:") {
        database.to_string()
    } else {
        format!("sqlite:{}?mode=rwc", database)
    }
}

/// Local file behind a SQLite URL; `None` for in-memory databases
pub fn database_file(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    if path.is_empty() || path.contains(":memory:") || query.contains("mode=memory") {
        return None;
    }
    Some(PathBuf::from(path))
}
