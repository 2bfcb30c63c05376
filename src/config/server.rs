//! Server configuration loading from config.toml
//!
//! Every field has a default, so the file is optional. Environment variables
//! (`DATABASE_URL`, `PORT`, `BIND_ADDRESS`) take precedence over the file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{net::SocketAddr, path::Path};
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Interface to listen on
    pub bind_address: String,
    /// TCP port to listen on
    pub port: u16,
    /// `SeaORM` connection string
    pub database_url: String,
    /// Allow any origin, method and header (the frontend runs on another port)
    pub permissive_cors: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            database_url: super::database::DEFAULT_DATABASE_URL.to_string(),
            permissive_cors: true,
        }
    }
}

impl AppConfig {
    /// Socket address built from `bind_address` and `port`.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.bind_address, self.port);
        addr.parse().map_err(Into::into)
    }

    /// Applies overrides from a lookup function, usually the process environment.
    ///
    /// Taking the lookup as a parameter keeps tests away from global env state.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(address) = lookup("BIND_ADDRESS") {
            self.bind_address = address;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port.trim().parse().map_err(|e| Error::Config {
                message: format!("PORT must be a port number, got {port:?}: {e}"),
            })?;
        }
        Ok(self)
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {path_ref:?}: {e}"),
    })
}

/// Loads `CONFIG_PATH` (default `./config.toml`) if it exists, then applies
/// environment overrides.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

    let config = if Path::new(&path).exists() {
        info!("Loading configuration from {path}");
        load_config(&path)?
    } else {
        info!("No configuration file at {path}, using defaults");
        AppConfig::default()
    };

    config.apply_overrides(|key| std::env::var(key).ok())
}
