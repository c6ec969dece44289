//! Configuration management for Keycloak Rust.
//!
//! Supports loading configuration from environment variables, files, and CLI arguments.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Main configuration structure for Keycloak.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Client installation configuration.
    #[serde(default)]
    pub installation: InstallationConfig,
}

impl Config {
    /// Parses configuration from TOML text. Missing sections and fields
    /// take their defaults.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid configuration.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or
    /// [`Error::Config`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Externally reachable base URL for the server.
    ///
    /// Used as the root of every issuer URL handed out in client
    /// installation files.
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Client installation configuration.
///
/// Controls the parts of generated client installation files that
/// differ between deployments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationConfig {
    /// Fixed provider display label.
    ///
    /// When unset, the realm name (or the realm id when the name is empty)
    /// is used.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Fall back to the realm id when building an issuer URL for a realm
    /// with an empty name.
    #[serde(default)]
    pub issuer_realm_fallback: bool,

    /// Emit the OIDC scope as an active assignment rather than a
    /// commented example.
    #[serde(default)]
    pub active_scope: bool,
}
