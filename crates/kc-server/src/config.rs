//! Server configuration.
//!
//! Configuration is loaded from an optional TOML file (`KC_CONFIG_FILE`)
//! and then overridden by environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context;
use kc_core::{Config, InstallationConfig};
use url::Url;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host to bind to.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Externally reachable base URL (root of generated issuer URLs).
    pub base_url: Url,

    /// Realm import file loaded at startup.
    pub import_file: Option<PathBuf>,

    /// Client installation settings.
    pub installation: InstallationConfig,
}

impl ServerConfig {
    /// Loads configuration from the environment.
    ///
    /// Reads `.env` if present.
    ///
    /// ## Errors
    ///
    /// Returns an error if the config file cannot be read or a variable
    /// holds an invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let base = match std::env::var("KC_CONFIG_FILE") {
            Ok(path) => Config::load(Path::new(&path))
                .with_context(|| format!("loading config file {path}"))?,
            Err(_) => Config::default(),
        };

        Self::from_lookup(base, |key| std::env::var(key).ok())
    }

    /// Applies environment overrides from `lookup` on top of `base`.
    ///
    /// ## Errors
    ///
    /// Returns an error if a variable holds an invalid value.
    pub fn from_lookup<F>(base: Config, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Config {
            server,
            mut installation,
        } = base;

        let host = lookup("KC_HOST").unwrap_or(server.host);
        let port = match lookup("KC_PORT") {
            Some(port) => port.parse().with_context(|| format!("invalid KC_PORT '{port}'"))?,
            None => server.port,
        };
        let base_url = lookup("KC_BASE_URL").unwrap_or(server.base_url);
        let base_url =
            Url::parse(&base_url).with_context(|| format!("invalid KC_BASE_URL '{base_url}'"))?;

        let import_file = lookup("KC_IMPORT_FILE").map(PathBuf::from);

        if let Some(name) = lookup("KC_INSTALLATION_DISPLAY_NAME") {
            installation.display_name = Some(name).filter(|n| !n.trim().is_empty());
        }
        if let Some(scope) = lookup("KC_INSTALLATION_SCOPE") {
            installation.active_scope = match scope.trim().to_ascii_lowercase().as_str() {
                "active" => true,
                "commented" => false,
                other => anyhow::bail!(
                    "invalid KC_INSTALLATION_SCOPE '{other}', expected 'active' or 'commented'"
                ),
            };
        }
        if let Some(fallback) = lookup("KC_INSTALLATION_ISSUER_FALLBACK") {
            installation.issuer_realm_fallback = fallback
                .parse()
                .with_context(|| format!("invalid KC_INSTALLATION_ISSUER_FALLBACK '{fallback}'"))?;
        }

        Ok(Self {
            host,
            port,
            base_url,
            import_file,
            installation,
        })
    }

    /// Creates a configuration for testing, bound to a random local port.
    #[must_use]
    pub fn for_testing(base_url: Url) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            base_url,
            import_file: None,
            installation: InstallationConfig::default(),
        }
    }
}
