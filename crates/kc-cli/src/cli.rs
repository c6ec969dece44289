//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;

/// Installation provider used when `--provider` is not given.
pub const DEFAULT_INSTALLATION_PROVIDER: &str = "oauth2-proxy-env";

/// Keycloak CLI - Administration tool for Keycloak Rust.
#[derive(Debug, Parser)]
#[command(name = "kc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Server URL (overrides config).
    #[arg(short, long, env = "KC_SERVER_URL")]
    pub server: Option<String>,

    /// Default realm (overrides config).
    #[arg(short, long, env = "KC_REALM")]
    pub realm: Option<String>,

    /// Output format (overrides config).
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Client commands.
    #[command(subcommand)]
    Client(ClientCommand),

    /// Configuration management.
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Server status check.
    Status,
}

/// Client commands.
#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// List clients in a realm.
    List {
        /// Realm name.
        #[arg(long)]
        realm: Option<String>,
    },

    /// Download a client installation file.
    Installation {
        /// Client ID (OAuth client identifier).
        client_id: String,

        /// Realm name.
        #[arg(long)]
        realm: Option<String>,

        /// Installation provider ID.
        #[arg(long, default_value = DEFAULT_INSTALLATION_PROVIDER)]
        provider: String,

        /// Write to this file instead of stdout.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// List installation formats available for a client.
    InstallationProviders {
        /// Client ID (OAuth client identifier).
        client_id: String,

        /// Realm name.
        #[arg(long)]
        realm: Option<String>,
    },
}

/// Config commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Initialize configuration interactively.
    Init,
}
