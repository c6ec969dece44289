//! # kc-cli
//!
//! Command-line client for the Keycloak Rust admin API.
//!
//! Lists clients and downloads client installation files, such as the
//! oauth2-proxy environment file, from a running server.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
