//! # Keycloak CLI
//!
//! Command-line tools for Keycloak Rust administration.

#![forbid(unsafe_code)]

use clap::Parser;
use kc_cli::{
    cli::{Cli, Command},
    commands::{run_client, run_config, run_status},
    config::CliConfig,
    output::error,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match CliConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    let output_format = cli.output.unwrap_or(config.output_format);

    let result = match cli.command {
        Command::Client(cmd) => {
            run_client(
                cmd,
                &config,
                cli.server.as_deref(),
                cli.realm.as_deref(),
                output_format,
            )
            .await
        }
        Command::Config(cmd) => run_config(cmd, &mut config),
        Command::Status => run_status(&config, cli.server.as_deref()).await,
    };

    if let Err(e) = result {
        error(&e.to_string());
        std::process::exit(1);
    }
}
