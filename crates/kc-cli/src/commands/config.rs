//! Configuration and status commands.

use std::io::Write;

use crate::CliConfig;
use crate::cli::ConfigCommand;
use crate::output::{info, success};

/// Runs a config command.
pub fn run_config(cmd: ConfigCommand, config: &mut CliConfig) -> crate::CliResult<()> {
    match cmd {
        ConfigCommand::Show => show_config(config),
        ConfigCommand::Set { key, value } => {
            apply_setting(config, &key, &value)?;
            config.save()?;
            success(&format!("Set {key} = {value}"));
            Ok(())
        }
        ConfigCommand::Init => init_config(config),
    }
}

/// Shows the current configuration.
fn show_config(config: &CliConfig) -> crate::CliResult<()> {
    let config_path = CliConfig::config_path()?;

    info(&format!("Configuration file: {}", config_path.display()));
    println!();
    println!("server_url: {}", config.server_url);
    if let Some(realm) = &config.default_realm {
        println!("default_realm: {realm}");
    }
    println!("output_format: {:?}", config.output_format);

    Ok(())
}

/// Applies a single `key = value` setting.
fn apply_setting(config: &mut CliConfig, key: &str, value: &str) -> crate::CliResult<()> {
    match key {
        "server_url" | "server" => {
            config.server_url = value.to_string();
        }
        "default_realm" | "realm" => {
            config.default_realm = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.to_string())
            };
        }
        "output_format" | "output" => {
            config.output_format = value.parse()?;
        }
        _ => {
            return Err(crate::CliError::InvalidArgument(format!(
                "Unknown configuration key: {key}. Known keys: server_url, default_realm, output_format"
            )));
        }
    }
    Ok(())
}

/// Reads one trimmed line after printing a prompt.
fn prompt(label: &str, current: &str) -> crate::CliResult<String> {
    print!("{label} [{current}]: ");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Initializes configuration interactively.
fn init_config(config: &mut CliConfig) -> crate::CliResult<()> {
    let config_path = CliConfig::config_path()?;

    info("Initializing Keycloak CLI configuration...");
    println!();

    let server = prompt("Server URL", &config.server_url)?;
    if !server.is_empty() {
        config.server_url = server;
    }

    let current_realm = config.default_realm.clone().unwrap_or_else(|| "(none)".to_string());
    let realm = prompt("Default realm", &current_realm)?;
    if !realm.is_empty() && realm != "(none)" {
        config.default_realm = Some(realm);
    }

    let format = prompt(
        "Output format (table/json/yaml/quiet)",
        &format!("{:?}", config.output_format),
    )?;
    if let Ok(parsed) = format.parse() {
        config.output_format = parsed;
    }

    config.save()?;

    println!();
    success(&format!("Configuration saved to: {}", config_path.display()));
    Ok(())
}

/// Status command.
pub async fn run_status(config: &CliConfig, server: Option<&str>) -> crate::CliResult<()> {
    let client = super::ApiClient::new(config, server)?;

    info(&format!("Checking server status at {}...", client.base_url()));

    match client.get::<serde_json::Value>("/health").await {
        Ok(health) => {
            success("Server is reachable");
            println!();
            if let Some(status) = health.get("status").and_then(|v| v.as_str()) {
                println!("Status: {status}");
            }
            if let Some(version) = health.get("version").and_then(|v| v.as_str()) {
                println!("Version: {version}");
            }
            Ok(())
        }
        Err(e) => {
            crate::output::error(&format!("Server is not reachable: {e}"));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn settings_accept_aliases() {
        let mut config = CliConfig::default();
        apply_setting(&mut config, "server", "https://idp.example").unwrap();
        apply_setting(&mut config, "realm", "acme").unwrap();
        apply_setting(&mut config, "output", "yaml").unwrap();

        assert_eq!(config.server_url, "https://idp.example");
        assert_eq!(config.default_realm.as_deref(), Some("acme"));
        assert_eq!(config.output_format, OutputFormat::Yaml);
    }

    #[test]
    fn realm_can_be_cleared() {
        let mut config = CliConfig {
            default_realm: Some("acme".to_string()),
            ..CliConfig::default()
        };
        apply_setting(&mut config, "default_realm", "none").unwrap();
        assert_eq!(config.default_realm, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut config = CliConfig::default();
        assert!(apply_setting(&mut config, "database_url", "postgres://").is_err());
        assert!(apply_setting(&mut config, "output", "xml").is_err());
    }
}
