//! Client commands.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::CliConfig;
use crate::cli::ClientCommand;
use crate::config::OutputFormat;
use crate::output::{output, success};

use super::ApiClient;

/// Client representation for display.
#[derive(Debug, Clone, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct ClientDisplay {
    /// Internal ID.
    pub id: String,
    /// Client ID.
    #[tabled(rename = "Client ID")]
    pub client_id: String,
    /// Client name.
    #[serde(default)]
    pub name: String,
    /// Whether the client is enabled.
    pub enabled: bool,
    /// Whether it's a public client.
    #[tabled(rename = "Public")]
    #[serde(default)]
    pub public_client: bool,
}

/// Installation provider for display.
#[derive(Debug, Clone, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct InstallationProviderDisplay {
    /// Provider ID.
    pub id: String,
    /// Human-readable label.
    #[tabled(rename = "Format")]
    pub display_type: String,
    /// Suggested file name.
    pub filename: String,
    /// Media type of the generated content.
    #[tabled(rename = "Media Type")]
    pub media_type: String,
}

/// Runs a client command.
pub async fn run_client(
    cmd: ClientCommand,
    config: &CliConfig,
    server: Option<&str>,
    realm_arg: Option<&str>,
    output_format: OutputFormat,
) -> crate::CliResult<()> {
    let client = ApiClient::new(config, server)?;

    match cmd {
        ClientCommand::List { realm } => {
            let realm = get_realm(config, realm.as_deref().or(realm_arg))?;
            list_clients(&client, &realm, output_format).await
        }
        ClientCommand::Installation {
            client_id,
            realm,
            provider,
            file,
        } => {
            let realm = get_realm(config, realm.as_deref().or(realm_arg))?;
            download_installation(&client, &realm, &client_id, &provider, file.as_deref()).await
        }
        ClientCommand::InstallationProviders { client_id, realm } => {
            let realm = get_realm(config, realm.as_deref().or(realm_arg))?;
            list_installation_providers(&client, &realm, &client_id, output_format).await
        }
    }
}

/// Resolves the realm from arguments or configuration.
fn get_realm(config: &CliConfig, realm_arg: Option<&str>) -> crate::CliResult<String> {
    config.effective_realm(realm_arg).ok_or_else(|| {
        crate::CliError::InvalidArgument(
            "realm is required (use --realm or set default_realm)".to_string(),
        )
    })
}

/// Finds a client's internal ID by its OAuth client ID.
async fn find_client_id(
    api_client: &ApiClient,
    realm: &str,
    client_id: &str,
) -> crate::CliResult<String> {
    let clients: Vec<ClientDisplay> = api_client
        .get(&format!(
            "/admin/realms/{}/clients?clientId={}",
            urlencoding::encode(realm),
            urlencoding::encode(client_id)
        ))
        .await?;

    clients
        .into_iter()
        .find(|c| c.client_id == client_id)
        .map(|c| c.id)
        .ok_or_else(|| crate::CliError::NotFound {
            resource_type: "Client".to_string(),
            id: client_id.to_string(),
        })
}

/// Lists clients in a realm.
async fn list_clients(
    client: &ApiClient,
    realm: &str,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let clients: Vec<ClientDisplay> = client
        .get(&format!(
            "/admin/realms/{}/clients",
            urlencoding::encode(realm)
        ))
        .await?;
    output(&clients, format)
}

/// Fetches an installation file and writes it to `file` or stdout.
async fn download_installation(
    client: &ApiClient,
    realm: &str,
    client_id: &str,
    provider: &str,
    file: Option<&Path>,
) -> crate::CliResult<()> {
    let internal_id = find_client_id(client, realm, client_id).await?;
    let content = client
        .get_text(&format!(
            "/admin/realms/{}/clients/{}/installation/providers/{}",
            urlencoding::encode(realm),
            internal_id,
            urlencoding::encode(provider)
        ))
        .await?;

    match file {
        Some(path) => {
            std::fs::write(path, &content)?;
            success(&format!(
                "Wrote {provider} installation for '{client_id}' to {}",
                path.display()
            ));
        }
        None => print!("{content}"),
    }
    Ok(())
}

/// Lists the installation formats available for a client.
async fn list_installation_providers(
    client: &ApiClient,
    realm: &str,
    client_id: &str,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let internal_id = find_client_id(client, realm, client_id).await?;
    let providers: Vec<InstallationProviderDisplay> = client
        .get(&format!(
            "/admin/realms/{}/clients/{}/installation/providers",
            urlencoding::encode(realm),
            internal_id
        ))
        .await?;
    output(&providers, format)
}
