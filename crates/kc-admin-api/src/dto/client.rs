//! Client DTOs for the Admin API.

use std::collections::HashMap;

use kc_model::{Client, Protocol};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client representation, as found in realm import files.
///
/// Field names follow Keycloak's JSON representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRepresentation {
    /// Internal identifier. Generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Client identifier (OAuth client_id).
    pub client_id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the client is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    // Client type
    /// Whether this is a public client.
    #[serde(default)]
    pub public_client: bool,
    /// Whether this is bearer-only.
    #[serde(default)]
    pub bearer_only: bool,
    /// Client secret (for confidential clients).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Client authenticator type. Defaults to `client-secret`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_authenticator_type: Option<String>,
    /// Cluster node re-registration timeout in seconds.
    #[serde(default)]
    pub node_re_registration_timeout: i32,

    // OAuth flows
    /// Enable Authorization Code flow.
    #[serde(default = "default_true")]
    pub standard_flow_enabled: bool,
    /// Enable Service Account.
    #[serde(default)]
    pub service_accounts_enabled: bool,

    // URLs
    /// Root URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_url: Option<String>,
    /// Base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Allowed redirect URIs, in order of preference.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redirect_uris: Vec<String>,
    /// Allowed web origins (CORS).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub web_origins: Vec<String>,

    /// Protocol (openid-connect or saml).
    #[serde(default)]
    pub protocol: Option<Protocol>,
    /// Custom attributes.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
}

fn default_true() -> bool {
    true
}

impl ClientRepresentation {
    /// Converts this representation to a domain `Client` model.
    #[must_use]
    pub fn into_client(self, realm_id: Uuid) -> Client {
        let mut client = Client::new(realm_id, self.client_id);
        if let Some(id) = self.id {
            client.id = id;
        }
        if let Some(authenticator_type) = self.client_authenticator_type {
            client.client_authenticator_type = authenticator_type;
        }
        if let Some(protocol) = self.protocol {
            client.protocol = protocol;
        }
        client.name = self.name;
        client.description = self.description;
        client.enabled = self.enabled;
        client.public_client = self.public_client;
        client.bearer_only = self.bearer_only;
        client.secret = self.secret;
        client.node_re_registration_timeout = self.node_re_registration_timeout;
        client.standard_flow_enabled = self.standard_flow_enabled;
        client.service_accounts_enabled = self.service_accounts_enabled;
        client.root_url = self.root_url;
        client.base_url = self.base_url;
        client.set_redirect_uris(self.redirect_uris);
        client.web_origins = self.web_origins.into_iter().collect();
        client.attributes = self.attributes;
        client
    }
}

/// Client listing entry. Never carries the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    /// Internal unique identifier.
    pub id: Uuid,
    /// Client identifier (OAuth client_id).
    pub client_id: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Protocol.
    pub protocol: Protocol,
    /// Whether this is a public client.
    pub public_client: bool,
    /// Whether this is bearer-only.
    pub bearer_only: bool,
    /// Whether the client is enabled.
    pub enabled: bool,
}

impl From<Client> for ClientSummary {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            client_id: client.client_id,
            name: client.name,
            protocol: client.protocol,
            public_client: client.public_client,
            bearer_only: client.bearer_only,
            enabled: client.enabled,
        }
    }
}

/// Query parameters for listing clients.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSearchParams {
    /// Exact `client_id` match.
    pub client_id: Option<String>,
}
