//! Client domain model.
//!
//! Clients represent applications that can request authentication
//! and authorization from Keycloak (OAuth 2.0 / OIDC clients).

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Protocol type for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Protocol {
    /// `OpenID` Connect protocol.
    #[default]
    OpenidConnect,
    /// SAML 2.0 protocol.
    Saml,
}

impl Protocol {
    /// Returns the protocol identifier as used in provider metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenidConnect => "openid-connect",
            Self::Saml => "saml",
        }
    }
}

/// Client type based on OAuth 2.0 client types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    /// Confidential client (can keep secrets).
    #[default]
    Confidential,
    /// Public client (cannot keep secrets, e.g., SPAs, mobile apps).
    Public,
    /// Bearer-only client (only validates tokens, no login).
    BearerOnly,
}

/// A Keycloak client (OAuth 2.0 / OIDC application).
///
/// Clients represent applications that integrate with Keycloak for
/// authentication and authorization. They can be confidential (server-side)
/// or public (browser/mobile).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)] // Domain model naturally has many boolean flags
pub struct Client {
    // === Identity ===
    /// Unique identifier.
    pub id: Uuid,
    /// Realm this client belongs to.
    pub realm_id: Uuid,
    /// Unique client identifier (OAuth `client_id`).
    pub client_id: String,
    /// Display name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Whether the client is enabled.
    pub enabled: bool,

    // === Timestamps ===
    /// When the client was created.
    pub created_at: DateTime<Utc>,
    /// When the client was last updated.
    pub updated_at: DateTime<Utc>,

    // === Protocol ===
    /// Protocol type (OIDC or SAML).
    pub protocol: Protocol,

    // === Client Type ===
    /// Client secret (for confidential clients).
    pub secret: Option<String>,
    /// Whether this is a public client.
    pub public_client: bool,
    /// Whether this is bearer-only (no login, just token validation).
    pub bearer_only: bool,

    // === Authentication Settings ===
    /// Client authenticator type (e.g., "client-secret", "client-jwt").
    pub client_authenticator_type: String,
    /// Cluster node re-registration timeout in seconds (0 = not set).
    pub node_re_registration_timeout: i32,

    // === OAuth Flows ===
    /// Enable Authorization Code flow.
    pub standard_flow_enabled: bool,
    /// Enable Service Account (Client Credentials flow).
    pub service_accounts_enabled: bool,

    // === URLs ===
    /// Root URL for relative redirects.
    pub root_url: Option<String>,
    /// Base URL for the client.
    pub base_url: Option<String>,
    /// Allowed redirect URIs, in registration order.
    pub redirect_uris: Vec<String>,
    /// Allowed web origins (CORS).
    pub web_origins: HashSet<String>,

    // === Custom Attributes ===
    /// Custom client attributes.
    pub attributes: HashMap<String, String>,
}

impl Client {
    /// Creates a new client with the given client ID.
    #[must_use]
    pub fn new(realm_id: Uuid, client_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            realm_id,
            client_id: client_id.into(),
            name: None,
            description: None,
            enabled: true,
            created_at: now,
            updated_at: now,
            protocol: Protocol::default(),
            secret: None,
            public_client: false,
            bearer_only: false,
            client_authenticator_type: "client-secret".to_string(),
            node_re_registration_timeout: 0,
            standard_flow_enabled: true,
            service_accounts_enabled: false,
            root_url: None,
            base_url: None,
            redirect_uris: Vec::new(),
            web_origins: HashSet::new(),
            attributes: HashMap::new(),
        }
    }

    /// Creates a public client.
    #[must_use]
    pub fn new_public(realm_id: Uuid, client_id: impl Into<String>) -> Self {
        let mut client = Self::new(realm_id, client_id);
        client.public_client = true;
        client.secret = None;
        client
    }

    /// Creates a confidential client with a secret.
    #[must_use]
    pub fn new_confidential(
        realm_id: Uuid,
        client_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        let mut client = Self::new(realm_id, client_id);
        client.public_client = false;
        client.secret = Some(secret.into());
        client
    }

    /// Creates a bearer-only client.
    #[must_use]
    pub fn new_bearer_only(realm_id: Uuid, client_id: impl Into<String>) -> Self {
        let mut client = Self::new(realm_id, client_id);
        client.bearer_only = true;
        client.standard_flow_enabled = false;
        client
    }

    /// Adds a redirect URI.
    ///
    /// URIs keep their registration order; registering the same URI twice
    /// has no effect.
    #[must_use]
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.add_redirect_uri(uri);
        self
    }

    /// Sets the client authenticator type.
    #[must_use]
    pub fn with_authenticator_type(mut self, authenticator_type: impl Into<String>) -> Self {
        self.client_authenticator_type = authenticator_type.into();
        self
    }

    /// Enables service account (Client Credentials flow).
    #[must_use]
    pub const fn with_service_account(mut self) -> Self {
        self.service_accounts_enabled = true;
        self
    }

    /// Sets the node re-registration timeout in seconds.
    #[must_use]
    pub const fn with_node_re_registration_timeout(mut self, seconds: i32) -> Self {
        self.node_re_registration_timeout = seconds;
        self
    }

    /// Appends a redirect URI unless it is already registered.
    pub fn add_redirect_uri(&mut self, uri: impl Into<String>) {
        let uri = uri.into();
        if !self.redirect_uris.contains(&uri) {
            self.redirect_uris.push(uri);
        }
    }

    /// Replaces the redirect URIs, keeping the first occurrence of duplicates.
    pub fn set_redirect_uris<I, S>(&mut self, uris: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.redirect_uris.clear();
        for uri in uris {
            self.add_redirect_uri(uri);
        }
    }

    /// Returns the first registered redirect URI, if any.
    #[must_use]
    pub fn first_redirect_uri(&self) -> Option<&str> {
        self.redirect_uris.first().map(String::as_str)
    }

    /// Gets the client type.
    #[must_use]
    pub const fn client_type(&self) -> ClientType {
        if self.bearer_only {
            ClientType::BearerOnly
        } else if self.public_client {
            ClientType::Public
        } else {
            ClientType::Confidential
        }
    }

    /// Checks if the redirect URI is valid for this client.
    #[must_use]
    pub fn is_valid_redirect_uri(&self, uri: &str) -> bool {
        self.redirect_uris.iter().any(|pattern| {
            pattern == uri
                || pattern
                    .strip_suffix("/*")
                    .is_some_and(|prefix| uri.starts_with(prefix))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_client_has_defaults() {
        let realm_id = Uuid::now_v7();
        let client = Client::new(realm_id, "my-app");

        assert_eq!(client.client_id, "my-app");
        assert!(client.enabled);
        assert!(client.standard_flow_enabled);
        assert!(!client.public_client);
        assert_eq!(client.client_authenticator_type, "client-secret");
        assert_eq!(client.node_re_registration_timeout, 0);
        assert_eq!(client.protocol, Protocol::OpenidConnect);
    }

    #[test]
    fn public_client_creation() {
        let realm_id = Uuid::now_v7();
        let client = Client::new_public(realm_id, "spa-app");

        assert!(client.public_client);
        assert!(client.secret.is_none());
        assert_eq!(client.client_type(), ClientType::Public);
    }

    #[test]
    fn confidential_client_creation() {
        let realm_id = Uuid::now_v7();
        let client = Client::new_confidential(realm_id, "backend", "secret123");

        assert!(!client.public_client);
        assert_eq!(client.secret, Some("secret123".to_string()));
        assert_eq!(client.client_type(), ClientType::Confidential);
    }

    #[test]
    fn bearer_only_client_creation() {
        let client = Client::new_bearer_only(Uuid::now_v7(), "api");

        assert!(client.bearer_only);
        assert!(!client.standard_flow_enabled);
        assert_eq!(client.client_type(), ClientType::BearerOnly);
    }

    #[test]
    fn redirect_uris_keep_registration_order() {
        let client = Client::new(Uuid::now_v7(), "app")
            .with_redirect_uri("https://b.example/cb")
            .with_redirect_uri("https://a.example/cb")
            .with_redirect_uri("https://b.example/cb");

        assert_eq!(
            client.redirect_uris,
            vec!["https://b.example/cb", "https://a.example/cb"]
        );
        assert_eq!(client.first_redirect_uri(), Some("https://b.example/cb"));
    }

    #[test]
    fn set_redirect_uris_replaces_existing() {
        let mut client = Client::new(Uuid::now_v7(), "app").with_redirect_uri("https://old/cb");
        client.set_redirect_uris(["https://x/cb", "https://y/cb", "https://x/cb"]);

        assert_eq!(client.redirect_uris, vec!["https://x/cb", "https://y/cb"]);
    }

    #[test]
    fn no_redirect_uri_registered() {
        let client = Client::new(Uuid::now_v7(), "app");
        assert_eq!(client.first_redirect_uri(), None);
    }

    #[test]
    fn redirect_uri_validation() {
        let realm_id = Uuid::now_v7();
        let client = Client::new(realm_id, "app")
            .with_redirect_uri("https://example.com/callback")
            .with_redirect_uri("https://example.com/app/*");

        assert!(client.is_valid_redirect_uri("https://example.com/callback"));
        assert!(client.is_valid_redirect_uri("https://example.com/app/page"));
        assert!(!client.is_valid_redirect_uri("https://evil.com/callback"));
    }

    #[test]
    fn protocol_identifiers() {
        assert_eq!(Protocol::OpenidConnect.as_str(), "openid-connect");
        assert_eq!(Protocol::Saml.as_str(), "saml");
    }

    #[test]
    fn client_round_trips_through_json_in_order() {
        let client = Client::new(Uuid::now_v7(), "app")
            .with_redirect_uri("https://z.example/cb")
            .with_redirect_uri("https://a.example/cb");

        let json = serde_json::to_string(&client).unwrap();
        let back: Client = serde_json::from_str(&json).unwrap();

        assert_eq!(back.first_redirect_uri(), Some("https://z.example/cb"));
    }
}
