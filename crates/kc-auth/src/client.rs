//! Client authenticators.
//!
//! Each confidential client names the method it uses to authenticate at
//! the token endpoint (`client_authenticator_type`). The authenticator for
//! that method also knows which credentials an adapter deployed next to the
//! client needs, and reports them as an adapter configuration map.

use std::fmt::Debug;
use std::sync::Arc;

use kc_model::Client;
use kc_spi::{AdapterConfig, CredentialResolver, Spi, SpiError, SpiRegistry};
use serde_json::{Value, json};

/// Adapter configuration key holding a shared client secret.
pub const SECRET_KEY: &str = "secret";

/// Client attribute naming the signature algorithm for signed JWT client auth.
pub const TOKEN_ENDPOINT_SIGNING_ALG_ATTR: &str = "token.endpoint.auth.signing.alg";

/// SPI for client authenticators.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientAuthenticatorSpi;

impl ClientAuthenticatorSpi {
    /// Name of the client authenticator SPI.
    pub const NAME: &'static str = "client-authenticator";
}

impl Spi for ClientAuthenticatorSpi {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// Factory for a client authentication method.
pub trait ClientAuthenticatorFactory: Send + Sync + Debug {
    /// Returns the authenticator type this factory implements.
    fn id(&self) -> &'static str;

    /// Returns the display name.
    fn display_type(&self) -> &'static str;

    /// Returns the credentials an adapter needs for `client`.
    ///
    /// `None` means the method has no adapter-facing configuration.
    fn adapter_configuration(&self, client: &Client) -> Option<AdapterConfig>;
}

/// Client ID and shared secret (`client_secret_basic` / `client_secret_post`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientIdAndSecretAuthenticator;

impl ClientIdAndSecretAuthenticator {
    /// Authenticator type identifier.
    pub const PROVIDER_ID: &'static str = "client-secret";
}

impl ClientAuthenticatorFactory for ClientIdAndSecretAuthenticator {
    fn id(&self) -> &'static str {
        Self::PROVIDER_ID
    }

    fn display_type(&self) -> &'static str {
        "Client Id and Secret"
    }

    fn adapter_configuration(&self, client: &Client) -> Option<AdapterConfig> {
        let mut config = AdapterConfig::new();
        if let Some(secret) = &client.secret {
            config.insert(SECRET_KEY.to_string(), Value::String(secret.clone()));
        }
        Some(config)
    }
}

/// Signed JWT with a client key pair (`private_key_jwt`).
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtClientAuthenticator;

impl JwtClientAuthenticator {
    /// Authenticator type identifier.
    pub const PROVIDER_ID: &'static str = "client-jwt";
}

impl ClientAuthenticatorFactory for JwtClientAuthenticator {
    fn id(&self) -> &'static str {
        Self::PROVIDER_ID
    }

    fn display_type(&self) -> &'static str {
        "Signed Jwt"
    }

    fn adapter_configuration(&self, _client: &Client) -> Option<AdapterConfig> {
        let mut config = AdapterConfig::new();
        config.insert(
            "jwt".to_string(),
            json!({
                "client-keystore-file": "REPLACE WITH THE LOCATION OF YOUR KEYSTORE FILE",
                "client-keystore-type": "jks",
                "client-keystore-password": "REPLACE WITH THE KEYSTORE PASSWORD",
                "client-key-password": "REPLACE WITH THE KEY PASSWORD IN KEYSTORE",
                "client-key-alias": "REPLACE WITH THE KEY ALIAS IN KEYSTORE",
                "token-timeout": 10,
            }),
        );
        Some(config)
    }
}

/// JWT signed with the client secret (`client_secret_jwt`).
///
/// The secret is nested under `secret-jwt`, so generic consumers looking for
/// a top-level `secret` entry do not pick it up.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtClientSecretAuthenticator;

impl JwtClientSecretAuthenticator {
    /// Authenticator type identifier.
    pub const PROVIDER_ID: &'static str = "client-secret-jwt";
}

impl ClientAuthenticatorFactory for JwtClientSecretAuthenticator {
    fn id(&self) -> &'static str {
        Self::PROVIDER_ID
    }

    fn display_type(&self) -> &'static str {
        "Signed Jwt with Client Secret"
    }

    fn adapter_configuration(&self, client: &Client) -> Option<AdapterConfig> {
        let mut nested = serde_json::Map::new();
        if let Some(secret) = &client.secret {
            nested.insert(SECRET_KEY.to_string(), Value::String(secret.clone()));
        }
        if let Some(alg) = client.attributes.get(TOKEN_ENDPOINT_SIGNING_ALG_ATTR) {
            nested.insert("algorithm".to_string(), Value::String(alg.clone()));
        }

        let mut config = AdapterConfig::new();
        config.insert("secret-jwt".to_string(), Value::Object(nested));
        Some(config)
    }
}

/// Mutual TLS with an X.509 client certificate (`tls_client_auth`).
#[derive(Debug, Clone, Copy, Default)]
pub struct X509ClientAuthenticator;

impl X509ClientAuthenticator {
    /// Authenticator type identifier.
    pub const PROVIDER_ID: &'static str = "client-x509";
}

impl ClientAuthenticatorFactory for X509ClientAuthenticator {
    fn id(&self) -> &'static str {
        Self::PROVIDER_ID
    }

    fn display_type(&self) -> &'static str {
        "X509 Certificate"
    }

    fn adapter_configuration(&self, _client: &Client) -> Option<AdapterConfig> {
        Some(AdapterConfig::new())
    }
}

/// Binds the built-in client authenticators into `registry`.
pub fn register_client_authenticators(registry: &SpiRegistry) {
    let builtins: [Arc<dyn ClientAuthenticatorFactory>; 4] = [
        Arc::new(ClientIdAndSecretAuthenticator),
        Arc::new(JwtClientAuthenticator),
        Arc::new(JwtClientSecretAuthenticator),
        Arc::new(X509ClientAuthenticator),
    ];

    for authenticator in builtins {
        registry.bind(&ClientAuthenticatorSpi, authenticator.id(), authenticator);
    }
}

/// Resolves client credentials through the client authenticators bound in
/// an [`SpiRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryCredentialResolver {
    registry: Arc<SpiRegistry>,
}

impl RegistryCredentialResolver {
    /// Creates a resolver over `registry`.
    #[must_use]
    pub const fn new(registry: Arc<SpiRegistry>) -> Self {
        Self { registry }
    }
}

impl CredentialResolver for RegistryCredentialResolver {
    fn resolve_secret(
        &self,
        authenticator_type: &str,
        client: &Client,
    ) -> Result<Option<AdapterConfig>, SpiError> {
        let authenticator = self
            .registry
            .require_instance::<Arc<dyn ClientAuthenticatorFactory>>(
                ClientAuthenticatorSpi::NAME,
                authenticator_type,
            )
            .inspect_err(|_| {
                tracing::error!(
                    client_id = %client.client_id,
                    authenticator_type,
                    "no client authenticator registered for type"
                );
            })?;

        Ok(authenticator.adapter_configuration(client))
    }
}
