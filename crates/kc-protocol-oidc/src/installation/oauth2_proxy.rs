//! oauth2-proxy environment file provider.
//!
//! Renders the environment variables an [oauth2-proxy] deployment needs to
//! front an application with a Keycloak OIDC client. Values derived from
//! the realm and client are emitted as active assignments; everything an
//! operator usually tunes per deployment is emitted as a commented example.
//!
//! [oauth2-proxy]: https://oauth2-proxy.github.io/oauth2-proxy/

use std::any::Any;
use std::str::FromStr;

use async_trait::async_trait;
use kc_core::InstallationConfig;
use kc_model::{Client, Realm};
use kc_spi::{
    CredentialResolver, FactoryConfig, KeycloakSession, Provider, ProviderFactory,
    ProviderMetadata, SpiError,
};
use url::Url;

use super::{
    ClientInstallation, ClientInstallationProvider, InstallationRequest, InstallationResult,
    RenderedConfig, TEXT_PLAIN,
};
use crate::LOGIN_PROTOCOL;

/// Provider ID, used in installation download URLs.
pub const PROVIDER_ID: &str = "oauth2-proxy-env";

const DISPLAY_TYPE: &str = "Oauth2-proxy environment variables";

const HELP_TEXT: &str = "Environment variables used by the Oauth2-proxy to configure clients.  \
    You must set these environment variables in your Oauth2-proxy deployment.  \
    You may also want to tweak these variables after you download them.";

const FILENAME: &str = "oauth2proxy.env";

const PROXY_PROVIDER: &str = "keycloak-oidc";

const REDIRECT_PLACEHOLDER: &str = "https://YOUR_DOMAIN/oauth2/callback";

const DEFAULT_SCOPE: &str = "openid email profile";

const DOCS_URL: &str = "https://oauth2-proxy.github.io/oauth2-proxy/docs/configuration/overview";

const SECRET_KEY: &str = "secret";

/// Environment variable names understood by oauth2-proxy.
mod env {
    pub const PROVIDER: &str = "OAUTH2_PROXY_PROVIDER";
    pub const PROVIDER_DISPLAY_NAME: &str = "OAUTH2_PROXY_PROVIDER_DISPLAY_NAME";
    pub const CLIENT_ID: &str = "OAUTH2_PROXY_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "OAUTH2_PROXY_CLIENT_SECRET";
    pub const COOKIE_HTTPONLY: &str = "OAUTH2_PROXY_COOKIE_HTTPONLY";
    pub const COOKIE_NAME: &str = "OAUTH2_PROXY_COOKIE_NAME";
    pub const COOKIE_SAMESITE: &str = "OAUTH2_PROXY_COOKIE_SAMESITE";
    pub const COOKIE_SECRET: &str = "OAUTH2_PROXY_COOKIE_SECRET";
    pub const COOKIE_SECURE: &str = "OAUTH2_PROXY_COOKIE_SECURE";
    pub const EMAIL_DOMAINS: &str = "OAUTH2_PROXY_EMAIL_DOMAINS";
    pub const HTTP_ADDRESS: &str = "OAUTH2_PROXY_HTTP_ADDRESS";
    pub const OIDC_ISSUER_URL: &str = "OAUTH2_PROXY_OIDC_ISSUER_URL";
    pub const PASS_ACCESS_TOKEN: &str = "OAUTH2_PROXY_PASS_ACCESS_TOKEN";
    pub const PASS_AUTHORIZATION_HEADER: &str = "OAUTH2_PROXY_PASS_AUTHORIZATION_HEADER";
    pub const REDIRECT_URL: &str = "OAUTH2_PROXY_REDIRECT_URL";
    pub const REVERSE_PROXY: &str = "OAUTH2_PROXY_REVERSE_PROXY";
    pub const SCOPE: &str = "OAUTH2_PROXY_SCOPE";
    pub const SET_AUTHORIZATION_HEADER: &str = "OAUTH2_PROXY_SET_AUTHORIZATION_HEADER";
    pub const SET_XAUTHREQUEST: &str = "OAUTH2_PROXY_SET_XAUTHREQUEST";
    pub const SKIP_PROVIDER_BUTTON: &str = "OAUTH2_PROXY_SKIP_PROVIDER_BUTTON";
    pub const UPSTREAMS: &str = "OAUTH2_PROXY_UPSTREAMS";
}

/// How the provider display name is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayNamePolicy {
    /// Realm name, or the realm id when the name is empty.
    #[default]
    RealmNameOrId,
    /// A fixed label, independent of the realm.
    Fixed(String),
}

/// Which realm identifier forms the issuer URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssuerRealmPolicy {
    /// Always the realm name, even when empty.
    #[default]
    RealmName,
    /// Realm name, or the realm id when the name is empty.
    RealmNameOrId,
}

/// Whether the OIDC scope is assigned or only shown as an example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopePolicy {
    /// `#OAUTH2_PROXY_SCOPE="openid email profile"`
    #[default]
    Commented,
    /// `OAUTH2_PROXY_SCOPE="openid email profile"`
    Active,
}

impl FromStr for ScopePolicy {
    type Err = SpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commented" => Ok(Self::Commented),
            "active" => Ok(Self::Active),
            other => Err(SpiError::Configuration(format!(
                "invalid scope policy '{other}', expected 'active' or 'commented'"
            ))),
        }
    }
}

/// Rendering options for the oauth2-proxy provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Oauth2ProxyOptions {
    /// Provider display name selection.
    pub display_name: DisplayNamePolicy,
    /// Issuer URL realm segment selection.
    pub issuer_realm: IssuerRealmPolicy,
    /// Scope line activeness.
    pub scope: ScopePolicy,
}

impl From<&InstallationConfig> for Oauth2ProxyOptions {
    fn from(config: &InstallationConfig) -> Self {
        Self {
            display_name: config
                .display_name
                .clone()
                .map_or(DisplayNamePolicy::RealmNameOrId, DisplayNamePolicy::Fixed),
            issuer_realm: if config.issuer_realm_fallback {
                IssuerRealmPolicy::RealmNameOrId
            } else {
                IssuerRealmPolicy::RealmName
            },
            scope: if config.active_scope {
                ScopePolicy::Active
            } else {
                ScopePolicy::Commented
            },
        }
    }
}

/// Returns whether a client has a confidential secret worth handing to a
/// proxy.
///
/// Public clients never do. Bearer-only clients only do when they use
/// service accounts or cluster node re-registration.
#[must_use]
pub const fn should_expose_secret(client: &Client) -> bool {
    if client.public_client {
        return false;
    }
    !(client.bearer_only
        && !client.service_accounts_enabled
        && client.node_re_registration_timeout <= 0)
}

fn realm_name_or_id(realm: &Realm) -> String {
    if realm.name.is_empty() {
        realm.id.to_string()
    } else {
        realm.name.clone()
    }
}

fn issuer_url(base_url: &Url, realm_segment: &str) -> String {
    let mut issuer = base_url.to_string();
    if !issuer.ends_with('/') {
        issuer.push('/');
    }
    issuer.push_str("realms/");
    issuer.push_str(realm_segment);
    issuer
}

fn redirect_url(client: &Client) -> &str {
    client
        .first_redirect_uri()
        .filter(|uri| !uri.is_empty())
        .unwrap_or(REDIRECT_PLACEHOLDER)
}

/// Renders oauth2-proxy environment files.
#[derive(Debug, Clone, Default)]
pub struct Oauth2ProxyInstallation {
    options: Oauth2ProxyOptions,
}

impl Oauth2ProxyInstallation {
    /// Creates a provider with the given options.
    #[must_use]
    pub const fn new(options: Oauth2ProxyOptions) -> Self {
        Self { options }
    }

    /// Returns the rendering options.
    #[must_use]
    pub const fn options(&self) -> &Oauth2ProxyOptions {
        &self.options
    }

    /// Renders the environment file for `client`.
    ///
    /// A fresh cookie secret is generated on every call.
    ///
    /// ## Errors
    ///
    /// Returns [`InstallationError::CredentialLookup`](super::InstallationError::CredentialLookup)
    /// if the client's secret must be exposed and `credentials` has no
    /// authenticator for its authenticator type.
    pub fn render(
        &self,
        realm: &Realm,
        client: &Client,
        base_url: &Url,
        credentials: &dyn CredentialResolver,
    ) -> InstallationResult<RenderedConfig> {
        let mut config = RenderedConfig::new();

        config
            .assign(env::PROVIDER, PROXY_PROVIDER)
            .assign(env::PROVIDER_DISPLAY_NAME, self.display_name(realm))
            .assign(env::CLIENT_ID, &client.client_id);

        let exposed = should_expose_secret(client);
        let mut secret_emitted = false;
        if exposed
            && let Some(adapter) =
                credentials.resolve_secret(&client.client_authenticator_type, client)?
            && let Some(secret) = adapter.get(SECRET_KEY).and_then(serde_json::Value::as_str)
        {
            config.assign(env::CLIENT_SECRET, secret);
            secret_emitted = true;
        }

        config
            .comment("Set HttpOnly flag on cookies (recommended for security)")
            .example(env::COOKIE_HTTPONLY, "true")
            .comment("Cookie name for the OAuth2 Proxy session")
            .example(env::COOKIE_NAME, "_oauth2_proxy")
            .comment("SameSite cookie attribute: lax, strict, or none")
            .example(env::COOKIE_SAMESITE, "lax")
            .comment(
                "Cookie secret auto-generated (32 bytes base64url). \
                 To generate your own: openssl rand -base64 32 | tr -- '+/' '-_'",
            )
            .comment("Regenerating this file invalidates cookies signed with the previous secret")
            .assign(env::COOKIE_SECRET, kc_crypto::generate_cookie_secret())
            .comment("Set Secure flag on cookies (true for HTTPS, false for HTTP)")
            .example(env::COOKIE_SECURE, "false")
            .comment("Restrict authentication to specific email domains (* allows all)")
            .assign(env::EMAIL_DOMAINS, "*")
            .comment("HTTP listening address and port")
            .example(env::HTTP_ADDRESS, "0.0.0.0:8080")
            .assign(env::OIDC_ISSUER_URL, self.issuer_url(realm, base_url))
            .comment("Pass access token to upstream via X-Forwarded-Access-Token header")
            .example(env::PASS_ACCESS_TOKEN, "true")
            .comment("Pass OIDC IDToken to upstream via Authorization Bearer header")
            .example(env::PASS_AUTHORIZATION_HEADER, "true")
            .blank()
            .assign(env::REDIRECT_URL, redirect_url(client))
            .comment("Enable if running behind a reverse proxy (trusts X-Forwarded headers)")
            .example(env::REVERSE_PROXY, "true")
            .comment("OIDC scopes to request (openid is required for OIDC)");

        match self.options.scope {
            ScopePolicy::Commented => config.example(env::SCOPE, DEFAULT_SCOPE),
            ScopePolicy::Active => config.assign(env::SCOPE, DEFAULT_SCOPE),
        };

        config
            .comment("Set Authorization Bearer header with access token for upstream")
            .example(env::SET_AUTHORIZATION_HEADER, "true")
            .comment("Set X-Auth-Request-* headers with user info for upstream")
            .example(env::SET_XAUTHREQUEST, "true")
            .comment("Skip the provider selection button (go directly to login)")
            .example(env::SKIP_PROVIDER_BUTTON, "false")
            .comment("Backend service URL(s) to proxy to (required)")
            .example(env::UPSTREAMS, "http://127.0.0.1:9000")
            .blank()
            .comment(format!("Full documentation: {DOCS_URL}"));

        tracing::debug!(
            realm = %realm.name,
            client_id = %client.client_id,
            client_type = ?client.client_type(),
            secret_exposed = exposed,
            secret_emitted,
            redirect_placeholder = client.redirect_uris.is_empty(),
            "rendered oauth2-proxy environment"
        );

        Ok(config)
    }

    fn display_name(&self, realm: &Realm) -> String {
        match &self.options.display_name {
            DisplayNamePolicy::RealmNameOrId => realm_name_or_id(realm),
            DisplayNamePolicy::Fixed(label) => label.clone(),
        }
    }

    fn issuer_url(&self, realm: &Realm, base_url: &Url) -> String {
        match self.options.issuer_realm {
            IssuerRealmPolicy::RealmName => issuer_url(base_url, &realm.name),
            IssuerRealmPolicy::RealmNameOrId => issuer_url(base_url, &realm_name_or_id(realm)),
        }
    }
}

impl Provider for Oauth2ProxyInstallation {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ClientInstallationProvider for Oauth2ProxyInstallation {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn protocol(&self) -> &'static str {
        LOGIN_PROTOCOL
    }

    fn display_type(&self) -> &'static str {
        DISPLAY_TYPE
    }

    fn help_text(&self) -> &'static str {
        HELP_TEXT
    }

    fn filename(&self) -> &'static str {
        FILENAME
    }

    fn media_type(&self) -> &'static str {
        TEXT_PLAIN
    }

    fn is_download_only(&self) -> bool {
        false
    }

    fn generate_installation(
        &self,
        request: &InstallationRequest<'_>,
    ) -> InstallationResult<ClientInstallation> {
        let config = self.render(
            request.realm,
            request.client,
            request.base_url,
            request.credentials,
        )?;

        Ok(ClientInstallation {
            content: config.to_string(),
            media_type: self.media_type(),
            filename: self.filename(),
            download_only: self.is_download_only(),
        })
    }
}

/// Factory for [`Oauth2ProxyInstallation`].
///
/// ## Configuration
///
/// - `display-name`: fixed provider display name
/// - `scope`: `active` or `commented` (default)
/// - `issuer-fallback`: use the realm id in the issuer URL when the realm
///   name is empty (default `false`)
#[derive(Debug, Clone, Default)]
pub struct Oauth2ProxyInstallationFactory {
    options: Oauth2ProxyOptions,
}

impl Oauth2ProxyInstallationFactory {
    /// Creates a factory whose providers start from `options`.
    #[must_use]
    pub const fn new(options: Oauth2ProxyOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl ProviderFactory<Oauth2ProxyInstallation> for Oauth2ProxyInstallationFactory {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            id: PROVIDER_ID,
            name: DISPLAY_TYPE,
            description: HELP_TEXT,
            priority: 0,
        }
    }

    async fn init(&mut self, config: &dyn FactoryConfig) -> Result<(), SpiError> {
        if let Some(label) = config.get("display-name").filter(|l| !l.trim().is_empty()) {
            self.options.display_name = DisplayNamePolicy::Fixed(label.to_string());
        }
        if let Some(scope) = config.get("scope") {
            self.options.scope = scope.parse()?;
        }
        if config.get_bool("issuer-fallback", false) {
            self.options.issuer_realm = IssuerRealmPolicy::RealmNameOrId;
        }
        Ok(())
    }

    async fn create(&self, _session: &KeycloakSession) -> Result<Oauth2ProxyInstallation, SpiError> {
        Ok(Oauth2ProxyInstallation::new(self.options.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use kc_auth::{JwtClientSecretAuthenticator, RegistryCredentialResolver, register_client_authenticators};
    use kc_spi::{AdapterConfig, MapFactoryConfig, SpiRegistry};
    use uuid::Uuid;

    use super::*;

    /// Resolver returning a fixed adapter configuration for every client.
    struct StubResolver(Option<AdapterConfig>);

    impl StubResolver {
        fn with_secret(secret: &str) -> Self {
            let mut config = AdapterConfig::new();
            config.insert("secret".to_string(), serde_json::json!(secret));
            Self(Some(config))
        }
    }

    impl CredentialResolver for StubResolver {
        fn resolve_secret(
            &self,
            _authenticator_type: &str,
            _client: &Client,
        ) -> Result<Option<AdapterConfig>, SpiError> {
            Ok(self.0.clone())
        }
    }

    fn base() -> Url {
        Url::parse("https://idp.example").unwrap()
    }

    fn realm() -> Realm {
        Realm::new("acme")
    }

    fn render(client: &Client, resolver: &dyn CredentialResolver) -> RenderedConfig {
        Oauth2ProxyInstallation::default()
            .render(&realm(), client, &base(), resolver)
            .unwrap()
    }

    fn count_assignments(config: &RenderedConfig, key: &str) -> usize {
        config.active_keys().filter(|k| *k == key).count()
    }

    #[test]
    fn predicate_hides_secret_from_public_clients() {
        let mut client = Client::new_public(Uuid::now_v7(), "spa");
        assert!(!should_expose_secret(&client));

        client.service_accounts_enabled = true;
        client.node_re_registration_timeout = 60;
        assert!(!should_expose_secret(&client));
    }

    #[test]
    fn predicate_for_bearer_only_clients() {
        let realm_id = Uuid::now_v7();
        let plain = Client::new_bearer_only(realm_id, "api");
        assert!(!should_expose_secret(&plain));

        let negative_timeout = Client::new_bearer_only(realm_id, "api").with_node_re_registration_timeout(-1);
        assert!(!should_expose_secret(&negative_timeout));

        let service = Client::new_bearer_only(realm_id, "api").with_service_account();
        assert!(should_expose_secret(&service));

        let re_registering = Client::new_bearer_only(realm_id, "api").with_node_re_registration_timeout(30);
        assert!(should_expose_secret(&re_registering));
    }

    #[test]
    fn predicate_exposes_confidential_clients() {
        let client = Client::new_confidential(Uuid::now_v7(), "app", "s3cret");
        assert!(should_expose_secret(&client));
    }

    #[test]
    fn public_client_never_gets_secret_line() {
        let client = Client::new_public(Uuid::now_v7(), "spa");
        let config = render(&client, &StubResolver::with_secret("leaked"));

        assert!(!config.is_assigned(env::CLIENT_SECRET));
        assert!(!config.to_string().contains("leaked"));
    }

    #[test]
    fn bearer_only_client_never_gets_secret_line() {
        let client = Client::new_bearer_only(Uuid::now_v7(), "api");
        let config = render(&client, &StubResolver::with_secret("leaked"));

        assert!(!config.is_assigned(env::CLIENT_SECRET));
    }

    #[test]
    fn confidential_client_gets_exactly_one_secret_line() {
        let client = Client::new_confidential(Uuid::now_v7(), "app", "ignored");
        let config = render(&client, &StubResolver::with_secret("s3cret"));

        assert_eq!(count_assignments(&config, env::CLIENT_SECRET), 1);
        assert_eq!(config.value(env::CLIENT_SECRET), Some("s3cret"));
    }

    #[test]
    fn missing_resolver_result_omits_secret() {
        let client = Client::new_confidential(Uuid::now_v7(), "app", "s3cret");

        let none = render(&client, &StubResolver(None));
        assert!(!none.is_assigned(env::CLIENT_SECRET));

        let without_secret = render(&client, &StubResolver(Some(AdapterConfig::new())));
        assert!(!without_secret.is_assigned(env::CLIENT_SECRET));
    }

    #[test]
    fn secret_comes_from_registered_authenticator() {
        let registry = Arc::new(SpiRegistry::new());
        register_client_authenticators(&registry);
        let resolver = RegistryCredentialResolver::new(Arc::clone(&registry));

        let client = Client::new_confidential(Uuid::now_v7(), "app", "from-store");
        let config = render(&client, &resolver);
        assert_eq!(config.value(env::CLIENT_SECRET), Some("from-store"));

        let jwt_secret = Client::new_confidential(Uuid::now_v7(), "app", "nested")
            .with_authenticator_type(JwtClientSecretAuthenticator::PROVIDER_ID);
        let config = render(&jwt_secret, &resolver);
        assert!(!config.is_assigned(env::CLIENT_SECRET));
    }

    #[test]
    fn unknown_authenticator_is_an_error() {
        let registry = Arc::new(SpiRegistry::new());
        register_client_authenticators(&registry);
        let resolver = RegistryCredentialResolver::new(registry);

        let client = Client::new_confidential(Uuid::now_v7(), "app", "s3cret")
            .with_authenticator_type("client-magic");
        let result = Oauth2ProxyInstallation::default().render(&realm(), &client, &base(), &resolver);

        assert!(matches!(
            result,
            Err(super::super::InstallationError::CredentialLookup(_))
        ));
    }

    #[test]
    fn unknown_authenticator_is_not_consulted_for_public_clients() {
        let resolver = RegistryCredentialResolver::new(Arc::new(SpiRegistry::new()));
        let client = Client::new_public(Uuid::now_v7(), "spa").with_authenticator_type("client-magic");

        let result = Oauth2ProxyInstallation::default().render(&realm(), &client, &base(), &resolver);
        assert!(result.is_ok());
    }

    #[test]
    fn cookie_secret_is_fresh_url_safe_32_bytes() {
        let client = Client::new_public(Uuid::now_v7(), "spa");
        let resolver = StubResolver(None);

        let first = render(&client, &resolver);
        let second = render(&client, &resolver);
        let first_secret = first.value(env::COOKIE_SECRET).unwrap();
        let second_secret = second.value(env::COOKIE_SECRET).unwrap();

        assert_eq!(URL_SAFE_NO_PAD.decode(first_secret).unwrap().len(), 32);
        assert!(!first_secret.contains(['+', '/', '=']));
        assert_ne!(first_secret, second_secret);
    }

    #[test]
    fn redirect_url_is_first_registered_uri() {
        let client = Client::new_public(Uuid::now_v7(), "spa")
            .with_redirect_uri("https://a.example/cb")
            .with_redirect_uri("https://b.example/cb");
        let config = render(&client, &StubResolver(None));

        assert_eq!(config.value(env::REDIRECT_URL), Some("https://a.example/cb"));
    }

    #[test]
    fn redirect_url_falls_back_to_placeholder() {
        let client = Client::new_public(Uuid::now_v7(), "spa");
        let config = render(&client, &StubResolver(None));

        assert_eq!(
            config.value(env::REDIRECT_URL),
            Some("https://YOUR_DOMAIN/oauth2/callback")
        );
    }

    #[test]
    fn empty_first_redirect_uri_uses_placeholder() {
        let mut client = Client::new_public(Uuid::now_v7(), "spa");
        client.set_redirect_uris(vec![String::new(), "https://b.example/cb".to_string()]);
        let config = render(&client, &StubResolver(None));

        assert_eq!(
            config.value(env::REDIRECT_URL),
            Some("https://YOUR_DOMAIN/oauth2/callback")
        );
    }

    #[test]
    fn multi_line_client_id_cannot_add_assignments() {
        let client = Client::new_public(
            Uuid::now_v7(),
            "app\nOAUTH2_PROXY_PROVIDER=github\nOAUTH2_PROXY_EMAIL_DOMAINS=evil.example",
        );
        let text = render(&client, &StubResolver(None)).to_string();

        let starting_with = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(starting_with("OAUTH2_PROXY_PROVIDER="), 1);
        assert_eq!(starting_with("OAUTH2_PROXY_EMAIL_DOMAINS="), 1);
        assert!(text.contains(r#"OAUTH2_PROXY_PROVIDER="keycloak-oidc""#));
        assert!(text.contains(r#"OAUTH2_PROXY_EMAIL_DOMAINS="*""#));
    }

    #[test]
    fn non_string_secret_is_not_emitted() {
        let client = Client::new_confidential(Uuid::now_v7(), "app", "ignored");
        for value in [serde_json::Value::Null, serde_json::json!({"a": 1}), serde_json::json!(7)] {
            let mut adapter = AdapterConfig::new();
            adapter.insert("secret".to_string(), value);
            let config = render(&client, &StubResolver(Some(adapter)));

            assert!(!config.is_assigned(env::CLIENT_SECRET));
        }
    }

    #[test]
    fn issuer_url_joins_without_double_slash() {
        let realm = realm();
        assert_eq!(issuer_url(&base(), &realm.name), "https://idp.example/realms/acme");

        let trailing = Url::parse("https://idp.example/").unwrap();
        assert_eq!(issuer_url(&trailing, &realm.name), "https://idp.example/realms/acme");

        let with_path = Url::parse("https://idp.example/auth").unwrap();
        assert_eq!(issuer_url(&with_path, &realm.name), "https://idp.example/auth/realms/acme");

        let with_port = Url::parse("http://localhost:8080").unwrap();
        assert_eq!(issuer_url(&with_port, &realm.name), "http://localhost:8080/realms/acme");
    }

    #[test]
    fn empty_realm_name_falls_back_to_id_for_display_only() {
        let mut realm = realm();
        realm.name = String::new();
        let client = Client::new_public(realm.id, "spa");
        let id = realm.id.to_string();

        let config = Oauth2ProxyInstallation::default()
            .render(&realm, &client, &base(), &StubResolver(None))
            .unwrap();
        assert_eq!(config.value(env::PROVIDER_DISPLAY_NAME), Some(id.as_str()));
        assert_eq!(config.value(env::OIDC_ISSUER_URL), Some("https://idp.example/realms/"));

        let fallback = Oauth2ProxyInstallation::new(Oauth2ProxyOptions {
            issuer_realm: IssuerRealmPolicy::RealmNameOrId,
            ..Oauth2ProxyOptions::default()
        });
        let config = fallback
            .render(&realm, &client, &base(), &StubResolver(None))
            .unwrap();
        assert_eq!(
            config.value(env::OIDC_ISSUER_URL),
            Some(format!("https://idp.example/realms/{id}").as_str())
        );
    }

    #[test]
    fn fixed_display_name_and_active_scope() {
        let provider = Oauth2ProxyInstallation::new(Oauth2ProxyOptions {
            display_name: DisplayNamePolicy::Fixed("Keycloak".to_string()),
            scope: ScopePolicy::Active,
            ..Oauth2ProxyOptions::default()
        });
        let client = Client::new_public(Uuid::now_v7(), "spa");
        let config = provider
            .render(&realm(), &client, &base(), &StubResolver(None))
            .unwrap();

        assert_eq!(config.value(env::PROVIDER_DISPLAY_NAME), Some("Keycloak"));
        assert_eq!(config.value(env::SCOPE), Some("openid email profile"));
    }

    #[test]
    fn identity_lines_appear_once_and_keys_are_unique() {
        let client = Client::new_confidential(Uuid::now_v7(), "app", "s3cret");
        let config = render(&client, &StubResolver::with_secret("s3cret"));

        assert_eq!(count_assignments(&config, env::PROVIDER), 1);
        assert_eq!(count_assignments(&config, env::CLIENT_ID), 1);

        let mut keys: Vec<_> = config.active_keys().collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);

        let text = config.to_string();
        assert!(!text.contains('{'));
        assert!(!text.contains('}'));
    }

    #[test]
    fn renders_lines_in_fixed_order() {
        let client = Client::new_confidential(Uuid::now_v7(), "app", "s3cret")
            .with_redirect_uri("https://app.example/oauth2/callback");
        let config = render(&client, &StubResolver::with_secret("s3cret"));
        let cookie = config.value(env::COOKIE_SECRET).unwrap();

        let expected = format!(
            r##"OAUTH2_PROXY_PROVIDER="keycloak-oidc"
OAUTH2_PROXY_PROVIDER_DISPLAY_NAME="acme"
OAUTH2_PROXY_CLIENT_ID="app"
OAUTH2_PROXY_CLIENT_SECRET="s3cret"
# Set HttpOnly flag on cookies (recommended for security)
#OAUTH2_PROXY_COOKIE_HTTPONLY="true"
# Cookie name for the OAuth2 Proxy session
#OAUTH2_PROXY_COOKIE_NAME="_oauth2_proxy"
# SameSite cookie attribute: lax, strict, or none
#OAUTH2_PROXY_COOKIE_SAMESITE="lax"
# Cookie secret auto-generated (32 bytes base64url). To generate your own: openssl rand -base64 32 | tr -- '+/' '-_'
# Regenerating this file invalidates cookies signed with the previous secret
OAUTH2_PROXY_COOKIE_SECRET="{cookie}"
# Set Secure flag on cookies (true for HTTPS, false for HTTP)
#OAUTH2_PROXY_COOKIE_SECURE="false"
# Restrict authentication to specific email domains (* allows all)
OAUTH2_PROXY_EMAIL_DOMAINS="*"
# HTTP listening address and port
#OAUTH2_PROXY_HTTP_ADDRESS="0.0.0.0:8080"
OAUTH2_PROXY_OIDC_ISSUER_URL="https://idp.example/realms/acme"
# Pass access token to upstream via X-Forwarded-Access-Token header
#OAUTH2_PROXY_PASS_ACCESS_TOKEN="true"
# Pass OIDC IDToken to upstream via Authorization Bearer header
#OAUTH2_PROXY_PASS_AUTHORIZATION_HEADER="true"

OAUTH2_PROXY_REDIRECT_URL="https://app.example/oauth2/callback"
# Enable if running behind a reverse proxy (trusts X-Forwarded headers)
#OAUTH2_PROXY_REVERSE_PROXY="true"
# OIDC scopes to request (openid is required for OIDC)
#OAUTH2_PROXY_SCOPE="openid email profile"
# Set Authorization Bearer header with access token for upstream
#OAUTH2_PROXY_SET_AUTHORIZATION_HEADER="true"
# Set X-Auth-Request-* headers with user info for upstream
#OAUTH2_PROXY_SET_XAUTHREQUEST="true"
# Skip the provider selection button (go directly to login)
#OAUTH2_PROXY_SKIP_PROVIDER_BUTTON="false"
# Backend service URL(s) to proxy to (required)
#OAUTH2_PROXY_UPSTREAMS="http://127.0.0.1:9000"

# Full documentation: https://oauth2-proxy.github.io/oauth2-proxy/docs/configuration/overview
"##
        );

        assert_eq!(config.to_string(), expected);
    }

    #[test]
    fn generated_installation_carries_file_metadata() {
        let realm = realm();
        let client = Client::new_public(realm.id, "spa");
        let base = base();
        let resolver = StubResolver(None);
        let request = InstallationRequest {
            realm: &realm,
            client: &client,
            base_url: &base,
            credentials: &resolver,
        };

        let installation = Oauth2ProxyInstallation::default()
            .generate_installation(&request)
            .unwrap();

        assert_eq!(installation.filename, "oauth2proxy.env");
        assert_eq!(installation.media_type, "text/plain");
        assert!(!installation.download_only);
        assert!(installation.content.ends_with('\n'));
    }

    #[test]
    fn concurrent_renders_get_distinct_cookie_secrets() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    let client = Client::new_public(Uuid::now_v7(), "spa");
                    let config = render(&client, &StubResolver(None));
                    config.value(env::COOKIE_SECRET).map(str::to_string)
                })
            })
            .collect();

        let mut secrets: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        secrets.sort_unstable();
        secrets.dedup();
        assert_eq!(secrets.len(), 8);
    }

    #[tokio::test]
    async fn factory_reads_configuration() {
        let mut factory = Oauth2ProxyInstallationFactory::default();
        let config = MapFactoryConfig::new()
            .with("display-name", "Corporate SSO")
            .with("scope", "Active")
            .with("issuer-fallback", "true");
        factory.init(&config).await.unwrap();

        let session = KeycloakSession::new(Arc::new(SpiRegistry::new()));
        let provider = factory.create(&session).await.unwrap();

        assert_eq!(
            provider.options(),
            &Oauth2ProxyOptions {
                display_name: DisplayNamePolicy::Fixed("Corporate SSO".to_string()),
                issuer_realm: IssuerRealmPolicy::RealmNameOrId,
                scope: ScopePolicy::Active,
            }
        );
    }

    #[tokio::test]
    async fn factory_rejects_unknown_scope_policy() {
        let mut factory = Oauth2ProxyInstallationFactory::default();
        let config = MapFactoryConfig::new().with("scope", "sometimes");

        assert!(matches!(
            factory.init(&config).await,
            Err(SpiError::Configuration(_))
        ));
    }

    #[test]
    fn options_follow_installation_config() {
        let config = InstallationConfig {
            display_name: Some("Keycloak".to_string()),
            issuer_realm_fallback: true,
            active_scope: false,
        };

        let options = Oauth2ProxyOptions::from(&config);
        assert_eq!(options.display_name, DisplayNamePolicy::Fixed("Keycloak".to_string()));
        assert_eq!(options.issuer_realm, IssuerRealmPolicy::RealmNameOrId);
        assert_eq!(options.scope, ScopePolicy::Commented);
    }
}
