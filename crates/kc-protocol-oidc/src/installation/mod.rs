//! Client installation providers.
//!
//! An installation provider turns a realm and one of its clients into a
//! ready-to-use configuration artifact (adapter JSON, proxy environment
//! file, ...) that the admin console offers for download.
//!
//! Providers are registered with the [`ClientInstallationSpi`] and looked up
//! by their ID at request time:
//!
//! ```ignore
//! let registry = Arc::new(SpiRegistry::new());
//! deploy_installation_provider(&registry, Oauth2ProxyInstallationFactory::default(), &config).await?;
//!
//! let provider = registry.require_instance::<Arc<dyn ClientInstallationProvider>>(
//!     ClientInstallationSpi::NAME,
//!     "oauth2-proxy-env",
//! )?;
//! let installation = provider.generate_installation(&request)?;
//! ```

mod config;
mod error;
mod oauth2_proxy;

use std::sync::Arc;

use kc_model::{Client, Realm};
use kc_spi::{
    CredentialResolver, FactoryConfig, KeycloakSession, Provider, ProviderFactory, Spi, SpiError,
    SpiRegistry,
};
use url::Url;

pub use config::{ConfigLine, RenderedConfig};
pub use error::{InstallationError, InstallationResult};
pub use oauth2_proxy::{
    DisplayNamePolicy, IssuerRealmPolicy, Oauth2ProxyInstallation, Oauth2ProxyInstallationFactory,
    Oauth2ProxyOptions, PROVIDER_ID as OAUTH2_PROXY_PROVIDER_ID, ScopePolicy, should_expose_secret,
};

/// MIME type for plain-text installation files.
pub const TEXT_PLAIN: &str = "text/plain";

/// SPI for client installation providers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientInstallationSpi;

impl ClientInstallationSpi {
    /// Name of the client installation SPI.
    pub const NAME: &'static str = "client-installation";
}

impl Spi for ClientInstallationSpi {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// Inputs for generating one installation file.
#[derive(Clone, Copy)]
pub struct InstallationRequest<'a> {
    /// Realm the client belongs to.
    pub realm: &'a Realm,
    /// Client to generate the installation for.
    pub client: &'a Client,
    /// Externally reachable root of this server.
    pub base_url: &'a Url,
    /// Lookup for the client's adapter credentials.
    pub credentials: &'a dyn CredentialResolver,
}

/// A generated installation artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInstallation {
    /// File content.
    pub content: String,
    /// MIME type of the content.
    pub media_type: &'static str,
    /// Suggested file name.
    pub filename: &'static str,
    /// Whether the admin console must offer the file only as a download.
    pub download_only: bool,
}

/// Generates client installation artifacts.
///
/// Implementations hold no per-request state, so one instance is shared
/// by all requests.
pub trait ClientInstallationProvider: Provider {
    /// Returns the provider ID used in the installation URL.
    fn id(&self) -> &'static str;

    /// Returns the login protocol this provider generates files for.
    fn protocol(&self) -> &'static str;

    /// Returns the label shown in the admin console format selector.
    fn display_type(&self) -> &'static str;

    /// Returns the help text shown next to the format selector.
    fn help_text(&self) -> &'static str;

    /// Returns the suggested file name.
    fn filename(&self) -> &'static str;

    /// Returns the MIME type of generated files.
    fn media_type(&self) -> &'static str;

    /// Returns whether the file may only be downloaded, not displayed.
    fn is_download_only(&self) -> bool;

    /// Generates the installation file.
    ///
    /// ## Errors
    ///
    /// Returns [`InstallationError::CredentialLookup`] if the client's
    /// authenticator type cannot be resolved.
    fn generate_installation(
        &self,
        request: &InstallationRequest<'_>,
    ) -> InstallationResult<ClientInstallation>;
}

/// Initializes a factory, creates its shared provider and binds it.
///
/// The factory is registered as well, so its metadata is listed with
/// the other installation formats.
///
/// ## Errors
///
/// Returns an error if the factory fails to initialize or to create the
/// provider.
pub async fn deploy_installation_provider<P, F>(
    registry: &Arc<SpiRegistry>,
    mut factory: F,
    config: &dyn FactoryConfig,
) -> Result<(), SpiError>
where
    P: ClientInstallationProvider + 'static,
    F: ProviderFactory<P> + 'static,
{
    factory.init(config).await?;
    factory.post_init().await?;

    let session = KeycloakSession::new(Arc::clone(registry));
    let provider: Arc<dyn ClientInstallationProvider> = Arc::new(factory.create(&session).await?);

    tracing::info!(
        session = %session.id(),
        provider = provider.id(),
        protocol = provider.protocol(),
        "client installation provider deployed"
    );
    session
        .registry()
        .bind(&ClientInstallationSpi, provider.id(), provider);
    session.registry().register::<P, F>(&ClientInstallationSpi, factory);
    session.close();
    Ok(())
}

/// Returns every deployed installation provider for `protocol`.
#[must_use]
pub fn installation_providers(
    registry: &SpiRegistry,
    protocol: &str,
) -> Vec<Arc<dyn ClientInstallationProvider>> {
    registry
        .instances::<Arc<dyn ClientInstallationProvider>>(ClientInstallationSpi::NAME)
        .into_iter()
        .filter(|p| p.protocol() == protocol)
        .collect()
}
