//! Admin API state management.
//!
//! Defines the shared state structure for the Admin API endpoints.

use std::sync::Arc;

use kc_spi::{CredentialResolver, SpiRegistry};
use kc_storage::{ClientProvider, RealmProvider};
use url::Url;

/// State for client and client installation operations.
pub struct ClientState<R, C>
where
    R: RealmProvider,
    C: ClientProvider,
{
    /// Realm storage provider (for realm validation).
    pub realm_provider: Arc<R>,
    /// Client storage provider.
    pub client_provider: Arc<C>,
    /// Registry holding the deployed installation providers.
    pub registry: Arc<SpiRegistry>,
    /// Client credential lookup.
    pub credentials: Arc<dyn CredentialResolver>,
    /// Externally reachable base URL of this server.
    pub base_url: Arc<Url>,
}

// Manual Clone implementation that doesn't require T: Clone for Arc<T>
impl<R, C> Clone for ClientState<R, C>
where
    R: RealmProvider,
    C: ClientProvider,
{
    fn clone(&self) -> Self {
        Self {
            realm_provider: Arc::clone(&self.realm_provider),
            client_provider: Arc::clone(&self.client_provider),
            registry: Arc::clone(&self.registry),
            credentials: Arc::clone(&self.credentials),
            base_url: Arc::clone(&self.base_url),
        }
    }
}

impl<R, C> ClientState<R, C>
where
    R: RealmProvider,
    C: ClientProvider,
{
    /// Creates a new client state.
    pub fn new(
        realm_provider: Arc<R>,
        client_provider: Arc<C>,
        registry: Arc<SpiRegistry>,
        credentials: Arc<dyn CredentialResolver>,
        base_url: Url,
    ) -> Self {
        Self {
            realm_provider,
            client_provider,
            registry,
            credentials,
            base_url: Arc::new(base_url),
        }
    }
}
