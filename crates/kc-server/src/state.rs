//! Application state management.
//!
//! This module defines the shared state that is passed to all request handlers.

use std::sync::Arc;

use kc_admin_api::ClientState;
use kc_auth::RegistryCredentialResolver;
use kc_spi::SpiRegistry;
use kc_storage::MemoryStore;

use crate::config::ServerConfig;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: ServerConfig,

    /// Realm and client storage.
    pub store: Arc<MemoryStore>,

    /// Provider registry.
    pub registry: Arc<SpiRegistry>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: ServerConfig, store: Arc<MemoryStore>, registry: Arc<SpiRegistry>) -> Self {
        Self {
            config,
            store,
            registry,
        }
    }

    /// Gets the state for the client admin endpoints.
    pub fn admin_client_state(&self) -> ClientState<MemoryStore, MemoryStore> {
        ClientState::new(
            Arc::clone(&self.store),
            Arc::clone(&self.store),
            Arc::clone(&self.registry),
            Arc::new(RegistryCredentialResolver::new(Arc::clone(&self.registry))),
            self.config.base_url.clone(),
        )
    }

    /// Returns the server configuration.
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }
}
