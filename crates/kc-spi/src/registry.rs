//! SPI Registry for managing provider factories and shared provider instances.

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;

use crate::provider::{Provider, ProviderFactory, ProviderMetadata, Spi, SpiError};

/// Registry for SPI provider factories.
///
/// The registry maintains a mapping of SPI names to their provider factories,
/// allowing dynamic lookup of providers by their string identifier.
///
/// Providers that hold no per-session state (installation generators,
/// client authenticators) can also be bound as shared instances and looked
/// up by type.
#[derive(Debug, Default)]
pub struct SpiRegistry {
    /// Map of SPI name to registered factories.
    factories: DashMap<&'static str, Vec<FactoryEntry>>,

    /// Map of SPI name to shared provider instances.
    instances: DashMap<&'static str, Vec<InstanceEntry>>,
}

#[derive(Debug)]
struct FactoryEntry {
    id: &'static str,
    metadata: ProviderMetadata,
}

#[derive(Debug)]
struct InstanceEntry {
    id: String,
    instance: Arc<dyn Any + Send + Sync>,
}

impl SpiRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider factory.
    ///
    /// ## Arguments
    ///
    /// * `spi` - The SPI this factory provides
    /// * `factory` - The factory to register
    pub fn register<P, F>(&self, spi: &dyn Spi, factory: F)
    where
        P: Provider + 'static,
        F: ProviderFactory<P> + 'static,
    {
        let entry = FactoryEntry {
            id: factory.id(),
            metadata: factory.metadata(),
        };

        tracing::debug!(spi = spi.name(), provider = entry.id, "registered provider factory");
        self.factories.entry(spi.name()).or_default().push(entry);
    }

    /// Binds a shared provider instance.
    ///
    /// Binding a second instance under the same SPI and ID replaces the first.
    pub fn bind<T>(&self, spi: &dyn Spi, provider_id: impl Into<String>, instance: T)
    where
        T: Send + Sync + 'static,
    {
        let provider_id = provider_id.into();
        let mut entries = self.instances.entry(spi.name()).or_default();
        entries.retain(|e| e.id != provider_id);
        tracing::debug!(spi = spi.name(), provider = %provider_id, "bound provider instance");
        entries.push(InstanceEntry {
            id: provider_id,
            instance: Arc::new(instance),
        });
    }

    /// Gets a bound provider instance by SPI and provider ID.
    ///
    /// Returns `None` if nothing is bound under that ID or the bound
    /// instance is not a `T`.
    #[must_use]
    pub fn instance<T>(&self, spi_name: &str, provider_id: &str) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.instances.get(spi_name).and_then(|entries| {
            entries
                .iter()
                .find(|e| e.id == provider_id)
                .and_then(|e| e.instance.downcast_ref::<T>().cloned())
        })
    }

    /// Gets a bound provider instance, failing if it is missing.
    ///
    /// ## Errors
    ///
    /// Returns [`SpiError::ProviderNotFound`] if no instance of type `T` is
    /// bound under `provider_id`.
    pub fn require_instance<T>(&self, spi_name: &str, provider_id: &str) -> Result<T, SpiError>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.instance(spi_name, provider_id)
            .ok_or_else(|| SpiError::provider_not_found(spi_name, provider_id))
    }

    /// Lists all bound instances of type `T` for an SPI, in binding order.
    #[must_use]
    pub fn instances<T>(&self, spi_name: &str) -> Vec<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.instances
            .get(spi_name)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| e.instance.downcast_ref::<T>().cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Lists all registered factory IDs for an SPI.
    #[must_use]
    pub fn list_providers(&self, spi_name: &str) -> Vec<&'static str> {
        self.factories
            .get(spi_name)
            .map(|entries| entries.iter().map(|e| e.id).collect())
            .unwrap_or_default()
    }

    /// Gets provider metadata by SPI and provider ID.
    #[must_use]
    pub fn get_metadata(&self, spi_name: &str, provider_id: &str) -> Option<ProviderMetadata> {
        self.factories.get(spi_name).and_then(|entries| {
            entries
                .iter()
                .find(|e| e.id == provider_id)
                .map(|e| e.metadata.clone())
        })
    }

    /// Checks if a provider factory or instance is registered.
    #[must_use]
    pub fn has_provider(&self, spi_name: &str, provider_id: &str) -> bool {
        self.factories
            .get(spi_name)
            .is_some_and(|entries| entries.iter().any(|e| e.id == provider_id))
            || self
                .instances
                .get(spi_name)
                .is_some_and(|entries| entries.iter().any(|e| e.id == provider_id))
    }

    /// Validates that required providers are registered.
    ///
    /// ## Errors
    ///
    /// Returns an error if a required provider is missing.
    pub fn validate_required(&self, requirements: &[(&str, &str)]) -> Result<(), SpiError> {
        for (spi_name, provider_id) in requirements {
            if !self.has_provider(spi_name, provider_id) {
                return Err(SpiError::provider_not_found(spi_name, provider_id));
            }
        }
        Ok(())
    }
}
