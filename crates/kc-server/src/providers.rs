//! Provider wiring for the server.
//!
//! Builds the SPI registry (client authenticators and installation
//! providers) and seeds the in-memory store from the realm import file.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use kc_admin_api::{ImportResult, RealmImport, import_realm};
use kc_auth::{ClientAuthenticatorSpi, ClientIdAndSecretAuthenticator, register_client_authenticators};
use kc_core::InstallationConfig;
use kc_protocol_oidc::{
    ClientInstallationSpi, OAUTH2_PROXY_PROVIDER_ID, Oauth2ProxyInstallationFactory,
    deploy_installation_provider,
};
use kc_spi::{MapFactoryConfig, SpiRegistry};
use kc_storage::MemoryStore;

/// Translates installation settings into factory configuration.
#[must_use]
pub fn installation_factory_config(installation: &InstallationConfig) -> MapFactoryConfig {
    let mut config = MapFactoryConfig::new()
        .with(
            "scope",
            if installation.active_scope {
                "active"
            } else {
                "commented"
            },
        )
        .with(
            "issuer-fallback",
            installation.issuer_realm_fallback.to_string(),
        );
    if let Some(name) = &installation.display_name {
        config.set("display-name", name);
    }
    config
}

/// Creates the SPI registry with every built-in provider deployed.
///
/// ## Errors
///
/// Returns an error if an installation provider fails to initialize, or
/// if a provider the admin API depends on is missing afterwards.
pub async fn build_registry(installation: &InstallationConfig) -> anyhow::Result<Arc<SpiRegistry>> {
    let registry = Arc::new(SpiRegistry::new());

    register_client_authenticators(&registry);
    deploy_installation_provider(
        &registry,
        Oauth2ProxyInstallationFactory::default(),
        &installation_factory_config(installation),
    )
    .await
    .context("deploying oauth2-proxy installation provider")?;

    registry
        .validate_required(&[
            (ClientInstallationSpi::NAME, OAUTH2_PROXY_PROVIDER_ID),
            (
                ClientAuthenticatorSpi::NAME,
                ClientIdAndSecretAuthenticator::PROVIDER_ID,
            ),
        ])
        .context("checking built-in providers")?;

    for id in registry.list_providers(ClientInstallationSpi::NAME) {
        if let Some(metadata) = registry.get_metadata(ClientInstallationSpi::NAME, id) {
            tracing::info!(
                provider = metadata.id,
                name = metadata.name,
                "client installation format available"
            );
        }
    }

    Ok(registry)
}

/// Loads a realm import file into `store`.
///
/// ## Errors
///
/// Returns an error if the file cannot be read or parsed, or if the realm
/// conflicts with stored data.
pub async fn seed_store(store: &MemoryStore, path: &Path) -> anyhow::Result<ImportResult> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading realm import {}", path.display()))?;
    let import: RealmImport = serde_json::from_str(&text)
        .with_context(|| format!("parsing realm import {}", path.display()))?;

    let result = import_realm(store, store, import).await?;
    tracing::info!(
        realm = %result.realm,
        clients = result.clients_imported,
        file = %path.display(),
        "seeded storage from realm import"
    );
    Ok(result)
}
