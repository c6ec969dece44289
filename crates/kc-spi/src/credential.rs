//! Client credential lookup capability.
//!
//! Installation providers need the adapter-facing credentials of a client
//! (for example its shared secret). Which credentials exist depends on the
//! client's authenticator type, so the lookup is delegated to whatever
//! registry of client authenticators the host has configured.

use std::collections::BTreeMap;

use kc_model::Client;

use crate::provider::SpiError;

/// Adapter configuration produced by a client authenticator.
///
/// Keys follow the adapter configuration format (`secret`, `algorithm`, ...).
pub type AdapterConfig = BTreeMap<String, serde_json::Value>;

/// Resolves the adapter credentials of a client.
pub trait CredentialResolver: Send + Sync {
    /// Returns the adapter configuration for `client` as produced by the
    /// authenticator registered under `authenticator_type`.
    ///
    /// `Ok(None)` means the authenticator has nothing to expose.
    ///
    /// ## Errors
    ///
    /// Returns [`SpiError::ProviderNotFound`] if no authenticator is
    /// registered for `authenticator_type`.
    fn resolve_secret(
        &self,
        authenticator_type: &str,
        client: &Client,
    ) -> Result<Option<AdapterConfig>, SpiError>;
}

impl<T: CredentialResolver + ?Sized> CredentialResolver for std::sync::Arc<T> {
    fn resolve_secret(
        &self,
        authenticator_type: &str,
        client: &Client,
    ) -> Result<Option<AdapterConfig>, SpiError> {
        (**self).resolve_secret(authenticator_type, client)
    }
}
