//! Client installation error types.

use kc_spi::SpiError;
use thiserror::Error;

/// Errors raised while generating a client installation.
///
/// Missing optional data (redirect URIs, secrets, realm names) never
/// produces an error; it degrades to defaults or omitted lines.
#[derive(Debug, Error)]
pub enum InstallationError {
    /// The client's authenticator type has no registered authenticator.
    ///
    /// This points at an inconsistent server configuration and is surfaced
    /// to the operator instead of silently dropping the secret.
    #[error("cannot resolve client credentials: {0}")]
    CredentialLookup(#[from] SpiError),

    /// No installation provider is registered under the requested ID.
    #[error("unknown client installation provider: {0}")]
    UnknownProvider(String),

    /// The provider does not support the client's protocol.
    #[error("provider {provider} does not support protocol {protocol}")]
    UnsupportedProtocol {
        /// Installation provider ID.
        provider: String,
        /// Client protocol.
        protocol: &'static str,
    },
}

/// Result type for client installation operations.
pub type InstallationResult<T> = Result<T, InstallationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_error_keeps_cause() {
        let err = InstallationError::from(SpiError::provider_not_found(
            "client-authenticator",
            "client-magic",
        ));

        assert!(err.to_string().contains("client-authenticator:client-magic"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
