//! Client installation DTOs for the Admin API.

use kc_protocol_oidc::ClientInstallationProvider;
use serde::{Deserialize, Serialize};

/// Describes an installation format offered for a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationProviderRepresentation {
    /// Provider ID, used in the download URL.
    pub id: String,
    /// Login protocol the provider serves.
    pub protocol: String,
    /// Format selector label.
    pub display_type: String,
    /// Help text for the format selector.
    pub help_text: String,
    /// Suggested file name.
    pub filename: String,
    /// MIME type of the file.
    pub media_type: String,
    /// Whether the file may only be downloaded.
    pub download_only: bool,
}

impl From<&dyn ClientInstallationProvider> for InstallationProviderRepresentation {
    fn from(provider: &dyn ClientInstallationProvider) -> Self {
        Self {
            id: provider.id().to_string(),
            protocol: provider.protocol().to_string(),
            display_type: provider.display_type().to_string(),
            help_text: provider.help_text().to_string(),
            filename: provider.filename().to_string(),
            media_type: provider.media_type().to_string(),
            download_only: provider.is_download_only(),
        }
    }
}
