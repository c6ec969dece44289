//! Realm DTOs for the Admin API.

use kc_model::{Realm, SslRequired};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Realm representation, as found in realm import files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealmRepresentation {
    /// Internal identifier. Generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Realm name (unique identifier).
    ///
    /// May be empty; realm-derived labels then fall back to the id.
    #[serde(default)]
    pub realm: String,
    /// Display name for UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether the realm is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// SSL requirement level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_required: Option<SslRequired>,
}

fn default_enabled() -> bool {
    true
}

impl RealmRepresentation {
    /// Converts this representation to a domain `Realm` model.
    #[must_use]
    pub fn into_realm(self) -> Realm {
        let mut realm = Realm::new(self.realm);
        if let Some(id) = self.id {
            realm = realm.with_id(id);
        }
        if let Some(ssl) = self.ssl_required {
            realm = realm.with_ssl_required(ssl);
        }
        realm.display_name = self.display_name;
        realm.enabled = self.enabled;
        realm
    }
}

impl From<Realm> for RealmRepresentation {
    fn from(realm: Realm) -> Self {
        Self {
            id: Some(realm.id),
            realm: realm.name,
            display_name: realm.display_name,
            enabled: realm.enabled,
            ssl_required: Some(realm.ssl_required),
        }
    }
}
