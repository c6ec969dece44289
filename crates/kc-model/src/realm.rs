//! Realm domain model.
//!
//! A realm is the top-level container for all Keycloak entities.
//! Each realm is isolated and manages its own users, clients, and roles.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// SSL requirement level for a realm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SslRequired {
    /// No SSL required.
    None,
    /// SSL required for external requests only.
    #[default]
    External,
    /// SSL required for all requests.
    All,
}

/// A Keycloak realm.
///
/// Realms are the top-level organizational unit in Keycloak.
/// They provide complete isolation between different sets of users,
/// clients, and authentication configurations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Realm {
    // === Identity ===
    /// Unique identifier.
    pub id: Uuid,
    /// Unique realm name.
    ///
    /// Used as the issuer path segment (`/realms/{name}`).
    pub name: String,
    /// Display name for UI.
    pub display_name: Option<String>,
    /// Whether the realm is enabled.
    pub enabled: bool,

    // === Timestamps ===
    /// When the realm was created.
    pub created_at: DateTime<Utc>,
    /// When the realm was last updated.
    pub updated_at: DateTime<Utc>,

    // === Security Settings ===
    /// SSL requirement level.
    pub ssl_required: SslRequired,

    // === Custom Attributes ===
    /// Custom realm attributes.
    pub attributes: HashMap<String, String>,
}

impl Realm {
    /// Creates a new realm with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            display_name: None,
            enabled: true,
            created_at: now,
            updated_at: now,
            ssl_required: SslRequired::default(),
            attributes: HashMap::new(),
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub const fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the SSL requirement.
    #[must_use]
    pub const fn with_ssl_required(mut self, ssl: SslRequired) -> Self {
        self.ssl_required = ssl;
        self
    }

    /// Checks if the realm is the master realm.
    #[must_use]
    pub fn is_master(&self) -> bool {
        self.name == "master"
    }
}
