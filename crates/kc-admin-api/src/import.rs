//! Realm import.
//!
//! Loads a realm and its clients from the JSON import format:
//!
//! ```json
//! {
//!   "realm": { "realm": "acme" },
//!   "clients": [{ "clientId": "proxy", "secret": "..." }]
//! }
//! ```

use kc_storage::{ClientProvider, RealmProvider};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::{ClientRepresentation, RealmRepresentation};
use crate::error::{AdminError, AdminResult};

/// A realm with its clients, as read from an import file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealmImport {
    /// Realm configuration.
    pub realm: RealmRepresentation,
    /// Clients in the realm.
    #[serde(default)]
    pub clients: Vec<ClientRepresentation>,
}

/// Outcome of a realm import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// Imported realm name.
    pub realm: String,
    /// Imported realm ID.
    pub realm_id: Uuid,
    /// Number of clients imported.
    pub clients_imported: usize,
}

/// Stores a realm and its clients.
///
/// ## Errors
///
/// Returns a conflict error if the realm or one of its clients already
/// exists. Clients imported before the conflict stay stored.
pub async fn import_realm<R, C>(
    realm_provider: &R,
    client_provider: &C,
    import: RealmImport,
) -> AdminResult<ImportResult>
where
    R: RealmProvider + ?Sized,
    C: ClientProvider + ?Sized,
{
    let realm = import.realm.into_realm();
    realm_provider.create(&realm).await.map_err(|e| {
        if e.is_duplicate() {
            AdminError::conflict("Realm", "name", &realm.name)
        } else {
            AdminError::from(e)
        }
    })?;

    let mut clients_imported = 0;
    for repr in import.clients {
        let client = repr.into_client(realm.id);
        client_provider.create(&client).await.map_err(|e| {
            if e.is_duplicate() {
                AdminError::conflict("Client", "clientId", &client.client_id)
            } else {
                AdminError::from(e)
            }
        })?;
        clients_imported += 1;
    }

    tracing::info!(realm = %realm.name, clients = clients_imported, "realm imported");

    Ok(ImportResult {
        realm: realm.name,
        realm_id: realm.id,
        clients_imported,
    })
}
