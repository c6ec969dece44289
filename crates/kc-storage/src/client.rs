//! Client storage provider trait.

use async_trait::async_trait;
use kc_model::Client;
use uuid::Uuid;

use crate::error::StorageResult;

/// Provider for client storage operations.
///
/// Clients are always scoped to a realm.
#[async_trait]
pub trait ClientProvider: Send + Sync {
    /// Creates a new client.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if a client with the same
    /// `client_id` exists in the realm.
    async fn create(&self, client: &Client) -> StorageResult<()>;

    /// Gets a client by internal ID.
    async fn get_by_id(&self, realm_id: Uuid, id: Uuid) -> StorageResult<Option<Client>>;

    /// Gets a client by `client_id` (OAuth client identifier).
    async fn get_by_client_id(
        &self,
        realm_id: Uuid,
        client_id: &str,
    ) -> StorageResult<Option<Client>>;

    /// Lists all clients in a realm, ordered by `client_id`.
    async fn list(&self, realm_id: Uuid) -> StorageResult<Vec<Client>>;
}
