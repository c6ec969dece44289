//! In-memory storage backend.

use std::collections::HashMap;

use async_trait::async_trait;
use kc_model::{Client, Realm};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::client::ClientProvider;
use crate::error::{StorageError, StorageResult};
use crate::realm::RealmProvider;

/// Realm and client storage held in process memory.
///
/// Contents are lost on restart; the server seeds it from an import file
/// at startup.
#[derive(Debug, Default)]
pub struct MemoryStore {
    realms: RwLock<HashMap<Uuid, Realm>>,
    clients: RwLock<HashMap<(Uuid, Uuid), Client>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RealmProvider for MemoryStore {
    async fn create(&self, realm: &Realm) -> StorageResult<()> {
        let mut realms = self.realms.write().await;
        if realms.values().any(|r| r.name == realm.name) {
            return Err(StorageError::duplicate("Realm", "name", &realm.name));
        }
        if realms.contains_key(&realm.id) {
            return Err(StorageError::duplicate("Realm", "id", realm.id.to_string()));
        }
        realms.insert(realm.id, realm.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Realm>> {
        Ok(self.realms.read().await.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> StorageResult<Option<Realm>> {
        Ok(self
            .realms
            .read()
            .await
            .values()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn list(&self) -> StorageResult<Vec<Realm>> {
        let mut realms: Vec<_> = self.realms.read().await.values().cloned().collect();
        realms.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(realms)
    }
}

#[async_trait]
impl ClientProvider for MemoryStore {
    async fn create(&self, client: &Client) -> StorageResult<()> {
        if !self.realms.read().await.contains_key(&client.realm_id) {
            return Err(StorageError::not_found("Realm", client.realm_id));
        }

        let mut clients = self.clients.write().await;
        if clients
            .values()
            .any(|c| c.realm_id == client.realm_id && c.client_id == client.client_id)
        {
            return Err(StorageError::duplicate(
                "Client",
                "client_id",
                &client.client_id,
            ));
        }
        clients.insert((client.realm_id, client.id), client.clone());
        Ok(())
    }

    async fn get_by_id(&self, realm_id: Uuid, id: Uuid) -> StorageResult<Option<Client>> {
        Ok(self.clients.read().await.get(&(realm_id, id)).cloned())
    }

    async fn get_by_client_id(
        &self,
        realm_id: Uuid,
        client_id: &str,
    ) -> StorageResult<Option<Client>> {
        Ok(self
            .clients
            .read()
            .await
            .values()
            .find(|c| c.realm_id == realm_id && c.client_id == client_id)
            .cloned())
    }

    async fn list(&self, realm_id: Uuid) -> StorageResult<Vec<Client>> {
        let mut clients: Vec<_> = self
            .clients
            .read()
            .await
            .values()
            .filter(|c| c.realm_id == realm_id)
            .cloned()
            .collect();
        clients.sort_by(|a, b| a.client_id.cmp(&b.client_id));
        Ok(clients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_realm() -> (MemoryStore, Realm) {
        let store = MemoryStore::new();
        let realm = Realm::new("acme");
        RealmProvider::create(&store, &realm).await.unwrap();
        (store, realm)
    }

    #[tokio::test]
    async fn realms_are_found_by_id_and_name() {
        let (store, realm) = store_with_realm().await;

        let by_name = store.get_by_name("acme").await.unwrap().unwrap();
        assert_eq!(by_name.id, realm.id);
        assert!(RealmProvider::get_by_id(&store, realm.id).await.unwrap().is_some());
        assert!(store.get_by_name("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_realm_name_is_rejected() {
        let (store, _) = store_with_realm().await;

        let err = RealmProvider::create(&store, &Realm::new("acme"))
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn clients_are_scoped_to_their_realm() {
        let (store, realm) = store_with_realm().await;
        let other = Realm::new("other");
        RealmProvider::create(&store, &other).await.unwrap();

        let client = Client::new_public(realm.id, "proxy");
        ClientProvider::create(&store, &client).await.unwrap();
        ClientProvider::create(&store, &Client::new_public(other.id, "proxy"))
            .await
            .unwrap();

        let found = store.get_by_client_id(realm.id, "proxy").await.unwrap().unwrap();
        assert_eq!(found.id, client.id);
        assert!(ClientProvider::get_by_id(&store, other.id, client.id)
            .await
            .unwrap()
            .is_none());
        assert_eq!(ClientProvider::list(&store, realm.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn client_requires_existing_realm() {
        let store = MemoryStore::new();

        let err = ClientProvider::create(&store, &Client::new_public(Uuid::now_v7(), "proxy"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn duplicate_client_id_is_rejected() {
        let (store, realm) = store_with_realm().await;
        ClientProvider::create(&store, &Client::new_public(realm.id, "proxy"))
            .await
            .unwrap();

        let err = ClientProvider::create(&store, &Client::new_public(realm.id, "proxy"))
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn redirect_uri_order_survives_storage() {
        let (store, realm) = store_with_realm().await;
        let client = Client::new_public(realm.id, "proxy")
            .with_redirect_uri("https://b.example/cb")
            .with_redirect_uri("https://a.example/cb");
        ClientProvider::create(&store, &client).await.unwrap();

        let stored = ClientProvider::get_by_id(&store, realm.id, client.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.first_redirect_uri(), Some("https://b.example/cb"));
    }
}
