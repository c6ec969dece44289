//! Admin API router configuration.
//!
//! Provides functions to create Axum routers for the Admin API endpoints.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use kc_model::{Client, Realm};
use kc_protocol_oidc::{
    ClientInstallationProvider, ClientInstallationSpi, InstallationError, InstallationRequest,
    installation_providers,
};
use kc_storage::{ClientProvider, RealmProvider};
use uuid::Uuid;

use crate::dto::{ClientSearchParams, ClientSummary, InstallationProviderRepresentation};
use crate::error::{AdminError, AdminResult};
use crate::state::ClientState;

async fn load_realm<R, C>(state: &ClientState<R, C>, realm_name: &str) -> AdminResult<Realm>
where
    R: RealmProvider,
    C: ClientProvider,
{
    state
        .realm_provider
        .get_by_name(realm_name)
        .await?
        .ok_or_else(|| AdminError::not_found("Realm", realm_name))
}

async fn load_client<R, C>(
    state: &ClientState<R, C>,
    realm: &Realm,
    id: Uuid,
) -> AdminResult<Client>
where
    R: RealmProvider,
    C: ClientProvider,
{
    state
        .client_provider
        .get_by_id(realm.id, id)
        .await?
        .ok_or_else(|| AdminError::not_found("Client", id.to_string()))
}

// ============================================================================
// Client Handlers
// ============================================================================

/// GET /admin/realms/{realm}/clients - List clients, optionally by `clientId`
async fn list_clients<R, C>(
    State(state): State<ClientState<R, C>>,
    Path(realm_name): Path<String>,
    Query(params): Query<ClientSearchParams>,
) -> AdminResult<Json<Vec<ClientSummary>>>
where
    R: RealmProvider,
    C: ClientProvider,
{
    let realm = load_realm(&state, &realm_name).await?;

    let clients = match params.client_id {
        Some(client_id) => state
            .client_provider
            .get_by_client_id(realm.id, &client_id)
            .await?
            .into_iter()
            .collect(),
        None => state.client_provider.list(realm.id).await?,
    };

    Ok(Json(clients.into_iter().map(ClientSummary::from).collect()))
}

// ============================================================================
// Client Installation Handlers
// ============================================================================

/// GET /admin/realms/{realm}/clients/{id}/installation/providers
async fn list_installation_providers<R, C>(
    State(state): State<ClientState<R, C>>,
    Path((realm_name, id)): Path<(String, Uuid)>,
) -> AdminResult<Json<Vec<InstallationProviderRepresentation>>>
where
    R: RealmProvider,
    C: ClientProvider,
{
    let realm = load_realm(&state, &realm_name).await?;
    let client = load_client(&state, &realm, id).await?;

    let providers = installation_providers(&state.registry, client.protocol.as_str())
        .iter()
        .map(|p| InstallationProviderRepresentation::from(p.as_ref()))
        .collect();

    Ok(Json(providers))
}

/// GET /admin/realms/{realm}/clients/{id}/installation/providers/{provider_id}
async fn get_installation<R, C>(
    State(state): State<ClientState<R, C>>,
    Path((realm_name, id, provider_id)): Path<(String, Uuid, String)>,
) -> AdminResult<impl IntoResponse>
where
    R: RealmProvider,
    C: ClientProvider,
{
    let realm = load_realm(&state, &realm_name).await?;
    let client = load_client(&state, &realm, id).await?;

    let provider = state
        .registry
        .instance::<Arc<dyn ClientInstallationProvider>>(ClientInstallationSpi::NAME, &provider_id)
        .ok_or_else(|| InstallationError::UnknownProvider(provider_id.clone()))?;

    if provider.protocol() != client.protocol.as_str() {
        return Err(InstallationError::UnsupportedProtocol {
            provider: provider_id,
            protocol: client.protocol.as_str(),
        }
        .into());
    }

    let installation = provider.generate_installation(&InstallationRequest {
        realm: &realm,
        client: &client,
        base_url: &state.base_url,
        credentials: state.credentials.as_ref(),
    })?;

    tracing::info!(
        realm = %realm.name,
        client_id = %client.client_id,
        provider = %provider_id,
        "client installation generated"
    );

    let disposition = if installation.download_only {
        format!("attachment; filename=\"{}\"", installation.filename)
    } else {
        format!("inline; filename=\"{}\"", installation.filename)
    };

    Ok((
        [
            (header::CONTENT_TYPE, installation.media_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        installation.content,
    ))
}

// ============================================================================
// Router Construction
// ============================================================================

/// Creates the client Admin API router.
///
/// # Routes
///
/// - `GET /admin/realms/{realm}/clients` - List clients (`?clientId=` filters)
/// - `GET /admin/realms/{realm}/clients/{id}/installation/providers` - List
///   installation formats for the client's protocol
/// - `GET /admin/realms/{realm}/clients/{id}/installation/providers/{provider_id}` -
///   Generate an installation file
///
/// `{id}` is the client's internal UUID, not its `clientId`.
///
/// # Example
///
/// ```ignore
/// use kc_admin_api::{admin_router, ClientState};
///
/// let state = ClientState::new(store.clone(), store, registry, resolver, base_url);
/// let app = admin_router().with_state(state);
/// ```
pub fn admin_router<R, C>() -> Router<ClientState<R, C>>
where
    R: RealmProvider + 'static,
    C: ClientProvider + 'static,
{
    Router::new()
        .route("/admin/realms/{realm}/clients", get(list_clients::<R, C>))
        .route(
            "/admin/realms/{realm}/clients/{id}/installation/providers",
            get(list_installation_providers::<R, C>),
        )
        .route(
            "/admin/realms/{realm}/clients/{id}/installation/providers/{provider_id}",
            get(get_installation::<R, C>),
        )
}
