//! # kc-admin-api
//!
//! Admin REST API for Keycloak Rust.
//!
//! This crate exposes the client installation download endpoints of the
//! admin console, plus the realm import used to seed storage.
//!
//! ## NIST 800-53 Rev5 Controls
//!
//! - CM-2: Baseline Configuration
//! - SC-28: Protection of Information at Rest
//!
//! ## Modules
//!
//! - [`dto`] - Data Transfer Objects for API requests/responses
//! - [`error`] - Error types and HTTP error responses
//! - [`import`] - Realm import
//! - [`router`] - Axum router and HTTP handlers
//! - [`state`] - Application state management
//!
//! ## API Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/admin/realms/{realm}/clients` | List clients (`?clientId=` filter) |
//! | GET | `/admin/realms/{realm}/clients/{id}/installation/providers` | List installation formats |
//! | GET | `/admin/realms/{realm}/clients/{id}/installation/providers/{provider_id}` | Download installation file |

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod dto;
pub mod error;
pub mod import;
pub mod router;
pub mod state;

pub use dto::{
    ClientRepresentation, ClientSearchParams, ClientSummary, InstallationProviderRepresentation,
    RealmRepresentation,
};
pub use error::{AdminError, AdminResult, ErrorResponse};
pub use import::{ImportResult, RealmImport, import_realm};
pub use router::admin_router;
pub use state::ClientState;
