//! Data Transfer Objects (DTOs) for the Admin API.
//!
//! These types define the request and response formats for the API.
//! They are separate from domain models to allow API evolution
//! without affecting internal structures.

pub mod client;
pub mod installation;
pub mod realm;

pub use client::{ClientRepresentation, ClientSearchParams, ClientSummary};
pub use installation::InstallationProviderRepresentation;
pub use realm::RealmRepresentation;
