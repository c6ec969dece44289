//! # kc-spi
//!
//! Service Provider Interface (SPI) traits for Keycloak Rust extensibility.
//!
//! This crate defines the core abstractions for the plugin system, allowing
//! custom implementations of client installations, client authenticators,
//! and other components.
//!
//! ## Design
//!
//! Extension points are modelled with traits:
//! - [`Provider`] - Base trait for all provider implementations
//! - [`ProviderFactory`] - Factory trait for creating provider instances
//! - [`Spi`] - Definition of an SPI extension point
//! - [`CredentialResolver`] - Capability for looking up a client's adapter credentials

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod credential;
pub mod provider;
pub mod registry;
pub mod session;

pub use credential::{AdapterConfig, CredentialResolver};
pub use provider::{
    FactoryConfig, MapFactoryConfig, Provider, ProviderFactory, ProviderMetadata, Spi, SpiError,
};
pub use registry::SpiRegistry;
pub use session::KeycloakSession;
