//! # kc-auth
//!
//! Client authentication for Keycloak Rust.
//!
//! This crate provides the client authenticator plugins selected by a
//! client's `client_authenticator_type`, and a registry-backed
//! [`CredentialResolver`](kc_spi::CredentialResolver) that looks them up
//! by that type tag.
//!
//! ## NIST 800-53 Rev5 Controls
//!
//! - IA-3: Device Identification and Authentication
//! - IA-5: Authenticator Management
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use kc_auth::{register_client_authenticators, RegistryCredentialResolver};
//! use kc_spi::{CredentialResolver, SpiRegistry};
//!
//! let registry = Arc::new(SpiRegistry::new());
//! register_client_authenticators(&registry);
//!
//! let resolver = RegistryCredentialResolver::new(Arc::clone(&registry));
//! let config = resolver.resolve_secret(&client.client_authenticator_type, &client)?;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod client;

pub use client::{
    ClientAuthenticatorFactory, ClientAuthenticatorSpi, ClientIdAndSecretAuthenticator,
    JwtClientAuthenticator, JwtClientSecretAuthenticator, RegistryCredentialResolver,
    X509ClientAuthenticator, register_client_authenticators,
};
