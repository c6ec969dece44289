//! # kc-model
//!
//! Domain models for Keycloak Rust (Realm, Client).
//!
//! This crate defines the core domain entities used throughout Keycloak.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod client;
pub mod realm;

pub use client::{Client, ClientType, Protocol};
pub use realm::{Realm, SslRequired};
