//! # kc-storage
//!
//! Storage abstraction traits for Keycloak Rust.
//!
//! The admin API reads realms and clients through these traits; the
//! server wires them to the in-memory backend seeded from a realm import
//! file.
//!
//! ## Provider Traits
//!
//! - [`RealmProvider`] - realm lookups and registration
//! - [`ClientProvider`] - client lookups and registration
//!
//! [`MemoryStore`] implements both.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod client;
pub mod error;
pub mod memory;
pub mod realm;

pub use client::ClientProvider;
pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use realm::RealmProvider;
