//! # kc-core
//!
//! Configuration and error handling shared by the Keycloak Rust crates.
//!
//! ## NIST 800-53 Rev5 Controls
//!
//! - CM-6: Configuration settings

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;

pub use config::{Config, InstallationConfig, ServerConfig};
pub use error::{Error, Result};
