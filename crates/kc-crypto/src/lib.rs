//! # kc-crypto
//!
//! Cryptographic helpers for Keycloak Rust.
//!
//! Proxy cookie secrets are drawn from the thread-local CSPRNG provided by `rand`, which is
//! reseeded from the operating system and safe to use from any number of
//! concurrent requests.
//!
//! ## NIST 800-53 Rev5 Controls
//!
//! - SC-12: Cryptographic key management
//! - SC-13: Cryptographic protection

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod random;

pub use random::{COOKIE_SECRET_LEN, generate_cookie_secret, random_base64url, random_bytes};
