//! Cryptographically secure random number generation.
//!
//! Used for the session cookie secrets handed to reverse proxies. All
//! functions use cryptographically secure random number generators
//! suitable for security-sensitive operations.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;

/// Size in bytes of a generated proxy cookie secret.
///
/// oauth2-proxy accepts 16, 24 or 32 byte secrets; 32 selects AES-256
/// for cookie encryption.
pub const COOKIE_SECRET_LEN: usize = 32;

/// Generates a cryptographically secure random byte array.
///
/// Uses the thread-local random number generator which is cryptographically
/// secure by default.
///
/// # Arguments
///
/// * `len` - Number of random bytes to generate
#[must_use]
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes[..]);
    bytes
}

/// Generates a URL-safe base64-encoded random string without padding.
///
/// # Arguments
///
/// * `byte_len` - Number of random bytes (output will be ~4/3 this length)
#[must_use]
pub fn random_base64url(byte_len: usize) -> String {
    URL_SAFE_NO_PAD.encode(random_bytes(byte_len))
}

/// Generates a fresh session cookie secret for a reverse proxy.
///
/// 32 random bytes, URL-safe base64 without padding (43 characters).
/// Every call returns a new value; nothing is cached.
#[must_use]
pub fn generate_cookie_secret() -> String {
    random_base64url(COOKIE_SECRET_LEN)
}
