//! Admin API key generation.
//!
//! Admin keys are the platform-level credential written during initial
//! setup. They look like `relu_admin_<43 url-safe base64 chars>`, the suffix
//! encoding 32 bytes from a CSPRNG.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

/// Prefix that marks a key as admin-scoped.
pub const ADMIN_API_KEY_PREFIX: &str = "relu_admin_";

/// Number of random bytes in the key suffix.
const KEY_BYTES: usize = 32;

/// Length of the encoded suffix (32 bytes, base64 without padding).
const SUFFIX_LEN: usize = 43;

/// Generate a fresh admin API key.
///
/// Every call draws new bytes from the thread-local CSPRNG, which is seeded
/// from the operating system. The random source failing is treated as fatal
/// and panics.
pub fn generate_admin_api_key() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    format!("{}{}", ADMIN_API_KEY_PREFIX, URL_SAFE_NO_PAD.encode(bytes))
}

/// Check whether a string has the admin key format.
pub fn is_admin_api_key(value: &str) -> bool {
    let Some(suffix) = value.strip_prefix(ADMIN_API_KEY_PREFIX) else {
        return false;
    };
    suffix.len() == SUFFIX_LEN
        && suffix
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
