//! Shared pieces of the opening handshake (RFC 6455 Section 4).

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use sha1::{Digest, Sha1};

/// GUID appended to the client key before hashing (RFC 6455 Section 1.3).
pub const ACCEPT_KEY_SALT: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// The protocol version this crate speaks.
pub const SUPPORTED_VERSION: &str = "13";

/// Required length of the decoded `Sec-WebSocket-Key` nonce in bytes.
pub const NONCE_LENGTH: usize = 16;

/// Compute the `Sec-WebSocket-Accept` value for a `Sec-WebSocket-Key`.
///
/// The accept key is `base64(SHA1(key ++ GUID))`.
///
/// # Example
///
/// ```
/// use websock::protocol::handshake::compute_accept_key;
///
/// let accept = compute_accept_key("dGhlIHNhbXBsZSBub25jZQ==");
/// assert_eq!(accept, "s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");
/// ```
#[must_use]
pub fn compute_accept_key(key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(key.as_bytes());
    hasher.update(ACCEPT_KEY_SALT.as_bytes());
    BASE64.encode(hasher.finalize())
}

/// Generate a fresh `Sec-WebSocket-Key` value: 16 random bytes, base64.
///
/// Draws from the operating system CSPRNG, with a time-derived fallback
/// if the OS source fails.
#[must_use]
pub fn generate_nonce() -> String {
    let mut nonce = [0u8; NONCE_LENGTH];
    if getrandom::getrandom(&mut nonce).is_err() {
        use std::time::{SystemTime, UNIX_EPOCH};
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0x9E37_79B9_7F4A_7C15);
        nonce.copy_from_slice(&nanos.to_le_bytes());
    }
    BASE64.encode(nonce)
}

/// Check that a `Sec-WebSocket-Key` decodes to exactly 16 bytes.
#[must_use]
pub fn nonce_is_well_formed(key: &str) -> bool {
    BASE64
        .decode(key)
        .map(|decoded| decoded.len() == NONCE_LENGTH)
        .unwrap_or(false)
}
