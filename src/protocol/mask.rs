//! Payload masking transform (RFC 6455 Section 5.3).

/// XOR `data[i]` with `key[i % 4]` in place.
///
/// Masking and unmasking are the same operation; applying the transform
/// twice with the same key restores the original bytes.
#[inline]
pub fn apply_mask(data: &mut [u8], key: [u8; 4]) {
    let key_word = u32::from_ne_bytes(key);
    let mut chunks = data.chunks_exact_mut(4);
    for chunk in &mut chunks {
        let word = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) ^ key_word;
        chunk.copy_from_slice(&word.to_ne_bytes());
    }
    for (i, byte) in chunks.into_remainder().iter_mut().enumerate() {
        *byte ^= key[i % 4];
    }
}

/// Draw a fresh 4-byte masking key from the operating system CSPRNG.
///
/// A predictable masking key defeats the cache-poisoning countermeasure
/// the mask exists for, so every client frame gets a fresh draw. If the
/// OS source fails, a time-derived value keeps frames flowing.
#[must_use]
pub fn random_masking_key() -> [u8; 4] {
    let mut key = [0u8; 4];
    if getrandom::getrandom(&mut key).is_err() {
        use std::time::{SystemTime, UNIX_EPOCH};
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u32)
            .unwrap_or(0x9E37_79B9);
        key = nanos.to_le_bytes();
    }
    key
}
