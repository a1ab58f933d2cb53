//! SHA-256 digests rendered as lowercase hex

use sha2::{Digest, Sha256};

/// Length of a rendered digest: 32 bytes, two hex characters each.
pub const DIGEST_HEX_LEN: usize = 64;

/// Hashes `bytes` and returns the 64-character lowercase hex digest.
pub fn digest_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Hashes several slices as if they were one contiguous buffer.
pub fn digest_parts(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}

/// True when the first `difficulty` hex characters of `digest` are all `'0'`.
pub fn meets_difficulty(digest: &str, difficulty: u32) -> bool {
    let difficulty = difficulty as usize;
    digest.len() >= difficulty && digest.bytes().take(difficulty).all(|b| b == b'0')
}
