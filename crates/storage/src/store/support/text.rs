#![forbid(unsafe_code)]

use sha2::Digest;
use std::fmt::Write as _;

/// Short content fingerprint for text deduplication (hex prefix of SHA-256).
pub(in crate::store) fn content_hash(text: &str) -> String {
    let mut hasher = sha2::Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(16);
    for byte in digest.iter().take(8) {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

pub(in crate::store) fn char_count(text: &str) -> i64 {
    text.chars().count() as i64
}
