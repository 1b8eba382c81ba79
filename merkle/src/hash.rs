//! The hash function shared by leaves and internal nodes.

use sha2::{Digest, Sha256};

/// Length in bytes of every digest in the tree.
pub const HASH_LENGTH: usize = 32;

/// A SHA-256 digest.
pub type CryptoHash = [u8; HASH_LENGTH];

/// Hash an arbitrary byte string: `sha256(bytes)`.
///
/// Leaf digests are this function applied to an item's canonical bytes.
pub fn hash(bytes: &[u8]) -> CryptoHash {
    Sha256::digest(bytes).into()
}

/// Combine two child digests: `sha256(left || right)`.
///
/// Operates on the raw 32-byte digests, never on their hex text.
pub fn node_hash(left: &CryptoHash, right: &CryptoHash) -> CryptoHash {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Parse a hex digest, accepting an optional `0x` prefix.
///
/// Returns `None` unless the input decodes to exactly 32 bytes.
pub fn parse_hex(input: &str) -> Option<CryptoHash> {
    let trimmed = strip_hex_prefix(input);
    let mut out = [0u8; HASH_LENGTH];
    hex::decode_to_slice(trimmed, &mut out).ok()?;
    Some(out)
}

/// Strip an optional `0x` / `0X` prefix.
pub fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}
