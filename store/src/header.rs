use bincode::Encode;
use headerproof_merkle::{CryptoHash, hash::hash, hash::strip_hex_prefix};

use crate::StoreError;

/// A chain block header as received from the feed.
///
/// Field order is part of the canonical serialization and must not change:
/// leaf digests and therefore every stored root depend on it.
#[derive(Debug, Clone, PartialEq, Eq, Encode)]
pub struct HeaderRecord {
    /// The header's own block hash, as reported by the chain.
    pub hash: CryptoHash,
    pub parent_hash: CryptoHash,
    pub number: u64,
    pub state_root: CryptoHash,
    pub extrinsics_root: CryptoHash,
    /// Opaque digest blob (consensus logs, seals).
    pub digest: Vec<u8>,
}

impl HeaderRecord {
    /// Canonical bytes of this header.
    ///
    /// bincode, standard configuration, big endian: 32-byte arrays are written
    /// raw, `number` as a varint, `digest` length-prefixed. This is the only
    /// encoding ever used to derive a leaf digest.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, StoreError> {
        let config = bincode::config::standard().with_big_endian();
        bincode::encode_to_vec(self, config)
            .map_err(|e| StoreError::Encoding(format!("header #{}: {}", self.number, e)))
    }

    /// Leaf digest of this header: `sha256(canonical_bytes)`.
    pub fn leaf_hash(&self) -> Result<CryptoHash, StoreError> {
        Ok(hash(&self.canonical_bytes()?))
    }

    /// Key under which this header is indexed by hash: lowercase hex, no
    /// `0x` prefix.
    pub fn hash_key(&self) -> String {
        hex::encode(self.hash)
    }

    /// Key under which this header is indexed by block number.
    pub fn number_key(&self) -> String {
        self.number.to_string()
    }
}

/// Normalize a user-supplied header hash to the form used as index key.
///
/// Strips an optional `0x` prefix and lowercases.
pub fn normalize_hash_key(input: &str) -> String {
    strip_hex_prefix(input.trim()).to_ascii_lowercase()
}
