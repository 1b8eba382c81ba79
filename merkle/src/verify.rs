//! Proof verification.
//!
//! Pure functions: no tree or store required. The root is recomputed from
//! the leaf digest and the proof steps, then compared to the expected root.

use crate::{
    hash::{node_hash, CryptoHash},
    proof::{Position, ProofStep},
};

/// Fold `proof` over `leaf_hash`, returning the recomputed root.
///
/// An empty proof returns `leaf_hash` unchanged.
pub fn compute_root(leaf_hash: &CryptoHash, proof: &[ProofStep]) -> CryptoHash {
    proof.iter().fold(*leaf_hash, |running, step| match step.position {
        Position::Left => node_hash(&step.sibling_hash, &running),
        Position::Right => node_hash(&running, &step.sibling_hash),
    })
}

/// Check that `proof` links `leaf_hash` to `root_hash`.
///
/// Never fails: a truncated, reordered or corrupted proof simply produces a
/// different root and yields `false`.
pub fn verify_proof(leaf_hash: &CryptoHash, proof: &[ProofStep], root_hash: &CryptoHash) -> bool {
    compute_root(leaf_hash, proof) == *root_hash
}
