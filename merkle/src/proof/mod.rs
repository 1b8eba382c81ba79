//! Inclusion proof generation.
//!
//! A proof is the ordered list of sibling digests from the leaf level up to
//! (but excluding) the root, each tagged with the side the sibling sits on.

use crate::{hash::CryptoHash, tree::MerkleTree, MerkleTreeError};

#[cfg(test)]
mod tests;

/// Which side of the running hash a sibling is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// `sha256(sibling || running)`.
    Left,
    /// `sha256(running || sibling)`.
    Right,
}

impl Position {
    /// Wire name: `"left"` or `"right"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Left => "left",
            Position::Right => "right",
        }
    }

    /// The opposite side.
    pub fn flipped(self) -> Self {
        match self {
            Position::Left => Position::Right,
            Position::Right => Position::Left,
        }
    }
}

/// One level of an inclusion proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofStep {
    /// Digest to combine with the running hash at this level.
    pub sibling_hash: CryptoHash,
    /// Side the sibling is placed on.
    pub position: Position,
}

impl MerkleTree {
    /// Generate an inclusion proof for the leaf with digest `leaf_hash`.
    ///
    /// The proof targets the first leaf with that digest; later duplicates
    /// receive the same proof. Steps are ordered leaf to root.
    ///
    /// At every level the sibling is the node at `index ^ 1`. When that
    /// index is past the end of an odd level, the node was paired with
    /// itself at build time, so the step carries the node's own digest on
    /// the right. Every proof therefore has `height() - 1` steps.
    pub fn generate_inclusion_proof(
        &self,
        leaf_hash: &CryptoHash,
    ) -> Result<Vec<ProofStep>, MerkleTreeError> {
        if self.is_empty() {
            return Err(MerkleTreeError::EmptyTree);
        }
        let mut index = self
            .leaf_index(leaf_hash)
            .ok_or_else(|| MerkleTreeError::LeafNotFound(hex::encode(leaf_hash)))?;

        let mut steps = Vec::with_capacity(self.height().saturating_sub(1));
        // The root level contributes no step.
        for depth in 0..self.height() - 1 {
            let level = self.level(depth).unwrap_or_default();
            let sibling_index = index ^ 1;
            let position = if index % 2 == 0 {
                Position::Right
            } else {
                Position::Left
            };
            let sibling_hash = match level.get(sibling_index) {
                Some(sibling) => *sibling.hash(),
                // Self-paired: only possible for the last, even index.
                None => *level[index].hash(),
            };
            steps.push(ProofStep {
                sibling_hash,
                position,
            });
            index /= 2;
        }

        Ok(steps)
    }
}
