use thiserror::Error;

/// Errors from Merkle tree operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MerkleTreeError {
    /// No leaf of the tree has the requested digest.
    #[error("leaf {0} not found in tree")]
    LeafNotFound(String),
    /// The tree was built from an empty batch.
    #[error("tree has no leaves")]
    EmptyTree,
}
