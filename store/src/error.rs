use headerproof_merkle::MerkleTreeError;
use thiserror::Error;

/// Errors from header store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("Header not found for hash {0}")]
    HeaderNotFound(String),
    #[error("Merkle tree not found for header with hash {0}")]
    TreeNotFound(String),
    #[error("batch mismatch: tree has {tree_leaves} leaves but {headers} headers were given")]
    BatchMismatch { tree_leaves: usize, headers: usize },
    #[error("encoding error: {0}")]
    Encoding(String),
    #[error("store lock poisoned")]
    LockPoisoned,
    #[error("proof error: {0}")]
    Proof(#[from] MerkleTreeError),
}
