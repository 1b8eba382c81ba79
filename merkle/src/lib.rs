//! Binary Merkle tree over an ordered batch of items, using SHA-256.
//!
//! Leaves are `sha256(item)` in batch order. Each level is reduced to its
//! parent level by pairing adjacent nodes (0&1, 2&3, ...):
//!
//! `parent = sha256(left || right)`
//!
//! When a level has an odd number of nodes the last node is paired with
//! itself. The same rule is used when building and when walking the retained
//! levels to produce inclusion proofs, so the two can never disagree.
//!
//! Trees are immutable once built. Nodes live in a single arena owned by the
//! tree and refer to their children by index; there are no parent links.

#![warn(missing_docs)]

mod error;
pub mod hash;
mod node;
pub(crate) mod proof;
pub(crate) mod tree;
mod verify;


pub use error::MerkleTreeError;
pub use hash::{CryptoHash, HASH_LENGTH};
pub use node::{MerkleNode, NodeIndex};
pub use proof::{Position, ProofStep};
pub use tree::MerkleTree;
pub use verify::{compute_root, verify_proof};
