//! Append-only, in-memory store of block headers committed in batches.
//!
//! - Incoming headers are accumulated by an [`IngestionBatcher`]
//! - When `B` headers are pending, a [`MerkleTree`] is built over exactly
//!   those headers (in arrival order) and handed to a [`BatchSink`]
//! - The [`MerkleStore`] appends the tree and indexes every header of the
//!   batch by hash and by block number in one step
//!
//! Headers that have not yet completed a batch are invisible to queries.
//! Nothing is persisted; the store lives as long as the process.

mod batcher;
mod error;
mod header;
mod shared;
mod store;


pub use batcher::{BatchSink, IngestionBatcher};
pub use error::StoreError;
pub use header::{HeaderRecord, normalize_hash_key};
pub use headerproof_merkle::{CryptoHash, MerkleTree, Position, ProofStep};
pub use shared::SharedMerkleStore;
pub use store::{DEFAULT_RECENT_LIMIT, HeaderProof, MerkleStore};
