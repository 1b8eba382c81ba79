//! Fixed-size batching of incoming headers.

use std::mem;

use headerproof_merkle::{CryptoHash, MerkleTree};
use tracing::{debug, info};

use crate::{HeaderRecord, StoreError};


/// Destination for completed batches.
///
/// Uses `&self` (interior mutability) so a sink can be a shared handle to a
/// store that readers query concurrently.
pub trait BatchSink {
    /// Commit a tree together with the exact ordered batch it was built
    /// from. Must be applied atomically with respect to readers.
    fn commit_batch(&self, tree: MerkleTree, headers: Vec<HeaderRecord>)
        -> Result<(), StoreError>;
}

/// Accumulates headers and commits one tree per `batch_size` headers.
///
/// Headers below the threshold are held here only; they are not indexed and
/// no partial tree is ever built for them.
#[derive(Debug)]
pub struct IngestionBatcher<S> {
    batch_size: usize,
    pending: Vec<HeaderRecord>,
    pending_leaves: Vec<CryptoHash>,
    sink: S,
}

impl<S: BatchSink> IngestionBatcher<S> {
    /// Create a batcher committing to `sink` every `batch_size` headers.
    ///
    /// `batch_size` must be at least 1.
    pub fn new(batch_size: usize, sink: S) -> Result<Self, StoreError> {
        if batch_size == 0 {
            return Err(StoreError::InvalidInput(
                "batch size must be at least 1".into(),
            ));
        }
        Ok(Self {
            batch_size,
            pending: Vec::with_capacity(batch_size),
            pending_leaves: Vec::with_capacity(batch_size),
            sink,
        })
    }

    /// Configured batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Headers waiting for the current batch to fill.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// The sink batches are committed to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Add one header.
    ///
    /// Returns the new tree's root hash when this header completed a batch.
    /// A header whose leaf digest cannot be derived is rejected without
    /// affecting the pending batch. If the sink fails, the batch is dropped
    /// and the error returned; the batcher is empty again either way.
    pub fn ingest(&mut self, header: HeaderRecord) -> Result<Option<CryptoHash>, StoreError> {
        let leaf_hash = header.leaf_hash()?;
        debug!(
            number = header.number,
            hash = %header.hash_key(),
            pending = self.pending.len() + 1,
            "header received"
        );
        self.pending.push(header);
        self.pending_leaves.push(leaf_hash);

        if self.pending.len() < self.batch_size {
            return Ok(None);
        }
        self.flush().map(Some)
    }

    fn flush(&mut self) -> Result<CryptoHash, StoreError> {
        let headers = mem::replace(&mut self.pending, Vec::with_capacity(self.batch_size));
        let leaves = mem::replace(
            &mut self.pending_leaves,
            Vec::with_capacity(self.batch_size),
        );

        let tree = MerkleTree::from_leaf_hashes(leaves);
        let root = tree
            .root_hash()
            .ok_or_else(|| StoreError::InvalidInput("cannot commit an empty batch".into()))?;
        let first = headers.first().map(|h| h.number);
        let last = headers.last().map(|h| h.number);

        self.sink.commit_batch(tree, headers)?;
        info!(
            root = %hex::encode(root),
            batch_size = self.batch_size,
            first_block = ?first,
            last_block = ?last,
            "stored merkle tree"
        );
        Ok(root)
    }
}
