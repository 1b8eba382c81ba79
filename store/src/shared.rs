use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use headerproof_merkle::MerkleTree;

use crate::{BatchSink, HeaderRecord, MerkleStore, StoreError};

/// A [`MerkleStore`] shared between the single ingestion writer and any
/// number of concurrent readers.
///
/// A whole batch (tree append plus both index updates) is applied under one
/// write guard, so readers see either none or all of it.
///
/// The lock is a blocking `std` lock: a guard must never be held across an
/// `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedMerkleStore {
    inner: Arc<RwLock<MerkleStore>>,
}

impl SharedMerkleStore {
    /// Wrap a store for sharing.
    pub fn new(store: MerkleStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Acquire a read guard. Drop it before the next `.await`.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, MerkleStore>, StoreError> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MerkleStore>, StoreError> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl BatchSink for SharedMerkleStore {
    fn commit_batch(
        &self,
        tree: MerkleTree,
        headers: Vec<HeaderRecord>,
    ) -> Result<(), StoreError> {
        self.write()?.add_tree(tree, headers)
    }
}
