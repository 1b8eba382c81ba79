use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use headerproof_merkle::{CryptoHash, MerkleTree, ProofStep, verify_proof};

use crate::{HeaderRecord, StoreError, normalize_hash_key};

/// Default bound for [`MerkleStore::get_recent_headers`].
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// An inclusion proof for one stored header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderProof {
    pub header: HeaderRecord,
    pub leaf_hash: CryptoHash,
    pub proof: Vec<ProofStep>,
    pub root_hash: CryptoHash,
}

impl HeaderProof {
    /// Check the proof against its own root.
    pub fn verify(&self) -> bool {
        verify_proof(&self.leaf_hash, &self.proof, &self.root_hash)
    }
}

/// Trees in creation order plus two header indices.
///
/// Records are shared between both indices and the recent list, so each
/// header is held once regardless of how many keys point at it. Later
/// headers overwrite earlier index entries at the same key.
#[derive(Debug)]
pub struct MerkleStore {
    trees: Vec<MerkleTree>,
    by_hash: HashMap<String, Arc<HeaderRecord>>,
    by_number: HashMap<String, Arc<HeaderRecord>>,
    recent: VecDeque<Arc<HeaderRecord>>,
    recent_limit: usize,
}

impl Default for MerkleStore {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}

impl MerkleStore {
    /// Create an empty store keeping at most `recent_limit` recent headers.
    pub fn new(recent_limit: usize) -> Self {
        Self {
            trees: Vec::new(),
            by_hash: HashMap::new(),
            by_number: HashMap::new(),
            recent: VecDeque::with_capacity(recent_limit),
            recent_limit,
        }
    }

    /// Append `tree` and index the exact ordered batch it was built from.
    ///
    /// Fails without touching the store if the batch length does not match
    /// the tree's leaf count.
    pub fn add_tree(
        &mut self,
        tree: MerkleTree,
        headers: Vec<HeaderRecord>,
    ) -> Result<(), StoreError> {
        if tree.leaf_count() != headers.len() {
            return Err(StoreError::BatchMismatch {
                tree_leaves: tree.leaf_count(),
                headers: headers.len(),
            });
        }

        self.trees.push(tree);
        for header in headers {
            let header = Arc::new(header);
            self.by_hash.insert(header.hash_key(), Arc::clone(&header));
            self.by_number
                .insert(header.number_key(), Arc::clone(&header));
            self.push_recent(header);
        }
        Ok(())
    }

    fn push_recent(&mut self, header: Arc<HeaderRecord>) {
        if self.recent_limit == 0 {
            return;
        }
        if self.recent.len() == self.recent_limit {
            self.recent.pop_back();
        }
        self.recent.push_front(header);
    }

    /// Look up a header by hash; accepts an optional `0x` prefix and any
    /// case.
    pub fn get_header_by_hash(&self, hash: &str) -> Option<&HeaderRecord> {
        self.by_hash
            .get(&normalize_hash_key(hash))
            .map(|header| header.as_ref())
    }

    /// Look up a header by its decimal block number.
    pub fn get_header_by_block_number(&self, number: &str) -> Option<&HeaderRecord> {
        self.by_number.get(number).map(|header| header.as_ref())
    }

    /// All trees in creation order.
    pub fn get_all_trees(&self) -> &[MerkleTree] {
        &self.trees
    }

    /// Most recently indexed headers, newest first.
    pub fn get_recent_headers(&self) -> Vec<&HeaderRecord> {
        self.recent.iter().map(|header| header.as_ref()).collect()
    }

    /// Number of trees (completed batches).
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Number of distinct hash keys indexed.
    pub fn indexed_headers(&self) -> usize {
        self.by_hash.len()
    }

    /// First tree, in creation order, containing a leaf with this digest.
    ///
    /// Linear in the number of trees times the batch size.
    pub fn find_tree_for_leaf(&self, leaf_hash: &CryptoHash) -> Option<&MerkleTree> {
        self.trees.iter().find(|tree| tree.contains_leaf(leaf_hash))
    }

    /// Produce an inclusion proof for the header indexed under `hash`.
    ///
    /// The leaf digest is recomputed from the stored record, then the trees
    /// are scanned for it.
    pub fn prove_header(&self, hash: &str) -> Result<HeaderProof, StoreError> {
        let header = self
            .get_header_by_hash(hash)
            .ok_or_else(|| StoreError::HeaderNotFound(hash.to_owned()))?;
        let leaf_hash = header.leaf_hash()?;
        let tree = self
            .find_tree_for_leaf(&leaf_hash)
            .ok_or_else(|| StoreError::TreeNotFound(hash.to_owned()))?;
        let root_hash = tree
            .root_hash()
            .ok_or_else(|| StoreError::TreeNotFound(hash.to_owned()))?;
        let proof = tree.generate_inclusion_proof(&leaf_hash)?;

        Ok(HeaderProof {
            header: header.clone(),
            leaf_hash,
            proof,
            root_hash,
        })
    }

    /// Prove the header indexed under `hash` and check the proof against
    /// the root of the tree that holds it.
    pub fn verify_header(&self, hash: &str) -> Result<bool, StoreError> {
        Ok(self.prove_header(hash)?.verify())
    }
}
