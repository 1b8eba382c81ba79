use std::ops::Range;

use crate::{
    hash::{hash, node_hash, CryptoHash},
    node::{MerkleNode, NodeIndex},
};

/// An immutable binary Merkle tree over an ordered batch.
///
/// All nodes are stored level by level in one arena: the leaves first (in
/// batch order), then each parent level, ending with the root. `levels[i]`
/// is the arena range of level `i`, so level 0 is the leaf level and the
/// last level holds only the root.
///
/// Retaining the levels lets proof generation reuse exactly the nodes that
/// were produced at build time instead of recomputing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    nodes: Vec<MerkleNode>,
    levels: Vec<Range<usize>>,
}

impl MerkleTree {
    /// Build a tree from ordered items, hashing each item's bytes as a leaf.
    ///
    /// An empty batch yields an empty tree with no root.
    pub fn build<T: AsRef<[u8]>>(items: &[T]) -> Self {
        Self::from_leaf_hashes(items.iter().map(|item| hash(item.as_ref())))
    }

    /// Build a tree from precomputed leaf digests, in order.
    pub fn from_leaf_hashes<I>(leaf_hashes: I) -> Self
    where
        I: IntoIterator<Item = CryptoHash>,
    {
        let mut nodes: Vec<MerkleNode> = leaf_hashes.into_iter().map(MerkleNode::leaf).collect();
        if nodes.is_empty() {
            return Self {
                nodes,
                levels: Vec::new(),
            };
        }

        let mut levels = vec![0..nodes.len()];
        let mut current = 0..nodes.len();

        while current.len() > 1 {
            let start = nodes.len();
            let mut left = current.start;
            while left < current.end {
                // Odd level: the last node is paired with itself.
                let right = if left + 1 < current.end { left + 1 } else { left };
                let parent = node_hash(nodes[left].hash(), nodes[right].hash());
                nodes.push(MerkleNode::inner(parent, left, right));
                left += 2;
            }
            current = start..nodes.len();
            levels.push(current.clone());
        }

        Self { nodes, levels }
    }

    /// Root digest, or `None` for an empty tree.
    ///
    /// For a single-item batch this is the item's leaf digest.
    pub fn root_hash(&self) -> Option<CryptoHash> {
        self.root().map(|node| *node.hash())
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<&MerkleNode> {
        self.levels
            .last()
            .and_then(|range| self.nodes.get(range.start))
    }

    /// Look up a node by arena handle.
    pub fn node(&self, index: NodeIndex) -> Option<&MerkleNode> {
        self.nodes.get(index)
    }

    /// Nodes of level `depth`, counting from the leaves (level 0).
    pub fn level(&self, depth: usize) -> Option<&[MerkleNode]> {
        self.levels
            .get(depth)
            .map(|range| &self.nodes[range.clone()])
    }

    /// Number of levels including the leaf level; 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    /// Number of leaves (the batch size the tree was built from).
    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, |range| range.len())
    }

    /// Whether the tree has no leaves.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Leaf digests in batch order.
    pub fn leaves(&self) -> impl ExactSizeIterator<Item = &CryptoHash> + '_ {
        self.level(0).unwrap_or_default().iter().map(MerkleNode::hash)
    }

    /// Index of the first (lowest-index) leaf whose digest equals
    /// `leaf_hash`.
    pub fn leaf_index(&self, leaf_hash: &CryptoHash) -> Option<usize> {
        self.leaves().position(|leaf| leaf == leaf_hash)
    }

    /// Whether any leaf has the digest `leaf_hash`.
    pub fn contains_leaf(&self, leaf_hash: &CryptoHash) -> bool {
        self.leaf_index(leaf_hash).is_some()
    }
}
