use crate::hash::CryptoHash;

/// Handle of a node inside a [`MerkleTree`](crate::MerkleTree) arena.
pub type NodeIndex = usize;

/// A node of the tree: a digest plus either zero or two children.
///
/// Children are arena handles owned by the enclosing tree. A self-paired
/// node (odd level, last index) has both handles pointing at the same child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MerkleNode {
    hash: CryptoHash,
    children: Option<(NodeIndex, NodeIndex)>,
}

impl MerkleNode {
    pub(crate) fn leaf(hash: CryptoHash) -> Self {
        Self {
            hash,
            children: None,
        }
    }

    pub(crate) fn inner(hash: CryptoHash, left: NodeIndex, right: NodeIndex) -> Self {
        Self {
            hash,
            children: Some((left, right)),
        }
    }

    /// Digest of this node.
    pub fn hash(&self) -> &CryptoHash {
        &self.hash
    }

    /// `(left, right)` child handles, or `None` for a leaf.
    pub fn children(&self) -> Option<(NodeIndex, NodeIndex)> {
        self.children
    }

    /// Whether this node is on the leaf level.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}
