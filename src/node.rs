use std::fmt;

use crate::hash::Digest;

/// Position of a node inside the arena of its [`MerkleTree`].
///
/// [`MerkleTree`]: crate::merkle::MerkleTree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the arena index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Tree vertex.
///
/// A leaf carries a digest supplied from outside and has no children. An
/// interior node has exactly two children and carries `H(left || right)`.
/// For the duplicated last node of an odd level both children are the same
/// id.
///
/// `parent` only serves upward traversal, ownership of every node stays with
/// the tree arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) hash: Digest,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Option<(NodeId, NodeId)>,
}

impl Node {
    pub(crate) fn leaf(hash: Digest) -> Node {
        Node {
            hash,
            parent: None,
            children: None,
        }
    }

    pub(crate) fn interior(hash: Digest, left: NodeId, right: NodeId) -> Node {
        Node {
            hash,
            parent: None,
            children: Some((left, right)),
        }
    }

    /// Digest represented by this node.
    #[inline]
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Node one level up, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Left child, `None` for leaves.
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.children.map(|(l, _)| l)
    }

    /// Right child, `None` for leaves.
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.children.map(|(_, r)| r)
    }

    /// Returns `true` if the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Returns `true` if the node has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Lowercase hex encoding of the digest.
    pub fn hex(&self) -> String {
        hex::encode(&self.hash)
    }
}

impl fmt::LowerHex for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        for b in &self.hash {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}
