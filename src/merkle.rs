use std::io::Read;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::hash::{Algorithm, Digest};
use crate::node::{Node, NodeId};
use crate::proof::{Position, Proof};

/// Merkle Tree.
///
/// All leafs and nodes are stored in a linear arena (vec), leafs first in
/// input order, then each level of interior nodes, the root last. Nodes refer
/// to each other by [`NodeId`].
///
/// A merkle tree is a tree in which every non-leaf node is the hash of its
/// children nodes. A diagram depicting how it works:
///
/// ```text
///         root = h1234 = h(h12 + h34)
///        /                           \
///  h12 = h(h1 + h2)            h34 = h(h3 + h4)
///   /            \              /            \
/// h1 = h(tx1)  h2 = h(tx2)    h3 = h(tx3)  h4 = h(tx4)
/// ```
///
/// In memory layout:
///
/// ```text
///     [h1 h2 h3 h4 h12 h34 root]
/// ```
///
/// The number of inputs is not always a power of two. When a level has an
/// odd number of nodes, the last one is paired with itself: its parent has
/// the same node as left and right child and carries `h(last + last)`.
///
/// The tree is read-only once built, except for [`MerkleTree::force_leaf_digest`].
#[derive(Debug, Clone)]
pub struct MerkleTree<A: Algorithm> {
    nodes: Vec<Node>,
    leafs: usize,
    height: usize,
    root: Option<NodeId>,

    // Root digest as computed at build time, compared against by `verify`.
    root_hash: Option<Digest>,

    alg: A,
}

impl<A: Algorithm + Default> MerkleTree<A> {
    /// Creates new merkle tree from a sequence of leaf digests, hashing with
    /// the default instance of `A`.
    pub fn new<D: Into<Digest>, I: IntoIterator<Item = D>>(digests: I) -> MerkleTree<A> {
        Self::from_digests(digests, A::default())
    }
}

impl<A: Algorithm> MerkleTree<A> {
    /// Creates new merkle tree from a sequence of precomputed leaf digests.
    ///
    /// Digests are used as leaves verbatim. An empty sequence gives an empty
    /// tree with no root.
    pub fn from_digests<D: Into<Digest>, I: IntoIterator<Item = D>>(
        digests: I,
        alg: A,
    ) -> MerkleTree<A> {
        let nodes: Vec<Node> = digests
            .into_iter()
            .map(|d| Node::leaf(d.into()))
            .collect();
        Self::build(nodes, alg)
    }

    /// Creates new merkle tree from a sequence of hashable sources, each
    /// digested with [`Algorithm::digest_stream`].
    ///
    /// Stops at the first source that fails to read, no tree is returned in
    /// that case.
    pub fn from_sources<R: Read, I: IntoIterator<Item = R>>(
        sources: I,
        mut alg: A,
    ) -> Result<MerkleTree<A>> {
        let mut nodes = Vec::new();
        for (index, mut source) in sources.into_iter().enumerate() {
            let hash = alg
                .digest_stream(&mut source)
                .map_err(|source| Error::SourceRead { index, source })?;
            nodes.push(Node::leaf(hash));
        }
        Ok(Self::build(nodes, alg))
    }

    fn build(mut nodes: Vec<Node>, mut alg: A) -> MerkleTree<A> {
        let leafs = nodes.len();
        let (root, height) = build_levels(&mut nodes, &mut alg);
        let root_hash = root.map(|id| nodes[id.0].hash.clone());

        match &root_hash {
            Some(h) => debug!(
                "built merkle tree: leafs {}, height {}, nodes {}, root {}",
                leafs,
                height,
                nodes.len(),
                hex::encode(h)
            ),
            None => debug!("built empty merkle tree"),
        }

        MerkleTree {
            nodes,
            leafs,
            height,
            root,
            root_hash,
            alg,
        }
    }

    /// Generate merkle tree inclusion proof for the leaf carrying `leaf`.
    ///
    /// Leafs are scanned in order and the first match wins, so for duplicated
    /// digests the proof is the one of the leftmost copy.
    pub fn gen_proof(&self, leaf: &[u8]) -> Result<Proof> {
        let index = self
            .leaves()
            .iter()
            .position(|n| n.hash == leaf)
            .ok_or_else(|| Error::NotFound(hex::encode(leaf)))?;
        self.gen_proof_at(index)
    }

    /// Generate merkle tree inclusion proof for leaf `i`.
    pub fn gen_proof_at(&self, i: usize) -> Result<Proof> {
        if i >= self.leafs {
            return Err(Error::LeafOutOfBounds {
                index: i,
                leafs: self.leafs,
            });
        }

        let levels = self.height.saturating_sub(1);
        let mut lemma: Vec<Digest> = Vec::with_capacity(levels);
        let mut path: Vec<Position> = Vec::with_capacity(levels);

        let mut current = NodeId(i);
        while let Some(parent) = self.nodes[current.0].parent {
            // parents are always interior nodes
            let Some((left, right)) = self.nodes[parent.0].children else {
                break;
            };

            // The side is decided by digest, left first: a node equal to its
            // left sibling is taken as the left child.
            if self.nodes[left.0].hash == self.nodes[current.0].hash {
                lemma.push(self.nodes[right.0].hash.clone());
                path.push(Position::Right);
            } else {
                lemma.push(self.nodes[left.0].hash.clone());
                path.push(Position::Left);
            }
            trace!(
                "proof for leaf {}: level {} sibling {:?}",
                i,
                lemma.len(),
                path[path.len() - 1]
            );

            current = parent;
        }

        Proof::new(lemma, path)
    }

    /// Rebuilds the tree from the current leaf digests and compares the
    /// resulting root with the one computed when the tree was built.
    ///
    /// Returns `false` for an empty tree, or when any leaf was overwritten with
    /// a different digest through [`MerkleTree::force_leaf_digest`]. The tree
    /// itself is not modified.
    pub fn verify(&self) -> bool {
        let expected = match (&self.root, &self.root_hash) {
            (Some(_), Some(h)) if self.leafs > 0 => h,
            _ => return false,
        };

        let mut scratch: Vec<Node> = self
            .leaves()
            .iter()
            .map(|n| Node::leaf(n.hash.clone()))
            .collect();
        let mut alg = self.alg.clone();
        let ok = match build_levels(&mut scratch, &mut alg) {
            (Some(id), _) => scratch[id.0].hash == *expected,
            (None, _) => false,
        };

        if !ok {
            debug!(
                "merkle tree integrity check failed: expected root {}",
                hex::encode(expected)
            );
        }
        ok
    }

    /// Overwrites the digest of leaf `i` without recomputing its ancestors.
    ///
    /// Meant to simulate tampering: afterwards [`MerkleTree::verify`] reports
    /// the mismatch, while proofs generated earlier are unaffected.
    pub fn force_leaf_digest<D: Into<Digest>>(&mut self, i: usize, digest: D) -> Result<()> {
        if i >= self.leafs {
            return Err(Error::LeafOutOfBounds {
                index: i,
                leafs: self.leafs,
            });
        }
        self.nodes[i].hash = digest.into();
        Ok(())
    }

    /// Returns root node, `None` for an empty tree.
    ///
    /// For a single-leaf tree the root is the leaf itself.
    #[inline]
    pub fn root(&self) -> Option<&Node> {
        self.root.map(|id| &self.nodes[id.0])
    }

    /// Returns merkle root digest as computed at build time.
    #[inline]
    pub fn root_hash(&self) -> Option<&[u8]> {
        self.root_hash.as_deref()
    }

    /// Returns the leaf nodes, in input order.
    #[inline]
    pub fn leaves(&self) -> &[Node] {
        &self.nodes[..self.leafs]
    }

    /// Returns leaf `i`.
    #[inline]
    pub fn leaf(&self, i: usize) -> Option<&Node> {
        self.leaves().get(i)
    }

    /// Returns the node stored at `id`.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Returns original number of elements the tree was built upon.
    #[inline]
    pub fn leafs(&self) -> usize {
        self.leafs
    }

    /// Returns number of distinct nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree was built from no leafs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.leafs == 0
    }

    /// Returns height of the tree: number of levels, root included.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the hashing algorithm of the tree.
    #[inline]
    pub fn algorithm(&self) -> &A {
        &self.alg
    }
}

impl<A: Algorithm + Default, D: Into<Digest>> FromIterator<D> for MerkleTree<A> {
    /// Creates new merkle tree from an iterator over leaf digests.
    fn from_iter<I: IntoIterator<Item = D>>(into: I) -> Self {
        Self::new(into)
    }
}

/// Builds the interior levels on top of the leafs stored in `nodes` and
/// returns the root id together with the number of levels.
///
/// Adjacent nodes are paired `(0, 1), (2, 3), ...` and each pair gets a new
/// parent `alg.node(left, right)`. A level with an odd number of nodes gets
/// its last node duplicated first. Repeats until a single node is left.
fn build_levels<A: Algorithm>(nodes: &mut Vec<Node>, alg: &mut A) -> (Option<NodeId>, usize) {
    if nodes.is_empty() {
        return (None, 0);
    }

    let mut level: Vec<NodeId> = (0..nodes.len()).map(NodeId).collect();
    let mut height = 1;

    while level.len() > 1 {
        if level.len() & 1 == 1 {
            // Odd number of nodes, duplicate last.
            let last = level[level.len() - 1];
            level.push(last);
        }

        let mut parents = Vec::with_capacity(level.len() / 2);
        for pair in level.chunks_exact(2) {
            let (l, r) = (pair[0], pair[1]);
            let hash = alg.node(&nodes[l.0].hash, &nodes[r.0].hash);

            let id = NodeId(nodes.len());
            nodes.push(Node::interior(hash, l, r));
            nodes[l.0].parent = Some(id);
            nodes[r.0].parent = Some(id);
            parents.push(id);
        }

        level = parents;
        height += 1;
    }

    (level.first().copied(), height)
}
