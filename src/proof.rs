use std::slice;

use crate::error::{Error, Result};
use crate::hash::{Algorithm, Digest};

/// Side on which a proof sibling sits relative to the node being folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Position {
    /// Sibling is the left child: fold as `H(sibling || current)`.
    Left = 0,
    /// Sibling is the right child: fold as `H(current || sibling)`.
    Right = 1,
}

impl From<Position> for u8 {
    fn from(p: Position) -> u8 {
        match p {
            Position::Left => 0,
            Position::Right => 1,
        }
    }
}

impl TryFrom<u8> for Position {
    type Error = Error;

    fn try_from(v: u8) -> Result<Position> {
        match v {
            0 => Ok(Position::Left),
            1 => Ok(Position::Right),
            _ => Err(Error::InvalidPosition(v)),
        }
    }
}

/// Merkle tree inclusion proof for a leaf digest.
///
/// Lemma layout, read from the leaf up to (excluding) the root:
///
/// ```text
/// [ sibling(leaf) sibling(parent) ... sibling(child of root) ]
/// [ position      position        ... position               ]
/// ```
///
/// A proof is a snapshot: it carries digests only and stays valid for the
/// root it was generated against, whatever happens to the tree afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Proof {
    lemma: Vec<Digest>,
    path: Vec<Position>,
}

impl Proof {
    /// Creates new MT inclusion proof.
    pub fn new(lemma: Vec<Digest>, path: Vec<Position>) -> Result<Proof> {
        if lemma.len() != path.len() {
            return Err(Error::ProofLengthMismatch {
                lemma: lemma.len(),
                path: path.len(),
            });
        }
        Ok(Proof { lemma, path })
    }

    /// Sibling digests, leaf level first.
    pub fn lemma(&self) -> &[Digest] {
        &self.lemma
    }

    /// Sibling positions, leaf level first.
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Number of levels covered by the proof.
    pub fn len(&self) -> usize {
        self.lemma.len()
    }

    /// Returns `true` for the proof of a single-leaf tree.
    pub fn is_empty(&self) -> bool {
        self.lemma.is_empty()
    }

    /// Iterates `(sibling, position)` pairs from the leaf upwards.
    pub fn iter(&self) -> ProofIter<'_> {
        ProofIter {
            inner: self.lemma.iter().zip(self.path.iter()),
        }
    }

    /// Splits the proof into sibling digests and positions.
    pub fn into_parts(self) -> (Vec<Digest>, Vec<Position>) {
        (self.lemma, self.path)
    }

    /// Verifies MT inclusion proof of `leaf` against `root`.
    pub fn validate<A: Algorithm>(&self, root: &[u8], leaf: &[u8], alg: A) -> bool {
        verify_proof(root, leaf, &self.lemma, &self.path, alg)
    }
}

impl<'a> IntoIterator for &'a Proof {
    type Item = (&'a [u8], Position);
    type IntoIter = ProofIter<'a>;

    fn into_iter(self) -> ProofIter<'a> {
        self.iter()
    }
}

/// Iterator over the steps of a [`Proof`].
#[derive(Debug, Clone)]
pub struct ProofIter<'a> {
    inner: std::iter::Zip<slice::Iter<'a, Digest>, slice::Iter<'a, Position>>,
}

impl<'a> Iterator for ProofIter<'a> {
    type Item = (&'a [u8], Position);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(h, p)| (h.as_slice(), *p))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Verifies that `leaf` belongs to the tree with root `root`.
///
/// Stateless: only the root digest, the claimed leaf digest and the proof
/// steps are needed. Folds from the leaf up, hashing the sibling on the left
/// for [`Position::Left`] and on the right for [`Position::Right`], and
/// compares the result with `root`.
///
/// Total on any input: a `lemma` and `path` of different lengths simply fail
/// verification.
pub fn verify_proof<A, H>(
    root: &[u8],
    leaf: &[u8],
    lemma: &[H],
    path: &[Position],
    mut alg: A,
) -> bool
where
    A: Algorithm,
    H: AsRef<[u8]>,
{
    if lemma.len() != path.len() {
        return false;
    }

    let mut h = leaf.to_vec();
    for (sibling, side) in lemma.iter().zip(path) {
        h = match side {
            Position::Left => alg.node(sibling.as_ref(), &h),
            Position::Right => alg.node(&h, sibling.as_ref()),
        };
    }

    h == root
}
