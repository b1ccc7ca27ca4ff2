//! Binary _Merkle Tree_ with inclusion proofs.
//!
//! A Merkle tree (MT) is built once over an ordered list of leaf digests.
//! Every interior node carries `H(left || right)`; a level with an odd
//! number of nodes pairs its last node with itself. The root digest
//! summarizes the whole leaf list, order included.
//!
//! Inclusion proofs are the sibling digests met on the way from a leaf to
//! the root, with the side of each sibling. A party holding only the root
//! digest checks a proof with [`verify_proof`], no tree needed.
//!
//! ```text
//!         root = h(h12 + h33)
//!        /                   \
//!  h12 = h(h1 + h2)     h33 = h(h3 + h3)
//!   /        \            /        \
//!  h1        h2          h3       (h3)
//! ```
//!
//! # Implementation choices
//!
//! Nodes live in an arena owned by the tree and point to each other by
//! index; the parent link is only used to walk up while generating proofs.
//!
//! Hashing is an [`Algorithm`]: a `std::hash::Hasher` which can also return
//! a full length digest and be reset. The tree does not hardwire any digest,
//! [`RingAlgorithm`] provides the SHA-2 family from `ring` (SHA-256 by
//! default).
//!
//! # Interface
//!
//! ```text
//! - MerkleTree::from_digests (digests, alg) -> tree
//! - MerkleTree::from_sources (readers, alg) -> Result<tree>
//! - tree.root_hash -> hash
//! - tree.gen_proof (leaf hash) -> Result<proof>
//! - verify_proof (root, leaf, lemma, path, alg) -> bool
//! - tree.verify -> bool
//! ```
//!
//! # Quick start
//!
//! ```
//! use mktree::{verify_proof, Algorithm, MerkleTree, RingAlgorithm};
//!
//! let mut a = RingAlgorithm::default();
//! let leafs: Vec<_> = ["a", "b", "c", "d"]
//!     .iter()
//!     .map(|x| a.digest(&[x.as_bytes()]))
//!     .collect();
//!
//! let t: MerkleTree<RingAlgorithm> = MerkleTree::new(leafs.clone());
//! let root = t.root_hash().unwrap();
//!
//! let proof = t.gen_proof(&leafs[0]).unwrap();
//! assert!(verify_proof(root, &leafs[0], proof.lemma(), proof.path(), RingAlgorithm::default()));
//! assert!(t.verify());
//! ```

#![deny(
    missing_docs,
    unused_qualifications,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]

/// Error type of the crate.
pub mod error;

/// Hash infrastructure for nodes in Merkle tree.
pub mod hash;

/// `ring` backed [`Algorithm`] implementations.
pub mod hash_impl;

/// Tree vertices.
pub mod node;

/// Merkle tree construction, proof generation and integrity check.
pub mod merkle;

/// Merkle tree inclusion proof and stateless verification.
pub mod proof;

pub use crate::error::{Error, Result};
pub use crate::hash::{Algorithm, Digest};
pub use crate::hash_impl::RingAlgorithm;
pub use crate::merkle::MerkleTree;
pub use crate::node::{Node, NodeId};
pub use crate::proof::{verify_proof, Position, Proof};

#[cfg(test)]
mod test_common;


/// Tests for Merkle Hasher Customization
#[cfg(test)]
mod test_cmh;
