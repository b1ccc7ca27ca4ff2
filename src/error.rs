use std::io;

use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a tree or extracting proofs from it.
///
/// Proof verification never produces an error: a bad proof, a wrong root
/// or a tampered leaf is a plain `false`.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a hashable source failed. Construction is aborted and no
    /// partial tree is returned.
    #[error("failed to read hashable source #{index}")]
    SourceRead {
        /// Position of the failing source in the input sequence.
        index: usize,
        /// Underlying read failure.
        #[source]
        source: io::Error,
    },

    /// No leaf carries the requested digest (hex encoded).
    #[error("hash {0} does not belong to the tree")]
    NotFound(String),

    /// Leaf index past the end of the leaf list.
    #[error("{index} is out of bounds (max: {leafs})")]
    LeafOutOfBounds {
        /// Requested leaf index.
        index: usize,
        /// Number of leaves in the tree.
        leafs: usize,
    },

    /// Sibling digests and positions of a proof differ in length.
    #[error("invalid proof: {lemma} sibling hashes but {path} positions")]
    ProofLengthMismatch {
        /// Number of sibling digests.
        lemma: usize,
        /// Number of positions.
        path: usize,
    },

    /// Proof position other than 0 (left) or 1 (right).
    #[error("invalid proof position {0}, expected 0 (left) or 1 (right)")]
    InvalidPosition(u8),

    /// Hash algorithm name not recognised.
    #[error("unsupported hash algorithm {0:?}")]
    UnsupportedAlgorithm(String),
}
