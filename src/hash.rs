//! Hash infrastructure for nodes in Merkle Tree.

use std::hash::Hasher;
use std::io::{self, Read};

/// Digest produced by an [`Algorithm`]. Its length is fixed per algorithm.
pub type Digest = Vec<u8>;

/// Size of the buffer used by [`Algorithm::digest_stream`].
pub const STREAM_CHUNK_SIZE: usize = 8 * 1024;

/// Hashing algorithm type.
///
/// Algorithm conforms standard [`Hasher`] trait and provides methods to return
/// full length hash and reset current state. The tree never depends on a
/// particular digest: anything able to absorb bytes and produce a fixed-length
/// output fits.
///
/// ## Implementing `Algorithm`
///
/// ```text
/// #[derive(Clone, Default)]
/// struct Sha3(sha3::Sha3_256);
///
/// impl Hasher for Sha3 {
///     fn write(&mut self, msg: &[u8]) { self.0.update(msg) }
///     fn finish(&self) -> u64 { 0 }
/// }
///
/// impl Algorithm for Sha3 {
///     fn hash(&mut self) -> Digest { self.0.clone().finalize().to_vec() }
///     fn reset(&mut self) { *self = Sha3::default() }
/// }
/// ```
///
/// [`Algorithm::node`] is used both to build interior nodes and to fold a
/// proof during verification, so overriding it (e.g. to prefix interior
/// nodes) keeps trees and proofs consistent with each other.
pub trait Algorithm: Hasher + Clone {
    /// Returns the hash value for the data stream written so far.
    fn hash(&mut self) -> Digest;

    /// Reset Hasher state.
    fn reset(&mut self);

    /// Returns the digest of the concatenation of `parts`, in order.
    fn digest(&mut self, parts: &[&[u8]]) -> Digest {
        self.reset();
        for part in parts {
            self.write(part);
        }
        self.hash()
    }

    /// Returns the digest of everything readable from `source`.
    ///
    /// Interrupted reads are retried, any other read error is returned as is.
    fn digest_stream<R: Read + ?Sized>(&mut self, source: &mut R) -> io::Result<Digest> {
        self.reset();
        let mut buf = [0u8; STREAM_CHUNK_SIZE];
        loop {
            match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => self.write(&buf[..n]),
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(self.hash())
    }

    /// Returns the hash value for MT interior node: `H(left || right)`.
    fn node(&mut self, left: &[u8], right: &[u8]) -> Digest {
        self.digest(&[left, right])
    }
}
