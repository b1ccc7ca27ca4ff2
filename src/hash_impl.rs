use std::fmt;
use std::hash::Hasher;
use std::str::FromStr;

use ring::digest;

use crate::error::Error;
use crate::hash::{Algorithm, Digest};

/// [`Algorithm`] backed by the `ring` SHA-2 family.
///
/// `ring` contexts are consumed on finalization, so [`Algorithm::hash`]
/// finalizes a clone and leaves the running state untouched.
#[derive(Clone)]
pub struct RingAlgorithm {
    ctx: digest::Context,
    alg: &'static digest::Algorithm,
    name: &'static str,
}

impl RingAlgorithm {
    fn with(alg: &'static digest::Algorithm, name: &'static str) -> RingAlgorithm {
        RingAlgorithm {
            ctx: digest::Context::new(alg),
            alg,
            name,
        }
    }

    /// SHA-256, the default.
    pub fn sha256() -> RingAlgorithm {
        Self::with(&digest::SHA256, "sha256")
    }

    /// SHA-384.
    pub fn sha384() -> RingAlgorithm {
        Self::with(&digest::SHA384, "sha384")
    }

    /// SHA-512.
    pub fn sha512() -> RingAlgorithm {
        Self::with(&digest::SHA512, "sha512")
    }

    /// SHA-512/256.
    pub fn sha512_256() -> RingAlgorithm {
        Self::with(&digest::SHA512_256, "sha512_256")
    }

    /// Canonical name of the algorithm.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Length of produced digests, in bytes.
    pub fn output_len(&self) -> usize {
        self.alg.output_len()
    }
}

impl Default for RingAlgorithm {
    fn default() -> RingAlgorithm {
        RingAlgorithm::sha256()
    }
}

impl fmt::Debug for RingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingAlgorithm")
            .field("name", &self.name)
            .finish()
    }
}

impl FromStr for RingAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(RingAlgorithm::sha256()),
            "sha384" => Ok(RingAlgorithm::sha384()),
            "sha512" => Ok(RingAlgorithm::sha512()),
            "sha512_256" | "sha512/256" => Ok(RingAlgorithm::sha512_256()),
            _ => Err(Error::UnsupportedAlgorithm(s.to_owned())),
        }
    }
}

impl Hasher for RingAlgorithm {
    #[inline]
    fn write(&mut self, msg: &[u8]) {
        self.ctx.update(msg)
    }

    // Not used by the tree, digests are read through `Algorithm::hash`.
    #[inline]
    fn finish(&self) -> u64 {
        0
    }
}

impl Algorithm for RingAlgorithm {
    #[inline]
    fn hash(&mut self) -> Digest {
        self.ctx.clone().finish().as_ref().to_vec()
    }

    #[inline]
    fn reset(&mut self) {
        self.ctx = digest::Context::new(self.alg);
    }
}
