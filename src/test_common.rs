use crate::hash::{Algorithm, Digest};
use std::fmt;
use std::hash::Hasher;

pub const SIZE: usize = 0x10;

/// Toy 16 byte algorithm: xors the input stream over a 16 byte window.
///
/// Not order sensitive, only fit for shape and bookkeeping tests.
#[derive(Debug, Copy, Clone, Default)]
pub struct XOR128 {
    data: [u8; SIZE],
    i: usize,
}

impl XOR128 {
    pub fn new() -> XOR128 {
        XOR128 {
            data: [0; SIZE],
            i: 0,
        }
    }
}

impl Hasher for XOR128 {
    fn write(&mut self, bytes: &[u8]) {
        for x in bytes {
            self.data[self.i & (SIZE - 1)] ^= *x;
            self.i += 1;
        }
    }

    fn finish(&self) -> u64 {
        unimplemented!()
    }
}

impl Algorithm for XOR128 {
    #[inline]
    fn hash(&mut self) -> Digest {
        self.data.to_vec()
    }

    #[inline]
    fn reset(&mut self) {
        *self = XOR128::new();
    }
}

impl fmt::UpperHex for XOR128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        for b in &self.data {
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

/// Distinct 16 byte leaf digests `H(i * 93)`.
pub fn xor_leafs(leafs: usize) -> Vec<Digest> {
    let mut a = XOR128::new();
    (0..leafs)
        .map(|i| a.digest(&[&((i * 93) as u64).to_le_bytes()]))
        .collect()
}
