#![cfg(test)]

use crate::hash::{Algorithm, Digest};
use crate::merkle::MerkleTree;
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;

/// Custom merkle hash util test
#[derive(Debug, Clone, Default)]
struct CMH(DefaultHasher);

impl CMH {
    pub fn new() -> CMH {
        CMH(DefaultHasher::new())
    }
}

impl Hasher for CMH {
    fn write(&mut self, msg: &[u8]) {
        self.0.write(msg)
    }

    fn finish(&self) -> u64 {
        self.0.finish()
    }
}

impl Algorithm for CMH {
    fn hash(&mut self) -> Digest {
        self.finish().to_le_bytes().to_vec()
    }

    fn reset(&mut self) {
        *self = CMH::default()
    }

    fn node(&mut self, left: &[u8], right: &[u8]) -> Digest {
        // e.g. custom prefix
        self.reset();
        self.write(&[1u8]);
        self.write(left);
        self.write(&[2u8]);
        self.write(right);
        self.hash()
    }
}

/// Same stream hash as `CMH`, without interior node prefixes.
#[derive(Debug, Clone, Default)]
struct Plain(DefaultHasher);

impl Hasher for Plain {
    fn write(&mut self, msg: &[u8]) {
        self.0.write(msg)
    }

    fn finish(&self) -> u64 {
        self.0.finish()
    }
}

impl Algorithm for Plain {
    fn hash(&mut self) -> Digest {
        self.finish().to_le_bytes().to_vec()
    }

    fn reset(&mut self) {
        *self = Plain::default()
    }
}

fn leafs(n: u64) -> Vec<Digest> {
    let mut a = CMH::new();
    (0..n).map(|x| a.digest(&[&x.to_le_bytes()])).collect()
}

#[test]
fn test_custom_merkle_hasher() {
    let data = leafs(5);
    let mt: MerkleTree<CMH> = MerkleTree::new(data.clone());
    let root = mt.root_hash().unwrap();
    assert_eq!(root.len(), 8);

    let mut a = CMH::new();
    let h01 = a.node(&data[0], &data[1]);
    let h23 = a.node(&data[2], &data[3]);
    let h44 = a.node(&data[4], &data[4]);
    let h0123 = a.node(&h01, &h23);
    let h4444 = a.node(&h44, &h44);
    assert_eq!(root, a.node(&h0123, &h4444).as_slice());

    for leaf in data.iter() {
        let p = mt.gen_proof(leaf).unwrap();
        assert!(p.validate(root, leaf, CMH::new()));
        // Verification has to use the same node hashing as construction.
        assert!(!p.validate(root, leaf, Plain::default()));
    }
}

#[test]
fn test_custom_merkle_hasher_differs_from_plain() {
    let data = leafs(4);
    let custom: MerkleTree<CMH> = MerkleTree::new(data.clone());
    let plain: MerkleTree<Plain> = MerkleTree::new(data);
    assert_ne!(custom.root_hash(), plain.root_hash());
    assert!(custom.verify());
    assert!(plain.verify());
}
