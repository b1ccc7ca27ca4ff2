use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

use mktree::{Algorithm, Error, MerkleTree, RingAlgorithm};

/// Reader yielding `ok` bytes, then failing.
struct FailingReader {
    ok: usize,
    kind: io::ErrorKind,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.ok == 0 {
            return Err(io::Error::new(self.kind, "source went away"));
        }
        let n = self.ok.min(buf.len());
        buf[..n].iter_mut().for_each(|b| *b = 0xaa);
        self.ok -= n;
        Ok(n)
    }
}

/// Reader interrupted once before each chunk.
struct InterruptedReader<'a> {
    data: &'a [u8],
    interrupt: bool,
}

impl<'a> Read for InterruptedReader<'a> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        self.data.read(buf)
    }
}

fn transactions() -> Vec<String> {
    vec![
        "{mike bob 100}".to_owned(),
        "{bob douglas 250}".to_owned(),
        "{alice john 100}".to_owned(),
        "{vitalik elon 10000}".to_owned(),
    ]
}

#[test]
fn test_sources_match_digests() {
    let txs = transactions();
    let mut a = RingAlgorithm::default();
    let digests: Vec<_> = txs.iter().map(|t| a.digest(&[t.as_bytes()])).collect();

    let from_sources =
        MerkleTree::from_sources(txs.iter().map(|t| t.as_bytes()), RingAlgorithm::default())
            .unwrap();
    let from_digests = MerkleTree::from_digests(digests.clone(), RingAlgorithm::default());

    assert_eq!(from_sources.root_hash(), from_digests.root_hash());
    for (i, d) in digests.iter().enumerate() {
        assert_eq!(from_sources.leaf(i).unwrap().hash(), d.as_slice());
    }
    assert!(from_sources.verify());
}

#[test]
fn test_sources_from_files() {
    let payloads: Vec<Vec<u8>> = vec![
        vec![],
        b"short".to_vec(),
        (0..50_000u32).map(|i| (i % 251) as u8).collect(),
    ];

    let mut files = Vec::new();
    for p in payloads.iter() {
        let mut f: File = tempfile::tempfile().unwrap();
        f.write_all(p).unwrap();
        f.seek(SeekFrom::Start(0)).unwrap();
        files.push(f);
    }

    let t = MerkleTree::from_sources(files, RingAlgorithm::default()).unwrap();
    let expected = MerkleTree::from_sources(
        payloads.iter().map(|p| p.as_slice()),
        RingAlgorithm::default(),
    )
    .unwrap();
    assert_eq!(t.leafs(), 3);
    assert_eq!(t.root_hash(), expected.root_hash());

    // Leaf of an empty source is the digest of nothing.
    let mut a = RingAlgorithm::default();
    assert_eq!(t.leaf(0).unwrap().hash(), a.digest(&[]).as_slice());
}

#[test]
fn test_read_failure_aborts_construction() {
    let sources: Vec<Box<dyn Read>> = vec![
        Box::new(&b"first"[..]),
        Box::new(FailingReader {
            ok: 10_000,
            kind: io::ErrorKind::BrokenPipe,
        }),
        Box::new(&b"never read"[..]),
    ];

    match MerkleTree::from_sources(sources, RingAlgorithm::default()) {
        Err(Error::SourceRead { index, source }) => {
            assert_eq!(index, 1);
            assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
        }
        other => panic!("expected SourceRead, got {:?}", other.map(|t| t.leafs())),
    }
}

#[test]
fn test_interrupted_reads_are_retried() {
    let data = b"interrupted but complete";
    let reader = InterruptedReader {
        data: &data[..],
        interrupt: false,
    };

    let t = MerkleTree::from_sources(vec![reader], RingAlgorithm::default()).unwrap();
    let mut a = RingAlgorithm::default();
    assert_eq!(t.root_hash().unwrap(), a.digest(&[&data[..]]).as_slice());
}

#[test]
fn test_no_sources() {
    let t = MerkleTree::from_sources(Vec::<&[u8]>::new(), RingAlgorithm::default()).unwrap();
    assert!(t.is_empty());
    assert!(!t.verify());
}
