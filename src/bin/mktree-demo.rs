use std::fmt;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use mktree::{verify_proof, Algorithm, Digest, MerkleTree, RingAlgorithm};

#[derive(Parser)]
#[command(name = "mktree-demo")]
#[command(about = "Build a merkle tree over a few transactions, prove and tamper with them")]
struct Args {
    /// Hash algorithm: sha256, sha384, sha512 or sha512_256
    #[arg(short, long, default_value = "sha256")]
    algorithm: String,
}

#[derive(Debug, Clone)]
struct Transaction {
    from: &'static str,
    to: &'static str,
    value: u64,
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} {} {}}}", self.from, self.to, self.value)
    }
}

fn hash_tx(alg: &RingAlgorithm, tx: &Transaction) -> Digest {
    alg.clone().digest(&[tx.to_string().as_bytes()])
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();

    let alg: RingAlgorithm = args
        .algorithm
        .parse()
        .with_context(|| format!("invalid --algorithm {}", args.algorithm))?;
    info!("using {}", alg.name());

    let mut tx1 = Transaction {
        from: "mike",
        to: "bob",
        value: 100,
    };
    let txs = vec![
        tx1.clone(),
        Transaction {
            from: "bob",
            to: "douglas",
            value: 250,
        },
        Transaction {
            from: "alice",
            to: "john",
            value: 100,
        },
        Transaction {
            from: "vitalik",
            to: "elon",
            value: 10000,
        },
    ];
    let leafs: Vec<Digest> = txs.iter().map(|tx| hash_tx(&alg, tx)).collect();

    let mut tree = MerkleTree::from_digests(leafs, alg.clone());
    let root = tree
        .root()
        .context("tree built from transactions has no root")?
        .hex();
    println!("Root: {}", root);
    let root_hash = tree
        .root_hash()
        .context("tree built from transactions has no root")?
        .to_vec();

    let proof = tree
        .gen_proof(&hash_tx(&alg, &tx1))
        .context("failed to generate proof for tx1")?;
    println!("Proof of {} ({} steps)", tx1, proof.len());
    for (sibling, side) in proof.iter() {
        println!("  {:?} {}", side, hex::encode(sibling));
    }
    let ok = verify_proof(
        &root_hash,
        &hash_tx(&alg, &tx1),
        proof.lemma(),
        proof.path(),
        alg.clone(),
    );
    println!("Proof integrity: {}", ok);

    tx1.value = 1000;
    let ok = verify_proof(
        &root_hash,
        &hash_tx(&alg, &tx1),
        proof.lemma(),
        proof.path(),
        alg.clone(),
    );
    println!("Proof integrity of modified {}: {}", tx1, ok);

    let forged = Transaction {
        from: "vitalik",
        to: "douglas",
        value: 10000,
    };
    tree.force_leaf_digest(1, hash_tx(&alg, &forged))
        .context("failed to overwrite leaf 1")?;
    println!(
        "Tree integrity after replacing leaf 1 with {}: {}",
        forged,
        tree.verify()
    );

    Ok(())
}
