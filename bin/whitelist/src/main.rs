//! Merkle whitelist tool
//!
//! Builds a sorted-pair Keccak-256 Merkle tree from a JSON allocation list and:
//! - Prints the root to publish to the verifier contract
//! - Prints the proof for one claimant
//! - Checks a claim against a published root
//! - Dumps every claimant's leaf and proof
//!
//! Run: cargo run -p whitelist -- root --input allocations.json

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use merkle_whitelist::{
    Entry, LeafEncoding, MembershipVerifier, MerkleProof, MerkleTree, WhitelistVerifier,
    parse_address, parse_allocations, parse_hash, to_hex,
};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Leaf encoding: "packed" (abi.encodePacked) or "abi" (abi.encode)
    #[arg(long, global = true, env = "WHITELIST_ENCODING", default_value = "packed")]
    encoding: LeafEncoding,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the merkle root of an allocation list
    Root {
        /// JSON allocation list
        #[arg(long, env = "WHITELIST_INPUT")]
        input: PathBuf,
    },
    /// Print the proof for one allocation
    Proof {
        /// JSON allocation list
        #[arg(long, env = "WHITELIST_INPUT")]
        input: PathBuf,
        /// Claimant address
        #[arg(long)]
        address: String,
        /// Claimant quota
        #[arg(long)]
        quota: u64,
        /// Leaf position, for lists with duplicate allocations
        #[arg(long)]
        index: Option<usize>,
    },
    /// Check a claim against a published root
    Verify {
        /// Published merkle root
        #[arg(long)]
        root: String,
        /// Claimant address
        #[arg(long)]
        address: String,
        /// Claimed quota
        #[arg(long)]
        quota: u64,
        /// Comma-separated sibling hashes, leaf to root
        #[arg(long, value_delimiter = ',')]
        proof: Vec<String>,
    },
    /// Print the root plus every allocation's leaf and proof as JSON
    Dump {
        /// JSON allocation list
        #[arg(long, env = "WHITELIST_INPUT")]
        input: PathBuf,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Distributor-style dump of a whole tree
#[derive(Serialize)]
struct TreeDump {
    root: String,
    encoding: LeafEncoding,
    claims: Vec<ClaimDump>,
}

#[derive(Serialize)]
struct ClaimDump {
    #[serde(flatten)]
    entry: Entry,
    #[serde(flatten)]
    proof: MerkleProof,
}

fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    debug!(?args, "parsed arguments");

    match args.command {
        Command::Root { input } => {
            let tree = load_tree(&input, args.encoding)?;
            println!("{}", to_hex(&tree.root()));
        }
        Command::Proof { input, address, quota, index } => {
            let tree = load_tree(&input, args.encoding)?;
            let entry = Entry::new(parse_address(&address)?, quota);
            let proof = claim_proof(&tree, &entry, index)?;
            info!(
                claimant = %entry,
                index = proof.index,
                siblings = proof.siblings.len(),
                "generated proof"
            );
            println!("{}", serde_json::to_string_pretty(&proof.to_hex())?);
        }
        Command::Verify { root, address, quota, proof } => {
            let verified = check_claim(&root, &address, quota, &proof, args.encoding)?;
            println!("{verified}");
            return Ok(ExitCode::from(claim_exit_status(verified)));
        }
        Command::Dump { input, output } => {
            let dump = tree_dump(&load_entries(&input)?, args.encoding)?;
            let json = serde_json::to_string_pretty(&dump)?;

            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), claims = dump.claims.len(), "wrote tree dump");
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Proof for `entry`, either at an explicit leaf position or its first occurrence
fn claim_proof(tree: &MerkleTree, entry: &Entry, index: Option<usize>) -> Result<MerkleProof> {
    match index {
        Some(index) => {
            let proof = tree.proof_at(index)?;
            anyhow::ensure!(
                proof.leaf == entry.leaf(tree.encoding()),
                "leaf {index} does not belong to {entry}"
            );
            Ok(proof)
        }
        None => tree.proof_for(entry).with_context(|| format!("{entry} is not whitelisted")),
    }
}

/// Check a claim given as command-line strings against a published root
fn check_claim(
    root: &str,
    address: &str,
    quota: u64,
    proof: &[String],
    encoding: LeafEncoding,
) -> Result<bool> {
    let root = parse_hash(root).context("invalid root")?;
    let identity = parse_address(address)?;
    let proof = proof
        .iter()
        .map(|sibling| parse_hash(sibling))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid proof")?;

    Ok(WhitelistVerifier::with_encoding(root, encoding).verify(&proof, &identity, quota))
}

/// Process exit status for a verified (0) or rejected (1) claim
const fn claim_exit_status(verified: bool) -> u8 {
    if verified { 0 } else { 1 }
}

fn tree_dump(entries: &[Entry], encoding: LeafEncoding) -> Result<TreeDump> {
    let tree = MerkleTree::build_with(entries, encoding)?;
    let claims = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| -> Result<ClaimDump> {
            Ok(ClaimDump { entry: *entry, proof: tree.proof_at(index)? })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(TreeDump { root: to_hex(&tree.root()), encoding: tree.encoding(), claims })
}

fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let entries = parse_allocations(&json)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    info!(path = %path.display(), entries = entries.len(), "loaded allocation list");
    Ok(entries)
}

fn load_tree(path: &Path, encoding: LeafEncoding) -> Result<MerkleTree> {
    let tree = MerkleTree::build_with(&load_entries(path)?, encoding)?;
    info!(
        root = %to_hex(&tree.root()),
        leaves = tree.len(),
        depth = tree.depth(),
        %encoding,
        "built whitelist tree"
    );
    Ok(tree)
}
