//! End-to-end whitelist scenarios

use merkle_whitelist::{
    Entry, ErrorKind, Keccak256Hasher, LeafEncoding, MembershipVerifier, MerkleTree, WhitelistError,
    WhitelistVerifier, parse_address, verify,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Default local dev-chain accounts
const SIGNERS: [&str; 6] = [
    "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
    "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
    "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc",
    "0x90f79bf6eb2c4f870365e785982e1f101e93b906",
    "0x15d34aaf54267db7d7c367839aaf71a00a2c6a65",
    "0x9965507d1a55bcc2695c58ba16fb37d819b0a4dc",
];

fn signer_entries(quota: u64) -> Vec<Entry> {
    SIGNERS.iter().map(|s| Entry::new(parse_address(s).unwrap(), quota)).collect()
}

fn random_entries(rng: &mut StdRng, n: usize) -> Vec<Entry> {
    (0..n).map(|_| Entry::new(rng.r#gen(), rng.gen_range(0..=1_000))).collect()
}

#[test]
fn test_owner_proof_verifies() {
    let entries = signer_entries(2);
    let tree = MerkleTree::build(&entries).unwrap();
    let verifier = WhitelistVerifier::new(tree.root());

    let leaf = entries[0].leaf(LeafEncoding::Packed);
    let proof = tree.proof(&leaf).unwrap();
    assert_eq!(proof.index, 0);
    assert!(verifier.verify(&proof.siblings, &entries[0].identity, 2));
}

#[test]
fn test_empty_proof_rejected() {
    let entries = signer_entries(2);
    let tree = MerkleTree::build(&entries).unwrap();
    let verifier = WhitelistVerifier::new(tree.root());

    assert!(!verifier.verify(&[], &entries[0].identity, 2));
}

#[test]
fn test_single_entry_tree() {
    let entry = signer_entries(2)[3];
    let tree = MerkleTree::build(&[entry]).unwrap();
    let leaf = Keccak256Hasher::hash(&entry.encode(LeafEncoding::Packed));

    assert_eq!(tree.root(), leaf);
    let proof = tree.proof(&leaf).unwrap();
    assert!(proof.siblings.is_empty());
    assert!(verify(&[], &leaf, &tree.root()));
}

#[test]
fn test_zero_entries() {
    let err = MerkleTree::build(&[]).unwrap_err();
    assert!(matches!(err, WhitelistError::EmptyInput));
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn test_root_unchanged_by_swapping_pair_members() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in [2, 3, 6, 9, 16, 33] {
        let entries = random_entries(&mut rng, n);
        let root = MerkleTree::build(&entries).unwrap().root();

        for pair in 0..n / 2 {
            let mut swapped = entries.clone();
            swapped.swap(2 * pair, 2 * pair + 1);
            let tree = MerkleTree::build(&swapped).unwrap();
            assert_eq!(tree.root(), root, "n={n} pair={pair}");
            for index in 0..tree.len() {
                let proof = tree.proof_at(index).unwrap();
                assert!(proof.verify(&root), "n={n} pair={pair} index={index}");
            }
        }

        let mut swapped = entries.clone();
        for pair in 0..n / 2 {
            if rng.gen_bool(0.5) {
                swapped.swap(2 * pair, 2 * pair + 1);
            }
        }
        assert_eq!(MerkleTree::build(&swapped).unwrap().root(), root, "n={n}");
    }
}

#[test]
fn test_moving_leaf_to_another_pair_changes_root() {
    let entries = signer_entries(2);

    let [e0, e1, e2, e3] = [entries[0], entries[1], entries[2], entries[3]];
    let three = MerkleTree::build(&[e0, e1, e2]).unwrap().root();
    assert_ne!(MerkleTree::build(&[e2, e0, e1]).unwrap().root(), three);

    let four = MerkleTree::build(&[e0, e1, e2, e3]).unwrap().root();
    assert_ne!(MerkleTree::build(&[e0, e2, e1, e3]).unwrap().root(), four);

    // sibling subtrees may swap as a unit
    assert_eq!(MerkleTree::build(&[e2, e3, e0, e1]).unwrap().root(), four);
}

#[test]
fn test_every_entry_round_trips() {
    let mut rng = StdRng::seed_from_u64(42);
    let entries = random_entries(&mut rng, 50);
    for encoding in [LeafEncoding::Packed, LeafEncoding::Abi] {
        let tree = MerkleTree::build_with(&entries, encoding).unwrap();
        let verifier = WhitelistVerifier::with_encoding(tree.root(), encoding);
        for entry in &entries {
            let leaf = entry.leaf(encoding);
            let proof = tree.proof(&leaf).unwrap();
            assert!(verify(&proof.siblings, &leaf, &tree.root()));
            assert!(verifier.verify(&proof.siblings, &entry.identity, entry.quota));
        }
    }
}

#[test]
fn test_empty_proof_never_matches_multi_leaf_root() {
    let entries = signer_entries(5);
    let tree = MerkleTree::build(&entries).unwrap();
    for leaf in tree.leaves() {
        assert!(!verify(&[], leaf, &tree.root()));
    }
}

#[test]
fn test_single_bit_flip_breaks_proof() {
    let mut rng = StdRng::seed_from_u64(3);
    let entries = random_entries(&mut rng, 13);
    let tree = MerkleTree::build(&entries).unwrap();

    for index in 0..tree.len() {
        let proof = tree.proof_at(index).unwrap();
        for element in 0..proof.siblings.len() {
            for bit in 0..256 {
                let mut tampered = proof.siblings.clone();
                tampered[element][bit / 8] ^= 1 << (bit % 8);
                assert!(
                    !verify(&tampered, &proof.leaf, &tree.root()),
                    "index={index} element={element} bit={bit}"
                );
            }
        }
    }
}

#[test]
fn test_duplicate_entries() {
    let mut entries = signer_entries(2);
    entries.push(entries[1]);
    let tree = MerkleTree::build(&entries).unwrap();
    let leaf = entries[1].leaf(LeafEncoding::Packed);

    let first = tree.proof(&leaf).unwrap();
    assert_eq!(first.index, 1);
    assert!(first.verify(&tree.root()));

    let last = tree.proof_at(6).unwrap();
    assert_eq!(last.leaf, leaf);
    assert_ne!(last.siblings, first.siblings);
    assert!(last.verify(&tree.root()));
}

#[test]
fn test_unknown_entry_has_no_proof() {
    let tree = MerkleTree::build(&signer_entries(2)).unwrap();
    let outsider = Entry::new([0x11; 20], 2);
    let err = tree.proof_for(&outsider).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lookup);
}
