use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::{
    hash::{hash, node_hash},
    proof::*,
    verify::{compute_root, verify_proof},
};

fn items(n: usize) -> Vec<Vec<u8>> {
    (0..n as u32).map(|i| format!("header-{i}").into_bytes()).collect()
}

fn flip_bit(mut digest: CryptoHash, byte: usize, bit: u8) -> CryptoHash {
    digest[byte] ^= 1 << bit;
    digest
}

#[test]
fn test_four_leaf_scenario() {
    let tree = MerkleTree::build(&["a", "b", "c", "d"]);
    let (a, b, c, d) = (hash(b"a"), hash(b"b"), hash(b"c"), hash(b"d"));
    let p1 = node_hash(&a, &b);
    let p2 = node_hash(&c, &d);
    let root = node_hash(&p1, &p2);

    let proof = tree.generate_inclusion_proof(&a).expect("leaf a is present");
    assert_eq!(
        proof,
        vec![
            ProofStep {
                sibling_hash: b,
                position: Position::Right,
            },
            ProofStep {
                sibling_hash: p2,
                position: Position::Right,
            },
        ]
    );
    assert!(verify_proof(&a, &proof, &root));

    let proof_d = tree.generate_inclusion_proof(&d).expect("leaf d is present");
    assert_eq!(
        proof_d,
        vec![
            ProofStep {
                sibling_hash: c,
                position: Position::Left,
            },
            ProofStep {
                sibling_hash: p1,
                position: Position::Left,
            },
        ]
    );
    assert!(verify_proof(&d, &proof_d, &root));
}

#[test]
fn test_single_leaf_proof_is_empty() {
    let tree = MerkleTree::build(&["only"]);
    let leaf = hash(b"only");
    let proof = tree.generate_inclusion_proof(&leaf).expect("present");
    assert!(proof.is_empty());
    assert!(verify_proof(&leaf, &proof, &tree.root_hash().expect("root")));
}

#[test]
fn test_self_paired_leaf_proof() {
    let tree = MerkleTree::build(&["A", "B", "C"]);
    let (a, b, c) = (hash(b"A"), hash(b"B"), hash(b"C"));
    let ab = node_hash(&a, &b);

    let proof = tree.generate_inclusion_proof(&c).expect("present");
    assert_eq!(
        proof,
        vec![
            ProofStep {
                sibling_hash: c,
                position: Position::Right,
            },
            ProofStep {
                sibling_hash: ab,
                position: Position::Left,
            },
        ]
    );
    assert!(verify_proof(&c, &proof, &tree.root_hash().expect("root")));

    // Without the self-pair step the duplicated level cannot be reproduced.
    assert!(!verify_proof(&c, &proof[1..], &tree.root_hash().expect("root")));
}

#[test]
fn test_self_pair_step_position_is_not_committed() {
    let tree = MerkleTree::build(&["A", "B", "C"]);
    let root = tree.root_hash().expect("root");
    let c = hash(b"C");
    let proof = tree.generate_inclusion_proof(&c).expect("present");

    // hash(C || C) is the same whichever side C is placed on, so a flipped
    // position at the self-paired level still verifies.
    let mut flipped = proof.clone();
    flipped[0].position = flipped[0].position.flipped();
    assert_ne!(flipped, proof);
    assert!(verify_proof(&c, &flipped, &root));

    // Flipping the step with a distinct sibling is still detected.
    let mut flipped = proof;
    flipped[1].position = flipped[1].position.flipped();
    assert!(!verify_proof(&c, &flipped, &root));
}

#[test]
fn test_missing_leaf() {
    let tree = MerkleTree::build(&["a", "b"]);
    assert_matches!(
        tree.generate_inclusion_proof(&hash(b"z")),
        Err(MerkleTreeError::LeafNotFound(missing)) if missing == hex::encode(hash(b"z"))
    );
}

#[test]
fn test_empty_tree_proof() {
    let tree = MerkleTree::build::<&[u8]>(&[]);
    assert_matches!(
        tree.generate_inclusion_proof(&hash(b"a")),
        Err(MerkleTreeError::EmptyTree)
    );
}

#[test]
fn test_every_leaf_verifies_for_batch_sizes_1_to_17() {
    for n in 1..=17usize {
        let batch = items(n);
        let tree = MerkleTree::build(&batch);
        let root = tree.root_hash().expect("non-empty");
        for (i, item) in batch.iter().enumerate() {
            let leaf = hash(item);
            let proof = tree
                .generate_inclusion_proof(&leaf)
                .unwrap_or_else(|e| panic!("n={n} leaf={i}: {e}"));
            assert_eq!(proof.len(), tree.height() - 1, "n={n} leaf={i}");
            assert!(verify_proof(&leaf, &proof, &root), "n={n} leaf={i}");
        }
    }
}

#[test]
fn test_proof_positions_follow_index_bits() {
    let batch = items(8);
    let tree = MerkleTree::build(&batch);
    // Leaf 5 = 0b101: right child, left child, right child on the way up.
    let proof = tree
        .generate_inclusion_proof(&hash(&batch[5]))
        .expect("present");
    let positions: Vec<Position> = proof.iter().map(|step| step.position).collect();
    assert_eq!(
        positions,
        vec![Position::Left, Position::Right, Position::Left]
    );
}

#[test]
fn test_duplicate_leaves_alias_to_first() {
    let tree = MerkleTree::build(&["x", "dup", "y", "dup", "z"]);
    let dup = hash(b"dup");
    let proof = tree.generate_inclusion_proof(&dup).expect("present");

    // Proof describes index 1, not index 3.
    assert_eq!(proof[0].sibling_hash, hash(b"x"));
    assert_eq!(proof[0].position, Position::Left);

    let again = tree.generate_inclusion_proof(&dup).expect("present");
    assert_eq!(proof, again);
    assert!(verify_proof(&dup, &proof, &tree.root_hash().expect("root")));
}

#[test]
fn test_wrong_root_or_leaf_fails() {
    let batch = items(6);
    let tree = MerkleTree::build(&batch);
    let root = tree.root_hash().expect("root");
    let leaf = hash(&batch[2]);
    let proof = tree.generate_inclusion_proof(&leaf).expect("present");

    assert!(!verify_proof(&hash(&batch[3]), &proof, &root));
    assert!(!verify_proof(&leaf, &proof, &flip_bit(root, 0, 0)));
    assert!(!verify_proof(&leaf, &[], &root));
    assert!(!verify_proof(&leaf, &proof[..proof.len() - 1], &root));
}

#[test]
fn test_compute_root_with_empty_proof_is_identity() {
    let leaf = hash(b"leaf");
    assert_eq!(compute_root(&leaf, &[]), leaf);
}

#[test]
fn test_position_helpers() {
    assert_eq!(Position::Left.as_str(), "left");
    assert_eq!(Position::Right.as_str(), "right");
    assert_eq!(Position::Left.flipped(), Position::Right);
    assert_eq!(Position::Right.flipped(), Position::Left);
}

proptest! {
    #[test]
    fn test_prop_round_trip(batch in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..48), 1..40)) {
        let tree = MerkleTree::build(&batch);
        let root = tree.root_hash().expect("non-empty");
        for item in &batch {
            let leaf = hash(item);
            let proof = tree.generate_inclusion_proof(&leaf).expect("present");
            prop_assert!(verify_proof(&leaf, &proof, &root));
        }
    }

    #[test]
    fn test_prop_sibling_bit_flip_is_detected(
        n in 2usize..40,
        leaf_seed in any::<prop::sample::Index>(),
        step_seed in any::<prop::sample::Index>(),
        byte in 0usize..32,
        bit in 0u8..8,
    ) {
        let batch = items(n);
        let tree = MerkleTree::build(&batch);
        let root = tree.root_hash().expect("non-empty");
        let leaf = hash(&batch[leaf_seed.index(n)]);
        let mut proof = tree.generate_inclusion_proof(&leaf).expect("present");
        let step = step_seed.index(proof.len());
        proof[step].sibling_hash = flip_bit(proof[step].sibling_hash, byte, bit);
        prop_assert!(!verify_proof(&leaf, &proof, &root));
    }

    #[test]
    fn test_prop_position_flip_is_detected(
        n in 2usize..40,
        leaf_seed in any::<prop::sample::Index>(),
        step_seed in any::<prop::sample::Index>(),
    ) {
        let batch = items(n);
        let tree = MerkleTree::build(&batch);
        let root = tree.root_hash().expect("non-empty");
        let leaf = hash(&batch[leaf_seed.index(n)]);
        let mut proof = tree.generate_inclusion_proof(&leaf).expect("present");
        let step = step_seed.index(proof.len());

        // A self-pair step hashes identically in either order.
        let running = compute_root(&leaf, &proof[..step]);
        prop_assume!(proof[step].sibling_hash != running);

        proof[step].position = proof[step].position.flipped();
        prop_assert!(!verify_proof(&leaf, &proof, &root));
    }

    #[test]
    fn test_prop_reordering_changes_root(n in 2usize..40, a_seed in any::<prop::sample::Index>(), b_seed in any::<prop::sample::Index>()) {
        let (a, b) = (a_seed.index(n), b_seed.index(n));
        prop_assume!(a != b);
        let batch = items(n);
        let mut swapped = batch.clone();
        swapped.swap(a, b);
        prop_assert_ne!(MerkleTree::build(&batch).root_hash(), MerkleTree::build(&swapped).root_hash());
        prop_assert_eq!(MerkleTree::build(&batch).root_hash(), MerkleTree::build(&batch.clone()).root_hash());
    }
}
