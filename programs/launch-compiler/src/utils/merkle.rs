//! OpenZeppelin-compatible Merkle tree.
//!
//! Leaves are `keccak256(keccak256(abi.encode(address, uint256)))`, sorted
//! before the tree is laid out, and sibling pairs are sorted before hashing.
//! The same convention is used for airdrops and presale allowlists, so any
//! `MerkleProof.verify` implementation can check our proofs.

use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::errors::LaunchError;
use crate::utils::abi::{self, Token};
use crate::utils::address::{keccak256, Address, Digest};

pub fn leaf_hash(recipient: &Address, amount: U256) -> Digest {
    let encoded = abi::encode(&[Token::Address(*recipient), Token::Uint(amount)]);
    let inner = keccak256(&[encoded.as_slice()]);
    keccak256(&[&inner])
}

/// Commutative pair hash: the smaller digest goes first
pub fn hash_pair(a: &Digest, b: &Digest) -> Digest {
    if a <= b {
        keccak256(&[a.as_slice(), b.as_slice()])
    } else {
        keccak256(&[b.as_slice(), a.as_slice()])
    }
}

/// Fold a proof onto a leaf and compare with the root
pub fn verify(root: &Digest, leaf: &Digest, proof: &[Digest]) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |node, sibling| hash_pair(&node, sibling));
    computed == *root
}

/// Complete binary tree stored as an array: node i has children 2i+1 and 2i+2,
/// leaves occupy the tail in reverse sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    nodes: Vec<Digest>,
    sorted_leaves: Vec<Digest>,
}

impl MerkleTree {
    pub fn from_leaves(mut leaves: Vec<Digest>) -> Result<Self> {
        require!(!leaves.is_empty(), LaunchError::EmptyDistribution);
        leaves.sort_unstable();

        let leaf_count = leaves.len();
        let node_count = 2 * leaf_count - 1;
        let mut nodes = vec![[0u8; 32]; node_count];
        for (i, leaf) in leaves.iter().enumerate() {
            nodes[node_count - 1 - i] = *leaf;
        }
        for i in (0..node_count - leaf_count).rev() {
            nodes[i] = hash_pair(&nodes[2 * i + 1], &nodes[2 * i + 2]);
        }

        Ok(Self {
            nodes,
            sorted_leaves: leaves,
        })
    }

    pub fn root(&self) -> Digest {
        self.nodes[0]
    }

    pub fn len(&self) -> usize {
        self.sorted_leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_leaves.is_empty()
    }

    /// Proof for a leaf, or `RecipientNotFound` when the leaf is not in the tree
    pub fn proof(&self, leaf: &Digest) -> Result<Vec<Digest>> {
        let sorted_index = self
            .sorted_leaves
            .binary_search(leaf)
            .map_err(|_| error!(LaunchError::RecipientNotFound))?;

        let mut index = self.nodes.len() - 1 - sorted_index;
        let mut proof = Vec::new();
        while index > 0 {
            let sibling = if index % 2 == 1 { index + 1 } else { index - 1 };
            proof.push(self.nodes[sibling]);
            index = (index - 1) / 2;
        }
        Ok(proof)
    }
}
