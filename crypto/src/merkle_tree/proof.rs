use crate::hash::sha3::{hash_bytes, hash_two, Digest32};

/// An opening of one leaf of a `MerkleTree`: the sibling hashes from leaf to root, leaf-first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proof {
    pub siblings: Vec<Digest32>,
}

impl Proof {
    /// Recomputes the path from `leaf` using `index` to determine, at every level, whether the
    /// running hash is the left or right child, and checks the result against `root`.
    pub fn verify(&self, root: &Digest32, index: usize, leaf: &[u8]) -> bool {
        let mut current = hash_bytes(leaf);
        let mut idx = (1usize << self.siblings.len()) + index;
        for sibling in &self.siblings {
            current = if idx % 2 == 0 {
                hash_two(&current, sibling)
            } else {
                hash_two(sibling, &current)
            };
            idx /= 2;
        }
        &current == root
    }
}
