use sha3::{Digest, Sha3_256};

/// The width, in bytes, of every hash used by the Merkle tree and the transcript.
pub const DIGEST_SIZE: usize = 32;

pub type Digest32 = [u8; DIGEST_SIZE];

/// Hashes a single byte string.
pub fn hash_bytes(data: &[u8]) -> Digest32 {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut out = [0u8; DIGEST_SIZE];
    out.copy_from_slice(&result);
    out
}

/// Hashes the concatenation of two digests, as used when building internal Merkle tree nodes.
pub fn hash_two(left: &Digest32, right: &Digest32) -> Digest32 {
    let mut hasher = Sha3_256::new();
    hasher.update(left);
    hasher.update(right);
    let result = hasher.finalize();
    let mut out = [0u8; DIGEST_SIZE];
    out.copy_from_slice(&result);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_deterministic() {
        assert_eq!(hash_bytes(b"lambda"), hash_bytes(b"lambda"));
    }

    #[test]
    fn different_inputs_hash_differently() {
        assert_ne!(hash_bytes(b"lambda"), hash_bytes(b"stark"));
    }
}
