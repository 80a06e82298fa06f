use lambda_stark_math::field::element::FieldElement;
use lambda_stark_math::field::traits::IsField;

use crate::hash::sha3::{hash_bytes, hash_two, Digest32};

/// A Fiat-Shamir transcript: turns an interactive verifier into a deterministic function of the
/// prover's commitments. Every challenge and sampled index is a pure function of the digests
/// absorbed so far, so re-running the same absorptions on both sides reproduces the same values.
#[derive(Debug, Clone)]
pub struct Transcript {
    state: Digest32,
}

impl Transcript {
    pub fn new(seed: &[u8]) -> Self {
        Self {
            state: hash_bytes(seed),
        }
    }

    /// Starts a transcript from an already-committed root hash, as the verifier does when it
    /// only has the prover's Merkle roots to work from.
    pub fn from_root(root: &Digest32) -> Self {
        Self { state: *root }
    }

    pub fn append_bytes(&mut self, data: &[u8]) {
        self.state = hash_two(&self.state, &hash_bytes(data));
    }

    pub fn append_digest(&mut self, digest: &Digest32) {
        self.state = hash_two(&self.state, digest);
    }

    /// Derives a challenge field element tagged by `tag`, so that `k1, k2, k3, k4` drawn from the
    /// same root with distinct tags are independent-looking but both reproducible.
    pub fn challenge_field_element<F: IsField>(&self, tag: u8) -> FieldElement<F> {
        let digest = hash_two(&self.state, &hash_bytes(&[tag]));
        FieldElement::new(F::from_bytes_be(&digest))
    }

    /// Draws `count` pseudorandom indices in `[0, domain_size)`, skipping any index that is a
    /// multiple of `exclude_multiples_of` (used to keep spot-checks off the original trace
    /// subgroup).
    pub fn sample_indices(
        &self,
        count: usize,
        domain_size: usize,
        exclude_multiples_of: usize,
    ) -> Vec<usize> {
        let mut indices = Vec::with_capacity(count);
        let mut counter: u32 = 0;
        while indices.len() < count {
            let mut data = self.state.to_vec();
            data.extend_from_slice(&counter.to_be_bytes());
            let digest = hash_bytes(&data);
            counter += 1;

            let word = u32::from_be_bytes(digest[0..4].try_into().unwrap());
            let idx = (word as usize) % domain_size;
            if exclude_multiples_of > 1 && idx % exclude_multiples_of == 0 {
                continue;
            }
            indices.push(idx);
        }
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_stark_math::field::fields::u64_prime_field::U64PrimeField;

    type F17 = U64PrimeField<17>;

    #[test]
    fn same_root_yields_same_challenges() {
        let root = [7u8; 32];
        let t1 = Transcript::from_root(&root);
        let t2 = Transcript::from_root(&root);
        let k1: FieldElement<F17> = t1.challenge_field_element(1);
        let k2: FieldElement<F17> = t2.challenge_field_element(1);
        assert_eq!(k1, k2);
    }

    #[test]
    fn distinct_tags_usually_differ() {
        let root = [9u8; 32];
        let t = Transcript::from_root(&root);
        let k1: FieldElement<F17> = t.challenge_field_element(1);
        let k2: FieldElement<F17> = t.challenge_field_element(2);
        assert_ne!(k1, k2);
    }

    #[test]
    fn sampled_indices_never_hit_excluded_multiples() {
        let root = [3u8; 32];
        let t = Transcript::from_root(&root);
        let indices = t.sample_indices(40, 64, 8);
        assert_eq!(indices.len(), 40);
        assert!(indices.iter().all(|i| i % 8 != 0));
    }
}
