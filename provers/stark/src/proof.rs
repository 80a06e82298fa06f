use lambda_stark_crypto::hash::sha3::Digest32;
use lambda_stark_crypto::merkle_tree::Proof;
use lambda_stark_math::field::element::FieldElement;
use lambda_stark_math::field::traits::IsFFTField;

use crate::fri::FriProof;

/// One sampled position's openings: the main-tree leaf at that position, the main-tree leaf at
/// the next trace-aligned point (`position + extension_factor`, wrapped), and the
/// composition-tree leaf at that position.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpotCheckOpening<F: IsFFTField> {
    /// `P_0(x)..P_{w-1}(x), D_0(x)..D_{w-1}(x), B_0(x)..B_{w-1}(x)` at the sampled position.
    pub trace_at_position: Vec<FieldElement<F>>,
    pub trace_path: Proof,
    /// The same leaf layout at `position + extension_factor`; only the `P` entries are used, by
    /// the transition check, but the whole leaf is what the Merkle tree actually committed.
    pub trace_at_next: Vec<FieldElement<F>>,
    pub trace_next_path: Proof,
    pub composition_at_position: FieldElement<F>,
    pub composition_path: Proof,
}

/// An immutable STARK proof: two Merkle roots, one opening per spot-check position, and an FRI
/// proof of the composition polynomial's low degree.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StarkProof<F: IsFFTField> {
    pub trace_root: Digest32,
    pub composition_root: Digest32,
    pub openings: Vec<SpotCheckOpening<F>>,
    pub fri_proof: FriProof<F>,
}
