use lambda_stark_crypto::hash::sha3::Digest32;
use lambda_stark_crypto::merkle_tree::{MerkleTree, Proof};
use lambda_stark_crypto::transcript::Transcript;
use lambda_stark_math::fft::evaluate_fft;
use lambda_stark_math::field::element::FieldElement;
use lambda_stark_math::field::traits::IsFFTField;
use lambda_stark_math::polynomial::Polynomial;

use crate::errors::ProverError;

const FRI_FOLD_TAG: u8 = 0xF0;

/// `g(x^2) = f_e(x^2) + beta * f_o(x^2)`, where `f(x) = f_e(x^2) + x * f_o(x^2)` is the even/odd
/// split of `f`'s coefficients. This is the coefficient-domain form of
/// `g(x^2) = (f(x) + f(-x))/2 + beta * (f(x) - f(-x))/(2x)`.
fn fold_polynomial<F: IsFFTField>(
    poly: &Polynomial<FieldElement<F>>,
    beta: &FieldElement<F>,
) -> Polynomial<FieldElement<F>> {
    let coeffs = poly.coefficients();
    let folded_len = coeffs.len().div_ceil(2);
    let mut folded = vec![FieldElement::zero(); folded_len];
    for (i, c) in coeffs.iter().enumerate() {
        if i % 2 == 0 {
            folded[i / 2] = &folded[i / 2] + c;
        } else {
            folded[i / 2] = &folded[i / 2] + &(c * beta);
        }
    }
    Polynomial::new(&folded)
}

struct CommittedLayer<F: IsFFTField> {
    tree: MerkleTree,
    evaluations: Vec<FieldElement<F>>,
    domain_size: usize,
}

/// One query's openings, one entry per committed layer.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FriQueryOpening<F: IsFFTField> {
    pub evaluation: FieldElement<F>,
    pub evaluation_sym: FieldElement<F>,
    pub path: Proof,
    pub path_sym: Proof,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FriProof<F: IsFFTField> {
    pub layer_roots: Vec<Digest32>,
    pub final_coefficients: Vec<FieldElement<F>>,
    pub query_openings: Vec<Vec<FriQueryOpening<F>>>,
}

fn commit_phase<F: IsFFTField>(
    mut poly: Polynomial<FieldElement<F>>,
    mut domain_size: usize,
    transcript: &mut Transcript,
    final_degree_threshold: usize,
) -> Result<(Vec<CommittedLayer<F>>, Vec<FieldElement<F>>), ProverError> {
    let mut layers = Vec::new();
    let mut betas = Vec::new();

    while poly.degree() > final_degree_threshold && domain_size > 2 {
        let evaluations = evaluate_fft(poly.coefficients(), domain_size)?;
        let leaves: Vec<Vec<u8>> = evaluations.iter().map(|e| e.to_bytes_be()).collect();
        let tree = MerkleTree::build(&leaves)?;
        transcript.append_digest(&tree.root());
        let beta = transcript.challenge_field_element(FRI_FOLD_TAG);

        layers.push(CommittedLayer {
            tree,
            evaluations,
            domain_size,
        });
        betas.push(beta.clone());
        poly = fold_polynomial(&poly, &beta);
        domain_size /= 2;
    }

    let final_coefficients = poly.coefficients().to_vec();
    for c in &final_coefficients {
        transcript.append_bytes(&c.to_bytes_be());
    }
    Ok((layers, final_coefficients))
}

fn query_phase<F: IsFFTField>(
    layers: &[CommittedLayer<F>],
    iotas: &[usize],
) -> Result<Vec<Vec<FriQueryOpening<F>>>, ProverError> {
    iotas
        .iter()
        .map(|iota| {
            layers
                .iter()
                .map(|layer| {
                    let index = iota % layer.domain_size;
                    let index_sym = (iota + layer.domain_size / 2) % layer.domain_size;
                    Ok(FriQueryOpening {
                        evaluation: layer.evaluations[index].clone(),
                        evaluation_sym: layer.evaluations[index_sym].clone(),
                        path: layer.tree.branch(index)?,
                        path_sym: layer.tree.branch(index_sym)?,
                    })
                })
                .collect::<Result<Vec<_>, ProverError>>()
        })
        .collect()
}

/// Commits to `poly` on a domain of `domain_size` points and produces an FRI low-degree proof,
/// opening the codeword at `iotas` in every round.
pub fn prove<F: IsFFTField>(
    poly: Polynomial<FieldElement<F>>,
    domain_size: usize,
    transcript: &mut Transcript,
    final_degree_threshold: usize,
    iotas: &[usize],
) -> Result<FriProof<F>, ProverError> {
    let (layers, final_coefficients) =
        commit_phase(poly, domain_size, transcript, final_degree_threshold)?;
    let layer_roots = layers.iter().map(|l| l.tree.root()).collect();
    let query_openings = query_phase(&layers, iotas)?;
    Ok(FriProof {
        layer_roots,
        final_coefficients,
        query_openings,
    })
}

/// Replays the transcript to recover the folding challenges, then checks every sampled query's
/// folding relation and the terminal check against the revealed final polynomial.
///
/// `committed_root` binds this FRI proof to the externally-committed polynomial it is supposed to
/// be proving low-degree for: the prover commits to that polynomial's evaluations once (to build
/// the spot-check openings) and again as the first FRI layer, and the two commitments are only
/// equal if they cover the same evaluations. Without this check a prover could run FRI on a
/// convenient low-degree polynomial that has nothing to do with the one actually spot-checked.
pub fn verify<F: IsFFTField>(
    proof: &FriProof<F>,
    domain_size: usize,
    transcript: &mut Transcript,
    final_degree_threshold: usize,
    iotas: &[usize],
    committed_root: &Digest32,
) -> bool {
    if proof.final_coefficients.len().saturating_sub(1) > final_degree_threshold {
        return false;
    }
    // If the polynomial was already below the degree threshold, `commit_phase` never ran and
    // there is no first layer to bind — the final coefficients were revealed directly.
    if let Some(first_root) = proof.layer_roots.first() {
        if first_root != committed_root {
            return false;
        }
    }

    let mut betas = Vec::with_capacity(proof.layer_roots.len());
    for root in &proof.layer_roots {
        transcript.append_digest(root);
        betas.push(transcript.challenge_field_element::<F>(FRI_FOLD_TAG));
    }
    for c in &proof.final_coefficients {
        transcript.append_bytes(&c.to_bytes_be());
    }

    let final_poly = Polynomial::new(&proof.final_coefficients);

    for (q, iota) in iotas.iter().enumerate() {
        let openings = &proof.query_openings[q];
        if openings.len() != proof.layer_roots.len() {
            return false;
        }
        let mut current_domain_size = domain_size;

        for (l, opening) in openings.iter().enumerate() {
            let index = iota % current_domain_size;
            let index_sym = (iota + current_domain_size / 2) % current_domain_size;

            if !opening
                .path
                .verify(&proof.layer_roots[l], index, &opening.evaluation.to_bytes_be())
            {
                return false;
            }
            if !opening.path_sym.verify(
                &proof.layer_roots[l],
                index_sym,
                &opening.evaluation_sym.to_bytes_be(),
            ) {
                return false;
            }

            let order = current_domain_size.trailing_zeros() as u64;
            let root = match F::primitive_root_of_unity(order) {
                Ok(r) => FieldElement::<F>::new(r),
                Err(_) => return false,
            };
            let x = root.pow(index as u64);
            let two_inv = match FieldElement::<F>::from(2).inv() {
                Ok(v) => v,
                Err(_) => return false,
            };
            let x_inv = match x.inv() {
                Ok(v) => v,
                Err(_) => return false,
            };

            let even_part = (&opening.evaluation + &opening.evaluation_sym) * &two_inv;
            let odd_part = (&opening.evaluation - &opening.evaluation_sym) * &two_inv * &x_inv;
            let expected_next = &even_part + &(&betas[l] * &odd_part);

            let next_point = x.square();
            let actual_next = if l + 1 < openings.len() {
                openings[l + 1].evaluation.clone()
            } else {
                final_poly.evaluate(&next_point)
            };
            if expected_next != actual_next {
                return false;
            }
            current_domain_size /= 2;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_stark_math::field::fields::u64_prime_field::U64PrimeField;

    type FTiny = U64PrimeField<65537>;
    type FE = FieldElement<FTiny>;

    #[test]
    fn proves_and_verifies_a_low_degree_polynomial() {
        let coeffs: Vec<FE> = (1u64..=4).map(FE::from).collect();
        let poly = Polynomial::new(&coeffs);
        let domain_size = 32;

        let mut prover_transcript = Transcript::new(b"fri-test");
        let iotas = prover_transcript.sample_indices(6, domain_size, 1);
        let proof = prove(poly, domain_size, &mut prover_transcript, 3, &iotas).unwrap();
        let committed_root = proof.layer_roots[0];

        let mut verifier_transcript = Transcript::new(b"fri-test");
        let iotas = verifier_transcript.sample_indices(6, domain_size, 1);
        assert!(verify(
            &proof,
            domain_size,
            &mut verifier_transcript,
            3,
            &iotas,
            &committed_root
        ));
    }

    #[test]
    fn rejects_a_tampered_proof() {
        let coeffs: Vec<FE> = (1u64..=4).map(FE::from).collect();
        let poly = Polynomial::new(&coeffs);
        let domain_size = 32;

        let mut prover_transcript = Transcript::new(b"fri-test-2");
        let iotas = prover_transcript.sample_indices(6, domain_size, 1);
        let mut proof = prove(poly, domain_size, &mut prover_transcript, 3, &iotas).unwrap();
        let committed_root = proof.layer_roots[0];
        proof.query_openings[0][0].evaluation = proof.query_openings[0][0].evaluation.clone() + FE::from(1);

        let mut verifier_transcript = Transcript::new(b"fri-test-2");
        let iotas = verifier_transcript.sample_indices(6, domain_size, 1);
        assert!(!verify(
            &proof,
            domain_size,
            &mut verifier_transcript,
            3,
            &iotas,
            &committed_root
        ));
    }

    #[test]
    fn rejects_a_proof_whose_first_layer_is_not_bound_to_the_committed_root() {
        let coeffs: Vec<FE> = (1u64..=4).map(FE::from).collect();
        let poly = Polynomial::new(&coeffs);
        let domain_size = 32;
        // A threshold below the polynomial's degree forces at least one commit-phase round, so
        // there is an actual first-layer root to forge against.
        let final_degree_threshold = 1;

        let mut prover_transcript = Transcript::new(b"fri-test-3");
        let iotas = prover_transcript.sample_indices(6, domain_size, 1);
        let proof = prove(
            poly,
            domain_size,
            &mut prover_transcript,
            final_degree_threshold,
            &iotas,
        )
        .unwrap();
        assert!(!proof.layer_roots.is_empty());
        let forged_root: Digest32 = [0xAA; 32];

        let mut verifier_transcript = Transcript::new(b"fri-test-3");
        let iotas = verifier_transcript.sample_indices(6, domain_size, 1);
        assert!(!verify(
            &proof,
            domain_size,
            &mut verifier_transcript,
            final_degree_threshold,
            &iotas,
            &forged_root
        ));
    }
}
