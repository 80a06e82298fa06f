use lambda_stark_crypto::transcript::Transcript;
use lambda_stark_math::field::element::FieldElement;
use lambda_stark_math::field::traits::IsFFTField;

use crate::air::{periodic_column_polynomial, Air};
use crate::config::ProofOptions;
use crate::errors::StarkError;
use crate::fri;
use crate::proof::StarkProof;

const CHALLENGE_K1: u8 = 1;
const CHALLENGE_K2: u8 = 2;
const CHALLENGE_K3: u8 = 3;
const CHALLENGE_K4: u8 = 4;

fn leaf_bytes<F: IsFFTField>(values: &[FieldElement<F>]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_bytes_be()).collect()
}

/// Checks a `StarkProof` against `air`, `input` and `output`. Every failure mode — a bad Merkle
/// opening, a violated constraint, a failed FRI check — collapses to `false`; this function never
/// panics on attacker-controlled input.
pub fn verify<A: Air>(
    air: &A,
    input: &[FieldElement<A::Field>],
    output: &[FieldElement<A::Field>],
    proof: &StarkProof<A::Field>,
    proof_options: &ProofOptions,
) -> bool {
    match verify_detailed(air, input, output, proof, proof_options) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("verify: {err}");
            false
        }
    }
}

/// Same check as `verify`, but reports which `StarkError` caused a rejection instead of
/// collapsing to `bool`.
pub fn verify_detailed<A: Air>(
    air: &A,
    input: &[FieldElement<A::Field>],
    output: &[FieldElement<A::Field>],
    proof: &StarkProof<A::Field>,
    proof_options: &ProofOptions,
) -> Result<(), StarkError> {
    let width = air.width();
    let trace_length = air.trace_length();

    if input.len() != width || output.len() != width {
        return Err(StarkError::InvalidParameter);
    }
    if trace_length < 2 || !trace_length.is_power_of_two() {
        return Err(StarkError::InvalidParameter);
    }
    let domain_size = trace_length * proof_options.extension_factor;
    if !domain_size.is_power_of_two() {
        return Err(StarkError::InvalidParameter);
    }

    let trace_order = trace_length.trailing_zeros() as u64;
    let domain_order = domain_size.trailing_zeros() as u64;
    let (g1, g2) = match (
        A::Field::primitive_root_of_unity(trace_order),
        A::Field::primitive_root_of_unity(domain_order),
    ) {
        (Ok(g1), Ok(g2)) => (
            FieldElement::<A::Field>::new(g1),
            FieldElement::<A::Field>::new(g2),
        ),
        _ => return Err(StarkError::InvalidParameter),
    };

    let challenge_transcript = Transcript::from_root(&proof.trace_root);
    let k1 = challenge_transcript.challenge_field_element::<A::Field>(CHALLENGE_K1);
    let k2 = challenge_transcript.challenge_field_element::<A::Field>(CHALLENGE_K2);
    let k3 = challenge_transcript.challenge_field_element::<A::Field>(CHALLENGE_K3);
    let k4 = challenge_transcript.challenge_field_element::<A::Field>(CHALLENGE_K4);

    let sampling_transcript = Transcript::from_root(&proof.composition_root);
    let positions = sampling_transcript.sample_indices(
        proof_options.spot_check_security_factor,
        domain_size,
        proof_options.extension_factor,
    );
    if positions.len() != proof.openings.len() {
        return Err(StarkError::MalformedProof);
    }

    let boundary_constraints = air.boundary_constraints(input, output);
    let constants = air.round_constants();
    let shift = proof_options.extension_factor;

    for (pos, opening) in positions.iter().zip(proof.openings.iter()) {
        if opening.trace_at_position.len() != 3 * width || opening.trace_at_next.len() != 3 * width {
            log::warn!("verify: malformed opening width");
            return Err(StarkError::MalformedProof);
        }
        if !opening
            .trace_path
            .verify(&proof.trace_root, *pos, &leaf_bytes(&opening.trace_at_position))
        {
            log::warn!("verify: main-tree opening failed at position {pos}");
            return Err(StarkError::MerkleVerifyFailed);
        }
        let next = (pos + shift) % domain_size;
        if !opening
            .trace_next_path
            .verify(&proof.trace_root, next, &leaf_bytes(&opening.trace_at_next))
        {
            log::warn!("verify: main-tree opening at the shifted position failed at {pos}");
            return Err(StarkError::MerkleVerifyFailed);
        }
        if !opening.composition_path.verify(
            &proof.composition_root,
            *pos,
            &opening.composition_at_position.to_bytes_be(),
        ) {
            log::warn!("verify: composition-tree opening failed at position {pos}");
            return Err(StarkError::MerkleVerifyFailed);
        }

        let p: Vec<_> = opening.trace_at_position[0..width].to_vec();
        let d: Vec<_> = opening.trace_at_position[width..2 * width].to_vec();
        let b: Vec<_> = opening.trace_at_position[2 * width..3 * width].to_vec();
        let p_next: Vec<_> = opening.trace_at_next[0..width].to_vec();

        let x = g2.pow(*pos as u64);
        let z_at_x = match evaluate_vanishing(&g1, trace_length, &x) {
            Some(value) => value,
            None => {
                log::warn!("verify: sampled position landed on the vanishing polynomial's pole");
                return Err(StarkError::ConstraintViolation);
            }
        };

        let x_to_t = x.pow(trace_length as u64);
        let mut expected_l = FieldElement::zero();
        for j in 0..width {
            let rc_at_x = if constants[j].is_empty() {
                FieldElement::zero()
            } else {
                periodic_column_polynomial(&constants[j], trace_length).evaluate(&x)
            };

            let predicted_next = air.step(j, &p, &rc_at_x);
            if (&p_next[j] - &predicted_next) != (&d[j] * &z_at_x) {
                log::warn!("verify: transition constraint failed for dimension {j} at position {pos}");
                return Err(StarkError::ConstraintViolation);
            }

            let dimension_points: Vec<_> = boundary_constraints
                .iter()
                .filter(|(_, column, _)| *column == j)
                .map(|(row, _, value)| (g1.pow(*row as u64), value.clone()))
                .collect();
            let dimension_denominator = dimension_points
                .iter()
                .map(|(root, _)| &x - root)
                .fold(FieldElement::one(), |acc, factor| &acc * &factor);
            let interpolant = match lagrange_at(&dimension_points, &x) {
                Some(value) => value,
                None => {
                    log::warn!("verify: boundary interpolation points degenerated at position {pos}");
                    return Err(StarkError::ConstraintViolation);
                }
            };
            if (&p[j] - &interpolant) != (&b[j] * &dimension_denominator) {
                log::warn!("verify: boundary constraint failed for dimension {j} at position {pos}");
                return Err(StarkError::ConstraintViolation);
            }

            expected_l = &expected_l + &d[j];
            expected_l = &expected_l + &(&k1 * &p[j]);
            expected_l = &expected_l + &(&k2 * &(&x_to_t * &p[j]));
            expected_l = &expected_l + &(&k3 * &b[j]);
            expected_l = &expected_l + &(&k4 * &(&x_to_t * &b[j]));
        }
        if expected_l != opening.composition_at_position {
            log::warn!("verify: composition value mismatch at position {pos}");
            return Err(StarkError::ConstraintViolation);
        }
    }

    let mut fri_transcript = Transcript::from_root(&proof.composition_root);
    if !fri::verify(
        &proof.fri_proof,
        domain_size,
        &mut fri_transcript,
        proof_options.fri_final_degree_threshold,
        &positions,
        &proof.composition_root,
    ) {
        return Err(StarkError::FriVerifyFailed);
    }

    Ok(())
}

/// `Z(x) = (x^T - 1) / (x - g1^(T-1))`, evaluated pointwise. Returns `None` at the single domain
/// point where the denominator vanishes; callers reject the proof rather than divide by zero
/// there, though an honest prover's positions (sampled excluding multiples of the extension
/// factor) never land on it.
fn evaluate_vanishing<F: IsFFTField>(
    g1: &FieldElement<F>,
    trace_length: usize,
    x: &FieldElement<F>,
) -> Option<FieldElement<F>> {
    let denominator = x - &g1.pow(trace_length as u64 - 1);
    if denominator.is_zero() {
        return None;
    }
    let numerator = x.pow(trace_length as u64) - FieldElement::one();
    Some(&numerator / &denominator)
}

/// Evaluates the Lagrange interpolant through `points` at `x`, without ever materialising the
/// polynomial's coefficients.
fn lagrange_at<F: IsFFTField>(
    points: &[(FieldElement<F>, FieldElement<F>)],
    x: &FieldElement<F>,
) -> Option<FieldElement<F>> {
    let mut total = FieldElement::zero();
    for (i, (xi, yi)) in points.iter().enumerate() {
        let mut term = yi.clone();
        for (j, (xj, _)) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            let denominator = xi - xj;
            if denominator.is_zero() {
                return None;
            }
            term = &term * &((x - xj) / &denominator);
        }
        total = &total + &term;
    }
    Some(total)
}
