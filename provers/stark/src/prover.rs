use lambda_stark_crypto::merkle_tree::MerkleTree;
use lambda_stark_crypto::transcript::Transcript;
use lambda_stark_math::fft::{evaluate_fft, interpolate_fft};
use lambda_stark_math::field::element::FieldElement;
use lambda_stark_math::field::traits::IsFFTField;
use lambda_stark_math::polynomial::Polynomial;

#[cfg(feature = "parallel")]
use rayon::prelude::{IntoParallelIterator, ParallelIterator};
#[cfg(feature = "instruments")]
use std::time::Instant;

use crate::air::{periodic_column_polynomial, Air};
use crate::config::ProofOptions;
use crate::errors::ProverError;
use crate::fri;
use crate::proof::{SpotCheckOpening, StarkProof};

const CHALLENGE_K1: u8 = 1;
const CHALLENGE_K2: u8 = 2;
const CHALLENGE_K3: u8 = 3;
const CHALLENGE_K4: u8 = 4;

fn leaf_bytes<F: IsFFTField>(values: &[FieldElement<F>]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_bytes_be()).collect()
}

/// Runs the full proving pipeline: builds the trace from `input`, low-degree-extends it,
/// constructs the transition- and boundary-constraint quotients, commits to everything, and
/// produces an FRI proof of the resulting composition polynomial's low degree.
pub fn prove<A: Air>(
    air: &A,
    input: &[FieldElement<A::Field>],
    output: &[FieldElement<A::Field>],
    proof_options: &ProofOptions,
) -> Result<StarkProof<A::Field>, ProverError>
where
    FieldElement<A::Field>: Send + Sync,
{
    let width = air.width();
    let trace_length = air.trace_length();

    if input.len() != width || output.len() != width {
        return Err(ProverError::InvalidParameter(
            "input/output length must equal the AIR's width".into(),
        ));
    }
    if trace_length < 2 || !trace_length.is_power_of_two() {
        return Err(ProverError::InvalidParameter(
            "trace_length must be a power of two >= 2".into(),
        ));
    }

    let domain_size = trace_length * proof_options.extension_factor;
    if !domain_size.is_power_of_two() {
        return Err(ProverError::InvalidParameter(
            "extension_factor must be a power of two".into(),
        ));
    }
    if air.constraint_degree() * trace_length >= domain_size {
        return Err(ProverError::InvalidParameter(
            "extension_factor is too small for this AIR's constraint degree".into(),
        ));
    }

    log::info!("building execution trace ({trace_length} steps, width {width})");
    let trace = air.build_trace(input);
    let trace_polys = trace.compute_trace_polys()?;

    let trace_order = trace_length.trailing_zeros() as u64;
    let domain_order = domain_size.trailing_zeros() as u64;
    let g1 = FieldElement::<A::Field>::new(A::Field::primitive_root_of_unity(trace_order)?);
    let g2 = FieldElement::<A::Field>::new(A::Field::primitive_root_of_unity(domain_order)?);

    log::debug!("low-degree-extending the trace polynomials");
    #[cfg(feature = "instruments")]
    let lde_timer = Instant::now();
    let p_evals: Vec<Vec<FieldElement<A::Field>>> = trace_polys
        .iter()
        .map(|poly| evaluate_fft(poly.coefficients(), domain_size))
        .collect::<Result<_, _>>()?;
    #[cfg(feature = "instruments")]
    log::debug!("trace low-degree extension took {:?}", lde_timer.elapsed());

    let constant_polys: Vec<_> = air
        .round_constants()
        .iter()
        .map(|values| periodic_column_polynomial(values, trace_length))
        .collect();
    let constant_evals: Vec<Vec<FieldElement<A::Field>>> = constant_polys
        .iter()
        .map(|poly| evaluate_fft(poly.coefficients(), domain_size))
        .collect::<Result<_, _>>()?;

    log::debug!("constructing transition-constraint quotient polynomials");
    let shift = proof_options.extension_factor;
    let c_evals: Vec<Vec<FieldElement<A::Field>>> = (0..width)
        .map(|j| {
            (0..domain_size)
                .map(|i| {
                    let state: Vec<_> = (0..width).map(|k| p_evals[k][i].clone()).collect();
                    let next = p_evals[j][(i + shift) % domain_size].clone();
                    let rc = &constant_evals[j][i];
                    &next - &air.step(j, &state, rc)
                })
                .collect()
        })
        .collect();

    let x_to_t_minus_1 = g1.pow(trace_length as u64 - 1);
    let t_monomial = Polynomial::new_monomial(FieldElement::one(), trace_length);
    let vanishing_numerator = &t_monomial - &Polynomial::new(&[FieldElement::one()]);
    let vanishing_denominator = Polynomial::new(&[-&x_to_t_minus_1, FieldElement::one()]);
    let z_poly = vanishing_numerator.div_with_ref(&vanishing_denominator)?;

    let d_polys: Vec<_> = c_evals
        .iter()
        .map(|evals| -> Result<Polynomial<FieldElement<A::Field>>, ProverError> {
            let coeffs = interpolate_fft(evals)?;
            Ok(Polynomial::new(&coeffs).div_with_ref(&z_poly)?)
        })
        .collect::<Result<_, _>>()?;
    let d_evals: Vec<Vec<FieldElement<A::Field>>> = d_polys
        .iter()
        .map(|poly| evaluate_fft(poly.coefficients(), domain_size))
        .collect::<Result<_, _>>()?;

    log::debug!("constructing boundary-constraint quotient polynomials");
    let boundary_constraints = air.boundary_constraints(input, output);
    let b_polys: Vec<_> = (0..width)
        .map(|j| -> Result<Polynomial<FieldElement<A::Field>>, ProverError> {
            let (xs, ys): (Vec<_>, Vec<_>) = boundary_constraints
                .iter()
                .filter(|(_, column, _)| *column == j)
                .map(|(row, _, value)| (g1.pow(*row as u64), value.clone()))
                .unzip();
            let interpolant = Polynomial::interpolate(xs.as_slice(), ys.as_slice())?;
            let numerator = &trace_polys[j] - &interpolant;
            Ok(numerator.div_with_ref(&Polynomial::zpoly(&xs))?)
        })
        .collect::<Result<_, _>>()?;
    let b_evals: Vec<Vec<FieldElement<A::Field>>> = b_polys
        .iter()
        .map(|poly| evaluate_fft(poly.coefficients(), domain_size))
        .collect::<Result<_, _>>()?;

    log::debug!("committing the main trace");
    let build_leaf = |i: usize| {
        let mut values = Vec::with_capacity(3 * width);
        values.extend((0..width).map(|j| p_evals[j][i].clone()));
        values.extend((0..width).map(|j| d_evals[j][i].clone()));
        values.extend((0..width).map(|j| b_evals[j][i].clone()));
        leaf_bytes(&values)
    };
    #[cfg(not(feature = "parallel"))]
    let main_leaves: Vec<Vec<u8>> = (0..domain_size).map(build_leaf).collect();
    #[cfg(feature = "parallel")]
    let main_leaves: Vec<Vec<u8>> = (0..domain_size).into_par_iter().map(build_leaf).collect();
    let main_tree = MerkleTree::build(&main_leaves)?;

    let challenge_transcript = Transcript::from_root(&main_tree.root());
    let k1 = challenge_transcript.challenge_field_element::<A::Field>(CHALLENGE_K1);
    let k2 = challenge_transcript.challenge_field_element::<A::Field>(CHALLENGE_K2);
    let k3 = challenge_transcript.challenge_field_element::<A::Field>(CHALLENGE_K3);
    let k4 = challenge_transcript.challenge_field_element::<A::Field>(CHALLENGE_K4);

    log::debug!("building the pseudorandom linear combination L");
    let mut l_evals = vec![FieldElement::zero(); domain_size];
    for i in 0..domain_size {
        let x_to_t = g2.pow(i as u64).pow(trace_length as u64);
        let mut acc = FieldElement::zero();
        for j in 0..width {
            acc = &acc + &d_evals[j][i];
            acc = &acc + &(&k1 * &p_evals[j][i]);
            acc = &acc + &(&k2 * &(&x_to_t * &p_evals[j][i]));
            acc = &acc + &(&k3 * &b_evals[j][i]);
            acc = &acc + &(&k4 * &(&x_to_t * &b_evals[j][i]));
        }
        l_evals[i] = acc;
    }
    let l_coeffs = interpolate_fft(&l_evals)?;
    let l_poly = Polynomial::new(&l_coeffs);

    let l_leaves: Vec<Vec<u8>> = l_evals.iter().map(|v| v.to_bytes_be()).collect();
    let l_tree = MerkleTree::build(&l_leaves)?;

    log::info!("sampling spot-check positions and running FRI");
    #[cfg(feature = "instruments")]
    let fri_timer = Instant::now();
    let sampling_transcript = Transcript::from_root(&l_tree.root());
    let positions = sampling_transcript.sample_indices(
        proof_options.spot_check_security_factor,
        domain_size,
        proof_options.extension_factor,
    );

    let openings = positions
        .iter()
        .map(|&pos| -> Result<SpotCheckOpening<A::Field>, ProverError> {
            let next = (pos + shift) % domain_size;
            let trace_at_position: Vec<_> = (0..width)
                .map(|j| p_evals[j][pos].clone())
                .chain((0..width).map(|j| d_evals[j][pos].clone()))
                .chain((0..width).map(|j| b_evals[j][pos].clone()))
                .collect();
            let trace_at_next: Vec<_> = (0..width)
                .map(|j| p_evals[j][next].clone())
                .chain((0..width).map(|j| d_evals[j][next].clone()))
                .chain((0..width).map(|j| b_evals[j][next].clone()))
                .collect();
            Ok(SpotCheckOpening {
                trace_at_position,
                trace_path: main_tree.branch(pos)?,
                trace_at_next,
                trace_next_path: main_tree.branch(next)?,
                composition_at_position: l_evals[pos].clone(),
                composition_path: l_tree.branch(pos)?,
            })
        })
        .collect::<Result<_, _>>()?;

    let mut fri_transcript = Transcript::from_root(&l_tree.root());
    let fri_proof = fri::prove(
        l_poly,
        domain_size,
        &mut fri_transcript,
        proof_options.fri_final_degree_threshold,
        &positions,
    )?;
    #[cfg(feature = "instruments")]
    log::debug!("FRI commit and query phases took {:?}", fri_timer.elapsed());

    Ok(StarkProof {
        trace_root: main_tree.root(),
        composition_root: l_tree.root(),
        openings,
        fri_proof,
    })
}
