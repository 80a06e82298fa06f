use lambda_stark::air::Air;
use lambda_stark::config::ProofOptions;
use lambda_stark::errors::StarkError;
use lambda_stark::examples::{FibonacciAir, MiMCAir};
use lambda_stark::{prover, verifier};
use lambda_stark_math::field::element::FieldElement;
use lambda_stark_math::field::fields::u64_prime_field::U64PrimeField;

type FTiny = U64PrimeField<65537>;
type FE = FieldElement<FTiny>;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fibonacci_scenario() -> (FibonacciAir<FTiny>, Vec<FE>, Vec<FE>, ProofOptions) {
    let air = FibonacciAir::<FTiny>::new((), 8);
    let input = vec![FE::from(1), FE::from(1)];
    let output = air.build_trace(&input).last_row();
    let options = ProofOptions::new(8, 24, 1);
    (air, input, output, options)
}

fn mimc_scenario() -> (MiMCAir<FTiny>, Vec<FE>, Vec<FE>, ProofOptions) {
    let constants = vec![FE::from(3), FE::from(7)];
    let air = MiMCAir::<FTiny>::new(constants, 8);
    let input = vec![FE::from(5)];
    let output = air.build_trace(&input).last_row();
    let options = ProofOptions::new(16, 24, 1);
    (air, input, output, options)
}

#[test]
fn proves_and_verifies_a_fibonacci_computation() {
    init_logger();
    let (air, input, output, options) = fibonacci_scenario();
    let proof = prover::prove(&air, &input, &output, &options).unwrap();
    assert!(verifier::verify(&air, &input, &output, &proof, &options));
}

#[test]
fn proves_and_verifies_a_mimc_computation() {
    let (air, input, output, options) = mimc_scenario();
    let proof = prover::prove(&air, &input, &output, &options).unwrap();
    assert!(verifier::verify(&air, &input, &output, &proof, &options));
}

#[test]
fn rejects_a_claimed_output_that_does_not_match_the_trace() {
    let (air, input, output, options) = fibonacci_scenario();
    let proof = prover::prove(&air, &input, &output, &options).unwrap();
    let wrong_output = vec![output[0].clone(), &output[1] + &FE::from(1)];
    assert!(!verifier::verify(&air, &input, &wrong_output, &proof, &options));
}

#[test]
fn rejects_a_tampered_main_trace_opening() {
    let (air, input, output, options) = fibonacci_scenario();
    let mut proof = prover::prove(&air, &input, &output, &options).unwrap();
    let tampered = &proof.openings[0].trace_at_position[0] + &FE::from(1);
    proof.openings[0].trace_at_position[0] = tampered;
    let err = verifier::verify_detailed(&air, &input, &output, &proof, &options).unwrap_err();
    assert_eq!(err, StarkError::MerkleVerifyFailed);
}

#[test]
fn rejects_a_tampered_fri_proof() {
    let (air, input, output, options) = fibonacci_scenario();
    let mut proof = prover::prove(&air, &input, &output, &options).unwrap();
    let bumped = &proof.fri_proof.final_coefficients[0] + &FE::from(1);
    proof.fri_proof.final_coefficients[0] = bumped;
    let err = verifier::verify_detailed(&air, &input, &output, &proof, &options).unwrap_err();
    assert_eq!(err, StarkError::FriVerifyFailed);
}

#[test]
fn rejects_a_fri_proof_bound_to_a_different_composition_root() {
    let (air, input, output, options) = fibonacci_scenario();
    let mut proof = prover::prove(&air, &input, &output, &options).unwrap();
    proof.fri_proof.layer_roots[0] = [0xAAu8; 32];
    let err = verifier::verify_detailed(&air, &input, &output, &proof, &options).unwrap_err();
    assert_eq!(err, StarkError::FriVerifyFailed);
}

#[test]
fn rejects_mismatched_input_output_widths_as_an_invalid_parameter() {
    let (air, input, output, options) = fibonacci_scenario();
    let proof = prover::prove(&air, &input, &output, &options).unwrap();
    let short_input = vec![input[0].clone()];
    let err = verifier::verify_detailed(&air, &short_input, &output, &proof, &options).unwrap_err();
    assert_eq!(err, StarkError::InvalidParameter);
}

#[test]
#[cfg(feature = "serde")]
fn a_serialized_proof_round_trips_and_still_verifies() {
    let (air, input, output, options) = fibonacci_scenario();
    let proof = prover::prove(&air, &input, &output, &options).unwrap();
    let encoded = serde_json::to_vec(&proof).unwrap();
    let decoded = serde_json::from_slice(&encoded).unwrap();
    assert!(verifier::verify(&air, &input, &output, &decoded, &options));
}

#[test]
fn rejects_an_extension_factor_mismatch_between_prover_and_verifier() {
    let (air, input, output, options) = fibonacci_scenario();
    let proof = prover::prove(&air, &input, &output, &options).unwrap();
    let wrong_options = ProofOptions::new(16, options.spot_check_security_factor, options.fri_final_degree_threshold);
    assert!(!verifier::verify(&air, &input, &output, &proof, &wrong_options));
}
