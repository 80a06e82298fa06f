/// A small prime field backed by a native `u64`, used for the "tiny field" test scenario and
/// for cheap unit tests of the polynomial and FFT layers.
pub mod u64_prime_field;
/// The default 256-bit prime field used by the STARK prover and verifier.
pub mod stark_prime_field;
