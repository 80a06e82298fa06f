pub mod air;
pub mod config;
pub mod errors;
pub mod examples;
pub mod fri;
pub mod proof;
pub mod prover;
pub mod trace;
pub mod verifier;

pub use air::Air;
pub use config::ProofOptions;
pub use errors::{ProverError, StarkError};
pub use proof::StarkProof;
