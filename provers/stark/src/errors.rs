use lambda_stark_crypto::errors::MerkleError;
use lambda_stark_math::fft::errors::FftError;
use lambda_stark_math::field::errors::FieldError;
use lambda_stark_math::polynomial::errors::PolynomialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProverError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Fft(#[from] FftError),
    #[error(transparent)]
    Merkle(#[from] MerkleError),
    #[error(transparent)]
    Polynomial(#[from] PolynomialError),
}

/// Every reason `verify()` might reject a proof. `verify()` collapses this to a `bool`
/// (logging the specific reason at `warn!`), but `verify_detailed()` returns it directly so
/// callers that need to distinguish failure modes — tests chief among them — can do so.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum StarkError {
    #[error("invalid parameter")]
    InvalidParameter,
    #[error("the proof's shape does not match the AIR or proof options")]
    MalformedProof,
    #[error("a Merkle opening did not match its claimed root")]
    MerkleVerifyFailed,
    #[error("a transition or boundary constraint did not hold at a sampled point")]
    ConstraintViolation,
    #[error("the FRI folding or final-codeword check failed")]
    FriVerifyFailed,
}
