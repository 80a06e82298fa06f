use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MerkleError {
    #[error("cannot build a Merkle tree with zero leaves")]
    EmptyInput,
    #[error("leaf count {0} is not a power of two")]
    NotAPowerOfTwo(usize),
    #[error("leaf index {0} is out of range for a tree with {1} leaves")]
    IndexOutOfRange(usize, usize),
}
